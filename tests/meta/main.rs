//! Structural checks over the test tree: every source file has a mirrored unit test file
