//! Tests for error types and context helpers

#[cfg(test)]
mod tests {
    use glyphcompose::io::error::{CompositionError, WithPath, invalid_parameter};
    use std::error::Error;
    use std::io;
    use std::path::{Path, PathBuf};

    // Tests that file system errors carry the path and operation
    #[test]
    fn test_with_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.with_path(Path::new("modules/arrows"), "list directory");

        match err {
            Err(CompositionError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, PathBuf::from("modules/arrows"));
                assert_eq!(operation, "list directory");
            }
            other => panic!("expected a file system error, got {other:?}"),
        }
        assert_eq!(Ok::<_, io::Error>(3).with_path(Path::new("x"), "read").ok(), Some(3));
    }

    // Tests display messages
    // Verified by dropping the parameter name from the message
    #[test]
    fn test_display() {
        let invalid = invalid_parameter("trama.tile", &"0..=10", &"tile sizes must be positive");
        assert_eq!(
            invalid.to_string(),
            "Invalid configuration 'trama.tile' = '0..=10': tile sizes must be positive"
        );

        let fs = CompositionError::FileSystem {
            path: PathBuf::from("out/composition_001.png"),
            operation: "write composition",
            source: io::Error::other("disk full"),
        };
        let message = fs.to_string();
        assert!(message.contains("write composition"));
        assert!(message.contains("out/composition_001.png"));
        assert!(message.contains("disk full"));
    }

    // Tests error sources
    #[test]
    fn test_source_chain() {
        let fs: CompositionError = io::Error::other("boom").into();
        assert!(fs.source().is_some());
        assert!(matches!(fs, CompositionError::FileSystem { operation: "unknown", .. }));

        let parse = serde_json::from_str::<u32>("nope").expect_err("not a number");
        let config = CompositionError::ConfigParse {
            path: PathBuf::from("config.json"),
            source: parse,
        };
        assert!(config.source().is_some());
        assert!(config.to_string().contains("config.json"));

        let invalid = invalid_parameter("dpi", &0, &"must be positive");
        assert!(invalid.source().is_none());
    }
}
