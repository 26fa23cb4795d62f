//! Module tiles read from a `<root>/<category>/*.png` directory tree

use crate::algorithm::module::ModuleSource;
use crate::io::error::{Result, WithPath};
use image::GrayImage;
use rand::RngCore;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Whether `path` has a `.png` extension, ignoring case
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Sorted image files directly inside `dir` whose extension passes `accept`
///
/// # Errors
///
/// Returns a file system error if the directory cannot be listed
pub fn list_files(dir: &Path, accept: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_path(dir, "list directory")? {
        let path = entry.with_path(dir, "list directory")?.path();
        if path.is_file() && accept(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Sorted category subdirectories of `root`, keyed by directory name
///
/// # Errors
///
/// Returns a file system error if the root cannot be listed
pub fn list_categories(root: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut categories = BTreeMap::new();
    for entry in std::fs::read_dir(root).with_path(root, "list directory")? {
        let path = entry.with_path(root, "list directory")?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            categories.insert(name.to_string(), path.clone());
        }
    }
    Ok(categories)
}

/// Picks a random category directory, then a random PNG inside it
///
/// The listing is taken once at construction. Files that fail to decode
/// yield `None` for that draw.
#[derive(Debug, Default)]
pub struct DirectorySource {
    categories: BTreeMap<String, Vec<PathBuf>>,
}

impl DirectorySource {
    /// Index every category directory under `root` holding at least one PNG
    ///
    /// A missing root gives an empty source rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a file system error if an existing directory cannot be listed
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            debug!(root = %root.display(), "module directory missing, source is empty");
            return Ok(Self::default());
        }
        let mut categories = BTreeMap::new();
        for (name, dir) in list_categories(root)? {
            let files = list_files(&dir, is_png)?;
            if !files.is_empty() {
                categories.insert(name, files);
            }
        }
        info!(
            categories = categories.len(),
            files = categories.values().map(Vec::len).sum::<usize>(),
            "module directory indexed"
        );
        Ok(Self { categories })
    }

    /// Indexed category names
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Whether no module file was found
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn files_for(&self, category: Option<&str>, rng: &mut dyn RngCore) -> Option<&[PathBuf]> {
        if let Some(files) = category.and_then(|name| self.categories.get(name)) {
            return Some(files.as_slice());
        }
        let names: Vec<&String> = self.categories.keys().collect();
        let name = names.choose(rng)?;
        self.categories.get(*name).map(Vec::as_slice)
    }
}

impl ModuleSource for DirectorySource {
    fn next_module(&mut self, category: Option<&str>, rng: &mut dyn RngCore) -> Option<GrayImage> {
        let path = self.files_for(category, rng)?.choose(rng)?;
        match image::open(path) {
            Ok(img) => Some(img.into_luma8()),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "module unreadable");
                None
            }
        }
    }
}
