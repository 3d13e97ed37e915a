//! Engine configuration.

use std::path::PathBuf;

/// Path settings used by the asset inliner.
///
/// Absolute references (`/fonts/icons.woff`) resolve under [`doc_root`],
/// relative references resolve under [`base_dir`]. Both default to the
/// current directory.
///
/// [`doc_root`]: Options::doc_root
/// [`base_dir`]: Options::base_dir
#[derive(Debug, Clone)]
pub struct Options {
    pub doc_root: PathBuf,
    pub base_dir: PathBuf,
}

impl Options {
    /// Create options with both paths set to the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document root for absolute asset references.
    pub fn doc_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.doc_root = path.into();
        self
    }

    /// Set the base directory for relative asset references.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = path.into();
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            doc_root: PathBuf::from("."),
            base_dir: PathBuf::from("."),
        }
    }
}
