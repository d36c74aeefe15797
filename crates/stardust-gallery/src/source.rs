//! Project-catalog sources.

use std::fs;
use std::path::PathBuf;

use stardust_platform::{ProjectSource, Result};

/// Reads the catalog from disk, the desktop analog of fetching
/// `data/projects.json`.
pub struct FsProjectSource {
    pub path: PathBuf,
}

impl ProjectSource for FsProjectSource {
    fn fetch(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// In-memory source for tests.
pub struct StaticProjectSource {
    pub body: String,
}

impl ProjectSource for StaticProjectSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_fetch_error() {
        let source = FsProjectSource {
            path: PathBuf::from("/nonexistent/projects.json"),
        };
        assert!(source.fetch().is_err());
    }
}
