use std::path::Path;

use crate::core::traits::source_files::SourceFiles;

/// Removes rejected profile files from the local filesystem.
pub struct FsSourceFiles;

impl SourceFiles for FsSourceFiles {
    fn remove(&self, location: &Path) -> std::io::Result<()> {
        std::fs::remove_file(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ovpn");
        std::fs::write(&path, "foo-bar").unwrap();

        FsSourceFiles.remove(&path).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsSourceFiles.remove(&dir.path().join("gone.ovpn")).is_err());
    }
}
