use std::path::Path;

/// Port for removing profile files that could not be imported.
pub trait SourceFiles {
    fn remove(&self, location: &Path) -> std::io::Result<()>;
}
