pub mod atomic;
pub mod fs_source_files;
