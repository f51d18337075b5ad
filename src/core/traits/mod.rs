pub mod parser;
pub mod presenter;
pub mod profile_store;
pub mod source_files;
pub mod vpn;
