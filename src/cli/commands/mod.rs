pub mod activate;
pub mod add_provider;
pub mod import;
pub mod imported;
pub mod init;
pub mod list;
pub mod remove;
pub mod seal;
pub mod status;
pub mod uninstall;
