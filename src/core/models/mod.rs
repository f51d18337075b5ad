pub mod configuration;
pub mod import;
pub mod profile;
pub mod prompt;
pub mod vpn_status;
