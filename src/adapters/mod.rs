pub mod cipher;
pub mod files;
pub mod parsers;
pub mod profile_stores;
pub mod vpn;
