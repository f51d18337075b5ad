pub mod file_profile_store;
