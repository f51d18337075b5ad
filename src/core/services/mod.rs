pub mod import_resolver;
pub mod messages;
pub mod organizer;
