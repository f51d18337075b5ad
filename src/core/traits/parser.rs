use std::path::Path;

use crate::core::models::import::ParseOutcome;

/// Port for turning a profile file into a configuration.
///
/// Implementations never fail with `Err`: every problem is described
/// by one of the `ParseOutcome` variants.
pub trait ConfigurationParser {
    /// Parse the file at `location`, decrypting it with `secret` if needed.
    fn parse(&self, location: &Path, secret: Option<&str>) -> ParseOutcome;
}
