use crate::core::errors::Result;
use crate::core::models::profile::{ConnectionProfile, Context, ProfileKey};

/// Port for persisting saved profiles.
pub trait ProfileStore {
    /// Ids of all profiles in `context`, in no particular order.
    fn ids(&self, context: Context) -> Result<Vec<String>>;

    fn contains(&self, key: &ProfileKey) -> bool;

    fn load(&self, key: &ProfileKey) -> Result<ConnectionProfile>;

    fn save(&self, profile: &ConnectionProfile) -> Result<()>;

    fn remove(&self, key: &ProfileKey) -> Result<()>;
}
