use std::path::PathBuf;

use crate::adapters::files::atomic::write_atomically;
use crate::core::errors::{Result, VpnportError};
use crate::core::models::profile::{ConnectionProfile, Context, ProfileKey};
use crate::core::traits::profile_store::ProfileStore;

/// Stores one JSON file per profile.
///
/// Layout:
/// ```text
/// profiles/
///   hosts/office.json
///   providers/Mullvad.json
/// ```
#[derive(Clone)]
pub struct FileProfileStore {
    root: PathBuf,
}

impl FileProfileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &ProfileKey) -> PathBuf {
        self.root
            .join(key.context.dir_name())
            .join(format!("{}.json", key.id))
    }
}

impl ProfileStore for FileProfileStore {
    fn ids(&self, context: Context) -> Result<Vec<String>> {
        let dir = self.root.join(context.dir_name());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                ids.push(stem.to_string_lossy().into_owned());
            }
        }
        Ok(ids)
    }

    fn contains(&self, key: &ProfileKey) -> bool {
        self.path_for(key).is_file()
    }

    fn load(&self, key: &ProfileKey) -> Result<ConnectionProfile> {
        let path = self.path_for(key);
        let content = std::fs::read_to_string(&path).map_err(|_| VpnportError::ProfileNotFound {
            context: key.context.to_string(),
            id: key.id.clone(),
        })?;
        serde_json::from_str(&content).map_err(|e| VpnportError::StateError {
            path,
            detail: e.to_string(),
        })
    }

    fn save(&self, profile: &ConnectionProfile) -> Result<()> {
        let path = self.path_for(&profile.key);
        let json =
            serde_json::to_string_pretty(profile).map_err(|e| VpnportError::StateError {
                path: path.clone(),
                detail: e.to_string(),
            })?;
        write_atomically(&path, json.as_bytes())
    }

    fn remove(&self, key: &ProfileKey) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(VpnportError::ProfileNotFound {
                context: key.context.to_string(),
                id: key.id.clone(),
            });
        }
        std::fs::remove_file(path)?;
        Ok(())
    }
}
