// Persistence gateway: versioned save records over a key-value store.
//
// Nothing here returns an error to the caller. Storage and parse failures are
// logged and degrade to "no save found" (on read) or "not persisted" (on
// write); the in-memory session stays authoritative.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::save::{migrate_to_latest, SaveData, SaveRecord};
use crate::store::SaveStore;

/// Storage key of the current (v2) record.
pub const SAVE_KEY_V2: &str = "save/v2";

/// Storage key of the unversioned legacy record.
pub const SAVE_KEY_V1: &str = "save/v1";

pub struct SaveGateway<S> {
    store: S,
}

impl<S: SaveStore> SaveGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the persisted save, upgrading it to the current schema.
    ///
    /// The legacy key is consulted only when no v2 record exists. A legacy
    /// record is migrated and written back under the v2 key; the legacy key is
    /// left in place. A v2 record that cannot be read or parsed yields `None`
    /// and is left untouched; one that parses but is not an object migrates to
    /// the default save.
    pub fn load_save(&self) -> Option<SaveData> {
        match self.read_value(SAVE_KEY_V2) {
            Ok(Some(value)) => return Some(migrate_to_latest(&value)),
            Ok(None) => {}
            Err(e) => {
                warn!("Ignoring unreadable {SAVE_KEY_V2} record: {e:#}");
                return None;
            }
        }

        let value = match self.read_value(SAVE_KEY_V1) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No persisted save found");
                return None;
            }
            Err(e) => {
                warn!("Ignoring unreadable {SAVE_KEY_V1} record: {e:#}");
                return None;
            }
        };

        match SaveRecord::decode(&value) {
            SaveRecord::Unreadable => {
                warn!("{SAVE_KEY_V1} does not hold an object; treating as absent");
                None
            }
            record => {
                info!("Upgrading {SAVE_KEY_V1} record to {SAVE_KEY_V2}");
                let save = record.into_latest();
                self.write_save(&save);
                Some(save)
            }
        }
    }

    /// Persist `save` under the v2 key. Failures are logged, not returned.
    pub fn write_save(&self, save: &SaveData) {
        if let Err(e) = self.try_write(save) {
            error!("Save not persisted: {e:#}");
        }
    }

    /// Remove both the v2 and the legacy record.
    pub fn clear_save(&self) {
        for key in [SAVE_KEY_V2, SAVE_KEY_V1] {
            if let Err(e) = self.store.remove(key) {
                error!("Failed to remove {key}: {e:#}");
            }
        }
        info!("Cleared persisted save");
    }

    fn read_value(&self, key: &str) -> Result<Option<Value>> {
        let Some(raw) = self
            .store
            .get(key)
            .with_context(|| format!("failed to read {key}"))?
        else {
            return Ok(None);
        };

        let value = serde_json::from_str(&raw).with_context(|| format!("failed to parse {key}"))?;
        Ok(Some(value))
    }

    fn try_write(&self, save: &SaveData) -> Result<()> {
        let json = serde_json::to_string(save).context("failed to serialize save")?;
        self.store
            .set(SAVE_KEY_V2, &json)
            .with_context(|| format!("failed to write {SAVE_KEY_V2}"))?;
        Ok(())
    }
}
