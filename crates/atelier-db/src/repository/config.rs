//! # Configuration Repository
//!
//! The `ui-config` record: the style configuration, saved on every commit
//! and read once at startup.
//!
//! ## Hydration
//! ```text
//! stored text ──► serde_json ──► validate() ──► Some(Configuration)
//!      │               │
//!      │ missing       │ not JSON
//!      ▼               ▼
//!     None         warn!, None      (the app falls back to defaults)
//! ```

use atelier_core::validation::validate;
use atelier_core::{Configuration, CONFIG_STORAGE_KEY};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::storage::LocalStorageRepository;

/// Repository for the persisted style configuration.
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    storage: LocalStorageRepository,
}

impl ConfigRepository {
    /// Creates a new ConfigRepository.
    pub fn new(storage: LocalStorageRepository) -> Self {
        ConfigRepository { storage }
    }

    /// Loads the stored configuration, validated.
    ///
    /// ## Returns
    /// * `Ok(Some(config))` - A record existed and was JSON (any shape:
    ///   partial or out-of-range content is repaired by the validator)
    /// * `Ok(None)` - No record, or the record is not JSON
    /// * `Err(DbError)` - Storage itself failed
    pub async fn load(&self) -> DbResult<Option<Configuration>> {
        let Some(text) = self.storage.get(CONFIG_STORAGE_KEY).await? else {
            debug!("No stored configuration");
            return Ok(None);
        };

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(raw) => Ok(Some(validate(&raw))),
            Err(e) => {
                warn!(error = %e, "Stored configuration is not JSON, ignoring it");
                Ok(None)
            }
        }
    }

    /// Saves the configuration.
    pub async fn save(&self, config: &Configuration) -> DbResult<()> {
        let text = serde_json::to_string(config)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        self.storage.set(CONFIG_STORAGE_KEY, &text).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use atelier_core::{Configuration, FontUnit, CONFIG_STORAGE_KEY};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let db = db().await;
        assert_eq!(db.config().load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let db = db().await;
        let mut config = Configuration::default();
        config.typography.unit = FontUnit::Rem;
        config.layout.dark = true;

        db.config().save(&config).await.unwrap();
        assert_eq!(db.config().load().await.unwrap(), Some(config));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_none() {
        let db = db().await;
        db.local_storage().set(CONFIG_STORAGE_KEY, "{oops").await.unwrap();
        assert_eq!(db.config().load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stored_record_is_validated() {
        let db = db().await;
        db.local_storage()
            .set(CONFIG_STORAGE_KEY, r#"{"button":{"radius":999},"stroke":{"weight":-2}}"#)
            .await
            .unwrap();

        let config = db.config().load().await.unwrap().unwrap();
        assert_eq!(config.button.radius, 32);
        assert_eq!(config.stroke.weight, 0);
        assert!(config.is_within_domain());
    }
}
