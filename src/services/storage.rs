//! Persisted map preferences: last-known center and theme flag

use crate::{
    core::{
        constants::{CENTER_KEY, THEME_KEY},
        geo::LatLng,
    },
    traits::PreferenceStore,
    MapError, Result,
};
use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

fn decode_center(value: Option<&Value>) -> Result<Option<LatLng>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let center: LatLng = serde_json::from_value(value.clone())?;
            if center.is_valid() {
                Ok(Some(center))
            } else {
                Err(MapError::InvalidCoordinates(center.to_string()))
            }
        }
    }
}

fn decode_theme(value: Option<&Value>) -> Result<bool> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(dark)) => Ok(*dark),
        Some(other) => Err(MapError::Storage(format!(
            "expected a boolean for {}, found {}",
            THEME_KEY, other
        ))),
    }
}

/// Preferences held in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: RwLock<JsonMap<String, Value>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a center and theme
    pub fn with_values(center: Option<LatLng>, dark: bool) -> Self {
        let mut entries = JsonMap::new();
        if let Some(center) = center {
            entries.insert(CENTER_KEY.to_string(), serde_json::json!(center));
        }
        entries.insert(THEME_KEY.to_string(), Value::Bool(dark));
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn center(&self) -> Result<Option<LatLng>> {
        decode_center(self.entries.read().await.get(CENTER_KEY))
    }

    async fn dark_theme(&self) -> Result<bool> {
        decode_theme(self.entries.read().await.get(THEME_KEY))
    }

    async fn set_center(&self, center: LatLng) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(CENTER_KEY.to_string(), serde_json::to_value(center)?);
        Ok(())
    }

    async fn set_dark_theme(&self, dark: bool) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(THEME_KEY.to_string(), Value::Bool(dark));
        Ok(())
    }
}

/// Preferences kept as one JSON object in a file.
///
/// A missing file reads as an empty store; writes rewrite the whole file.
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<JsonMap<String, Value>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(JsonMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&text)? {
            Value::Object(entries) => Ok(entries),
            other => Err(MapError::Storage(format!(
                "{} does not hold a JSON object (found {})",
                self.path.display(),
                other
            ))),
        }
    }

    async fn update(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, text).await?;
        log::debug!("saved {} to {}", key, self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for JsonFilePreferenceStore {
    async fn center(&self) -> Result<Option<LatLng>> {
        decode_center(self.load().await?.get(CENTER_KEY))
    }

    async fn dark_theme(&self) -> Result<bool> {
        decode_theme(self.load().await?.get(THEME_KEY))
    }

    async fn set_center(&self, center: LatLng) -> Result<()> {
        self.update(CENTER_KEY, serde_json::to_value(center)?).await
    }

    async fn set_dark_theme(&self, dark: bool) -> Result<()> {
        self.update(THEME_KEY, Value::Bool(dark)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("propmap-{}-{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_memory_store_defaults() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.center().await.unwrap(), None);
        assert!(!store.dark_theme().await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        store.set_center(LatLng::new(8.95, 125.56)).await.unwrap();
        store.set_dark_theme(true).await.unwrap();

        assert_eq!(store.center().await.unwrap(), Some(LatLng::new(8.95, 125.56)));
        assert!(store.dark_theme().await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let store = JsonFilePreferenceStore::new(temp_path("missing"));
        assert_eq!(store.center().await.unwrap(), None);
        assert!(!store.dark_theme().await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let path = temp_path("persist");
        {
            let store = JsonFilePreferenceStore::new(&path);
            store.set_center(LatLng::new(8.94, 125.54)).await.unwrap();
            store.set_dark_theme(true).await.unwrap();
        }

        let reopened = JsonFilePreferenceStore::new(&path);
        assert_eq!(reopened.center().await.unwrap(), Some(LatLng::new(8.94, 125.54)));
        assert!(reopened.dark_theme().await.unwrap());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_file_store_rejects_garbage() {
        let path = temp_path("garbage");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert!(matches!(store.center().await, Err(MapError::Storage(_))));

        std::fs::write(&path, r#"{"map.dark_theme": "yes"}"#).unwrap();
        assert!(matches!(store.dark_theme().await, Err(MapError::Storage(_))));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_out_of_range_center_is_an_error() {
        let path = temp_path("range");
        std::fs::write(&path, r#"{"map.center": {"lat": 120.0, "lng": 0.0}}"#).unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert!(matches!(
            store.center().await,
            Err(MapError::InvalidCoordinates(_))
        ));

        let _ = std::fs::remove_file(&path);
    }
}
