//! Profile store capability and its implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::error::StoreError;
use crate::favorites::SetOp;
use crate::models::{Domain, RemoteProfile};

/// Remote key-value store of profile documents keyed by uid.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, uid: &str) -> Result<Option<RemoteProfile>, StoreError>;

    /// Create the profile for `uid`. Does nothing if one already exists.
    async fn create(&self, uid: &str, profile: &RemoteProfile) -> Result<(), StoreError>;

    /// Add `item_id` to, or remove it from, the favorites set of `domain`.
    async fn mutate_set_field(
        &self,
        uid: &str,
        domain: Domain,
        item_id: &str,
        op: SetOp,
    ) -> Result<(), StoreError>;
}

/// In-memory profile store
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, RemoteProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<RemoteProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(uid).cloned())
    }

    async fn create(&self, uid: &str, profile: &RemoteProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(uid.to_string())
            .or_insert_with(|| profile.clone());
        Ok(())
    }

    async fn mutate_set_field(
        &self,
        uid: &str,
        domain: Domain,
        item_id: &str,
        op: SetOp,
    ) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
        profile.favorites.set(domain, item_id, op == SetOp::Add);
        Ok(())
    }
}

/// Profile store keeping one pretty-printed JSON document per uid in a directory.
pub struct JsonProfileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on the documents.
    write_lock: Mutex<()>,
}

impl JsonProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn profile_path(&self, uid: &str) -> Result<PathBuf, StoreError> {
        validate_key(uid)?;
        Ok(self.dir.join(format!("{uid}.json")))
    }

    async fn read(&self, path: &Path) -> Result<Option<RemoteProfile>, StoreError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write(&self, path: &Path, profile: &RemoteProfile) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let output = serde_json::to_string_pretty(profile)?;
        // Write to a sibling file first so a crash never leaves a truncated document.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, output).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for JsonProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<RemoteProfile>, StoreError> {
        let path = self.profile_path(uid)?;
        self.read(&path).await
    }

    async fn create(&self, uid: &str, profile: &RemoteProfile) -> Result<(), StoreError> {
        let path = self.profile_path(uid)?;
        let _guard = self.write_lock.lock().await;
        if self.read(&path).await?.is_some() {
            tracing::debug!(uid, "profile already exists, create is a no-op");
            return Ok(());
        }
        self.write(&path, profile).await
    }

    async fn mutate_set_field(
        &self,
        uid: &str,
        domain: Domain,
        item_id: &str,
        op: SetOp,
    ) -> Result<(), StoreError> {
        let path = self.profile_path(uid)?;
        let _guard = self.write_lock.lock().await;
        let mut profile = self
            .read(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
        profile.favorites.set(domain, item_id, op == SetOp::Add);
        self.write(&path, &profile).await
    }
}

/// Keys become file names, so reject anything that could escape the directory.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\', '\0'])
        || key.contains("..");
    if bad {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identity;

    fn profile(uid: &str) -> RemoteProfile {
        RemoteProfile::for_identity(&Identity::new(uid))
    }

    #[tokio::test]
    async fn memory_store_create_is_noop_when_present() {
        let store = MemoryProfileStore::new();
        store.create("u1", &profile("u1")).await.unwrap();
        store
            .mutate_set_field("u1", Domain::Skills, "a", SetOp::Add)
            .await
            .unwrap();

        store.create("u1", &profile("u1")).await.unwrap();

        let loaded = store.get("u1").await.unwrap().unwrap();
        assert!(loaded.favorites.contains(Domain::Skills, "a"));
    }

    #[tokio::test]
    async fn memory_store_mutate_unknown_uid_fails() {
        let store = MemoryProfileStore::new();
        let err = store
            .mutate_set_field("ghost", Domain::Tools, "x", SetOp::Add)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(uid) if uid == "ghost"));
    }

    #[tokio::test]
    async fn json_store_persists_mutations() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonProfileStore::new(tmp.path().join("profiles"));

        assert!(store.get("u1").await.unwrap().is_none());
        store.create("u1", &profile("u1")).await.unwrap();
        store
            .mutate_set_field("u1", Domain::McpServers, "github", SetOp::Add)
            .await
            .unwrap();
        store
            .mutate_set_field("u1", Domain::McpServers, "slack", SetOp::Add)
            .await
            .unwrap();
        store
            .mutate_set_field("u1", Domain::McpServers, "github", SetOp::Remove)
            .await
            .unwrap();

        let reopened = JsonProfileStore::new(tmp.path().join("profiles"));
        let loaded = reopened.get("u1").await.unwrap().unwrap();
        let ids: Vec<_> = loaded.favorites.ids(Domain::McpServers).iter().cloned().collect();
        assert_eq!(ids, vec!["slack".to_string()]);
    }

    #[tokio::test]
    async fn json_store_create_keeps_existing_document() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonProfileStore::new(tmp.path());
        store.create("u1", &profile("u1")).await.unwrap();
        store
            .mutate_set_field("u1", Domain::Plugins, "p", SetOp::Add)
            .await
            .unwrap();

        store.create("u1", &profile("u1")).await.unwrap();

        let loaded = store.get("u1").await.unwrap().unwrap();
        assert!(loaded.favorites.contains(Domain::Plugins, "p"));
    }

    #[tokio::test]
    async fn json_store_rejects_path_like_uids() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonProfileStore::new(tmp.path());
        for uid in ["", "../etc", "a/b", ".hidden"] {
            assert!(matches!(
                store.get(uid).await,
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
