//! Where the store writes its collections. One JSON document per key, the
//! same granularity the sync protocol uses.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::ClientError;

pub trait Persister {
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), ClientError>;
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// One `<key>.json` file per collection in a directory.
pub struct DirPersister {
    dir: PathBuf,
}

impl DirPersister {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| ClientError::Persist(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Persister for DirPersister {
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), ClientError> {
        let body = serde_json::to_vec_pretty(value)?;
        std::fs::write(self.path(key), body).map_err(|e| ClientError::Persist(e.to_string()))
    }

    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, ClientError> {
        match std::fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Persist(e.to_string())),
        }
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Persist(e.to_string())),
        }
    }
}

/// In-memory persistence for tests.
#[derive(Default)]
pub struct MemoryPersister {
    map: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryPersister {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.map.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Persister for MemoryPersister {
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), ClientError> {
        self.map.lock().unwrap().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, ClientError> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}
