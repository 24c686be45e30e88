//! Settings that vanish with the process.

use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

#[derive(Default)]
pub struct MemoryBackend {
    blobs: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.blobs.get(key).map(|blob| blob.to_vec()))
    }

    fn write(&self, key: &str, blob: &[u8]) -> Result<(), SettingsError> {
        self.blobs.insert(key.to_owned(), blob.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.blobs.remove(key);
        Ok(())
    }

    fn keys_under(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let mut keys: Vec<String> = self
            .blobs
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }
}
