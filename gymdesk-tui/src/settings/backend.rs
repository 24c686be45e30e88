use super::SettingsError;

/// Raw storage under the typed [`SettingsProvider`](super::SettingsProvider).
///
/// Values are opaque blobs. `keys_under` returns keys in ascending order.
pub trait SettingsBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or replace.
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), SettingsError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;

    fn keys_under(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
