use crate::error::StorageError;

/// Narrow string key-value capability that all per-user state flows through.
///
/// The store knows nothing about key structure; see [`super::keys`]. Reads
/// never fail: a missing key, or a backing store that cannot answer, yields
/// `None` and the caller falls back to its default. There is no atomicity
/// across keys.
pub trait PersistenceGateway {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
