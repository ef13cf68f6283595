use std::time::Duration;

use crate::errors::SiftResult;

/// Key-value store behind the cache gateway. Values are JSON strings.
pub trait ICacheStore: Send + Sync {
    fn get(&self, key: &str) -> SiftResult<Option<String>>;

    fn set(&self, key: &str, value: String, ttl: Duration) -> SiftResult<()>;

    fn delete(&self, key: &str) -> SiftResult<()>;

    /// Remove every key starting with `prefix`. Returns how many were removed.
    fn delete_by_prefix(&self, prefix: &str) -> SiftResult<usize>;
}
