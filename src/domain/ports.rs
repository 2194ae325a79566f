use std::time::Duration;

use super::errors::{CacheError, DomainError};
use super::order::{Page, PageRequest, ProcessedOrder};

/// Document store holding processed orders, keyed by order id.
pub trait OrderStore: Send + Sync + 'static {
    /// Persist `record`. Implementations must not overwrite an existing
    /// record with the same id; they return the stored one instead.
    fn save(&self, record: ProcessedOrder) -> Result<ProcessedOrder, DomainError>;
    fn find_by_id(&self, id: &str) -> Result<Option<ProcessedOrder>, DomainError>;
    fn find_page(&self, page: PageRequest) -> Result<Page<ProcessedOrder>, DomainError>;
}

/// Key-value cache used for duplicate detection.
pub trait OrderCache: Send + Sync + 'static {
    /// Returns `false` when the key is absent *or* the cache cannot be reached.
    fn exists(&self, key: &str) -> bool;
    fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
