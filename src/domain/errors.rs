use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found with id: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

/// Failure reported by a cache adapter. Never surfaced past the processor.
#[derive(Debug, Error)]
#[error("Cache unavailable: {0}")]
pub struct CacheError(pub String);
