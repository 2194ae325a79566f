use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{Page, PageRequest, ProcessedOrder};
use crate::domain::ports::OrderStore;

pub struct OrderQueryService {
    store: Arc<dyn OrderStore>,
}

impl OrderQueryService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    pub fn find_by_id(&self, id: &str) -> Result<ProcessedOrder, DomainError> {
        log::debug!("Looking up order {}", id);
        self.store
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    /// Ordering is whatever the store's natural order is.
    pub fn find_all(&self, page: PageRequest) -> Result<Page<ProcessedOrder>, DomainError> {
        self.store.find_page(page)
    }
}
