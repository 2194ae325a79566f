use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus, ProcessedOrder};
use crate::domain::ports::{OrderCache, OrderStore};

/// How long a processed order id is remembered as a duplicate.
pub const DEDUP_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Value written under the order id once the order is persisted.
pub const PROCESSED_MARKER: &str = "processed";

pub struct OrderProcessor {
    store: Arc<dyn OrderStore>,
    cache: Option<Arc<dyn OrderCache>>,
}

impl OrderProcessor {
    pub fn new(store: Arc<dyn OrderStore>, cache: Arc<dyn OrderCache>) -> Self {
        Self {
            store,
            cache: Some(cache),
        }
    }

    /// A processor with no duplicate detection: every submission is persisted.
    pub fn without_cache(store: Arc<dyn OrderStore>) -> Self {
        Self { store, cache: None }
    }

    /// Persist `submission` unless its id was already processed within
    /// [`DEDUP_WINDOW`]. Duplicates are a silent no-op.
    ///
    /// The cache is only marked after the store write succeeded, so a failed
    /// write can be retried with the same id.
    pub fn process(&self, submission: Order) -> Result<(), DomainError> {
        if self.is_duplicate(submission.order_id()) {
            log::info!(
                "Order {} already processed, ignoring submission",
                submission.order_id()
            );
            return Ok(());
        }

        let total = submission.total();
        let now = Utc::now();
        let order_id = submission.order_id().to_string();
        let record = ProcessedOrder {
            order_id: order_id.clone(),
            products: submission.into_products(),
            total,
            status: OrderStatus::Processed,
            created_at: now,
            updated_at: now,
        };

        let saved = self.store.save(record)?;
        log::info!("Order {} processed with total {}", saved.order_id, saved.total);

        self.mark_processed(&order_id);
        Ok(())
    }

    pub(crate) fn is_duplicate(&self, order_id: &str) -> bool {
        match &self.cache {
            Some(cache) if !order_id.is_empty() => cache.exists(order_id),
            _ => false,
        }
    }

    fn mark_processed(&self, order_id: &str) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.set_with_expiry(order_id, PROCESSED_MARKER, DEDUP_WINDOW) {
            log::warn!(
                "Order {} persisted but could not be marked as processed: {}",
                order_id,
                e
            );
        }
    }
}
