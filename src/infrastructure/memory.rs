//! In-process gateways for tests and for running without Postgres or Redis.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::errors::{CacheError, DomainError};
use crate::domain::order::{Page, PageRequest, ProcessedOrder};
use crate::domain::ports::{OrderCache, OrderStore};

/// Keeps orders in insertion order. Saving an id that is already stored
/// returns the existing record untouched.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<Mutex<Vec<ProcessedOrder>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ProcessedOrder>>, DomainError> {
        self.orders
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store poisoned".to_string()))
    }
}

impl OrderStore for InMemoryOrderStore {
    fn save(&self, record: ProcessedOrder) -> Result<ProcessedOrder, DomainError> {
        let mut orders = self.lock()?;
        if let Some(existing) = orders.iter().find(|o| o.order_id == record.order_id) {
            return Ok(existing.clone());
        }
        orders.push(record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<ProcessedOrder>, DomainError> {
        Ok(self.lock()?.iter().find(|o| o.order_id == id).cloned())
    }

    fn find_page(&self, page: PageRequest) -> Result<Page<ProcessedOrder>, DomainError> {
        let orders = self.lock()?;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content = orders
            .iter()
            .skip(offset)
            .take(page.page_size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, page, orders.len() as u64))
    }
}

/// `None` expiry means the entry never expires.
type CacheEntry = (String, Option<Instant>);

fn is_live(expires_at: &Option<Instant>, now: Instant) -> bool {
    expires_at.map_or(true, |at| now < at)
}

#[derive(Clone, Default)]
pub struct InMemoryOrderCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl InMemoryOrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(key)
            .filter(|(_, expires_at)| is_live(expires_at, Instant::now()))
            .map(|(value, _)| value.clone())
    }
}

impl OrderCache for InMemoryOrderCache {
    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError("in-memory cache poisoned".to_string()))?;
        let now = Instant::now();
        entries.retain(|_, (_, expires_at)| is_live(expires_at, now));
        entries.insert(key.to_string(), (value.to_string(), now.checked_add(ttl)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;
    use crate::domain::order::OrderStatus;

    fn processed(id: &str, total: i32) -> ProcessedOrder {
        let now = Utc::now();
        ProcessedOrder {
            order_id: id.to_string(),
            products: vec![],
            total: BigDecimal::from(total),
            status: OrderStatus::Processed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn store_keeps_first_record_for_an_id() {
        let store = InMemoryOrderStore::new();
        store.save(processed("order123", 20)).unwrap();

        let second = store.save(processed("order123", 99)).unwrap();

        assert_eq!(second.total, BigDecimal::from(20));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn store_pages_in_insertion_order() {
        let store = InMemoryOrderStore::new();
        for i in 0..5 {
            store.save(processed(&format!("order{}", i), i)).unwrap();
        }

        let page = store.find_page(PageRequest::new(1, 2).unwrap()).unwrap();
        let ids: Vec<_> = page.content.iter().map(|o| o.order_id.as_str()).collect();

        assert_eq!(ids, vec!["order2", "order3"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn store_page_past_the_end_is_empty() {
        let store = InMemoryOrderStore::new();
        store.save(processed("order1", 1)).unwrap();

        let page = store.find_page(PageRequest::new(4, 10).unwrap()).unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
    }

    #[test]
    fn cache_entry_is_visible_until_it_expires() {
        let cache = InMemoryOrderCache::new();
        cache
            .set_with_expiry("live", "processed", Duration::from_secs(60))
            .unwrap();
        cache.set_with_expiry("dead", "processed", Duration::ZERO).unwrap();

        assert!(cache.exists("live"));
        assert_eq!(cache.get("live").as_deref(), Some("processed"));
        assert!(!cache.exists("dead"));
        assert!(!cache.exists("never-set"));
    }

    #[test]
    fn unbounded_ttl_never_expires() {
        let cache = InMemoryOrderCache::new();

        cache
            .set_with_expiry("forever", "processed", Duration::MAX)
            .unwrap();

        assert!(cache.exists("forever"));
    }
}
