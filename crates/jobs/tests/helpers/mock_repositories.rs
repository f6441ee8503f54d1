#![allow(dead_code)]

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use catalog_application::ports::{
    CacheLookup, CacheStats, Committed, EventPublisher, OutboxRepository, ProductCache,
    ProductRepository,
};
use catalog_domain::{
    ChangeEvent, ChangeKind, DomainError, NewProduct, OutboxEntry, Page, PageRequest, Product,
    ProductPatch, ProductSearch,
};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub fn make_entry(id: i64, sku: &str, version: i64) -> OutboxEntry {
    let product = NewProduct::new(sku, "Widget", BigDecimal::from(5), 1).into_product(version, Utc::now());
    let mut event = ChangeEvent::for_product(ChangeKind::Updated, &product);
    event.id = Some(id);
    OutboxEntry {
        event,
        attempts: 0,
        next_attempt_at: Utc::now(),
        last_error: None,
        published_at: None,
    }
}

#[derive(Default)]
pub struct MockOutboxRepository {
    entries: Mutex<Vec<OutboxEntry>>,
    due_key_calls: AtomicU64,
    purge_calls: AtomicU64,
    should_fail: AtomicBool,
}

impl MockOutboxRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<OutboxEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn due_key_calls(&self) -> u64 {
        self.due_key_calls.load(Ordering::SeqCst)
    }

    pub fn purge_calls(&self) -> u64 {
        self.purge_calls.load(Ordering::SeqCst)
    }

    pub fn entries(&self) -> Vec<OutboxEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock outbox failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OutboxRepository for MockOutboxRepository {
    async fn pending_for_key(
        &self,
        sku: &str,
        limit: u32,
    ) -> Result<Vec<OutboxEntry>, DomainError> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event.sku.as_ref() == sku && e.published_at.is_none())
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn due_keys(&self, now: DateTime<Utc>, limit: u32) -> Result<Vec<Arc<str>>, DomainError> {
        self.due_key_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut keys: Vec<Arc<str>> = Vec::new();
        for entry in self.entries.lock().unwrap().iter() {
            if entry.published_at.is_none()
                && entry.next_attempt_at <= now
                && !keys.contains(&entry.event.sku)
            {
                keys.push(Arc::clone(&entry.event.sku));
            }
        }
        keys.truncate(limit as usize);
        Ok(keys)
    }

    async fn mark_published(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(entry) = self
            .entries
            .lock()
            .unwrap()
            .iter_mut()
            .find(|e| e.id() == id)
        {
            entry.published_at = Some(at);
        }
        Ok(())
    }

    async fn record_failure(
        &self,
        id: i64,
        attempts: u32,
        next_attempt_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), DomainError> {
        if let Some(entry) = self
            .entries
            .lock()
            .unwrap()
            .iter_mut()
            .find(|e| e.id() == id)
        {
            entry.attempts = attempts;
            entry.next_attempt_at = next_attempt_at;
            entry.last_error = Some(error.to_string());
        }
        Ok(())
    }

    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.published_at.map_or(true, |at| at >= cutoff));
        Ok((before - entries.len()) as u64)
    }

    async fn pending_count(&self) -> Result<u64, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.published_at.is_none())
            .count() as u64)
    }
}

#[derive(Default)]
pub struct MockEventPublisher {
    published: Mutex<Vec<ChangeEvent>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        self.published.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Default)]
pub struct MockProductCache {
    purge_calls: AtomicU64,
}

impl MockProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn purge_calls(&self) -> u64 {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCache for MockProductCache {
    async fn lookup(&self, _sku: &str) -> Result<CacheLookup, DomainError> {
        Ok(CacheLookup::Miss)
    }

    async fn put(&self, _product: &Product) -> Result<bool, DomainError> {
        Ok(true)
    }

    async fn invalidate(&self, _sku: &str, _floor_version: i64) -> Result<(), DomainError> {
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        Ok(2)
    }

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

/// Store that holds nothing; jobs never read products.
pub struct EmptyProductRepository;

#[async_trait]
impl ProductRepository for EmptyProductRepository {
    async fn get(&self, _sku: &str) -> Result<Option<Product>, DomainError> {
        Ok(None)
    }

    async fn create(&self, product: NewProduct) -> Result<Committed, DomainError> {
        Err(DomainError::Unavailable(format!("read-only store: {}", product.sku)))
    }

    async fn update(
        &self,
        sku: &str,
        _patch: &ProductPatch,
        _expected_version: i64,
    ) -> Result<Committed, DomainError> {
        Err(DomainError::ProductNotFound(sku.to_string()))
    }

    async fn delete(&self, sku: &str, _expected_version: i64) -> Result<Committed, DomainError> {
        Err(DomainError::ProductNotFound(sku.to_string()))
    }

    async fn list_visible(&self, page: &PageRequest) -> Result<Page<Product>, DomainError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn search(
        &self,
        _criteria: &ProductSearch,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn list_by_category(
        &self,
        _category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn count_in_category(&self, _category_id: i64) -> Result<u64, DomainError> {
        Ok(0)
    }
}
