#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use catalog_application::ports::{
    CacheLookup, CacheStats, CategoryRepository, Committed, EventPublisher, InventoryProvider,
    OutboxRepository, ProductCache, ProductRepository,
};
use catalog_application::services::{
    BoundaryTimeouts, CacheLayer, ChangePropagator, EventDispatcher, InventoryEnricher,
    RetryPolicy,
};
use catalog_application::use_cases::{
    CreateProductUseCase, DeactivateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, UpdateProductUseCase,
};
use catalog_domain::{
    Category, ChangeEvent, ChangeKind, DomainError, NewProduct, OutboxEntry, Page, PageRequest,
    Product, ProductPatch, ProductSearch,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── In-memory product store with outbox ──────────────────────────────────────

#[derive(Default)]
struct StoreState {
    products: HashMap<String, (Product, bool)>,
    outbox: Vec<OutboxEntry>,
    next_event_id: i64,
}

/// Product store and outbox sharing one lock, so a mutation and its event
/// are staged atomically like the SQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<Mutex<StoreState>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
    write_delay_ms: Arc<AtomicU64>,
    read_delay_ms: Arc<AtomicU64>,
    get_calls: Arc<AtomicU32>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_write_delay(&self, delay: Duration) {
        self.write_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_read_delay(&self, delay: Duration) {
        self.read_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, sku: &str) -> Option<(Product, bool)> {
        self.state.lock().unwrap().products.get(sku).cloned()
    }

    pub fn outbox_entries(&self) -> Vec<OutboxEntry> {
        self.state.lock().unwrap().outbox.clone()
    }

    pub fn unpublished(&self) -> Vec<OutboxEntry> {
        self.outbox_entries()
            .into_iter()
            .filter(|e| e.published_at.is_none())
            .collect()
    }

    /// Makes every pending entry due immediately.
    pub fn expire_backoff(&self) {
        let now = Utc::now();
        for entry in self.state.lock().unwrap().outbox.iter_mut() {
            entry.next_attempt_at = now;
        }
    }

    async fn write_delay(&self) {
        let ms = self.write_delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    async fn read_delay(&self) {
        let ms = self.read_delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn check_writes(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock write failure".to_string()));
        }
        Ok(())
    }

    fn stage(state: &mut StoreState, kind: ChangeKind, product: &Product) -> ChangeEvent {
        state.next_event_id += 1;
        let mut event = ChangeEvent::for_product(kind, product);
        event.id = Some(state.next_event_id);
        state.outbox.push(OutboxEntry {
            event: event.clone(),
            attempts: 0,
            next_attempt_at: event.occurred_at,
            last_error: None,
            published_at: None,
        });
        event
    }

    fn page_of(mut items: Vec<Product>, page: &PageRequest) -> Page<Product> {
        items.sort_by(|a, b| a.sku.cmp(&b.sku));
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Page::new(items, page, total)
    }

    fn live(&self) -> Vec<Product> {
        self.state
            .lock()
            .unwrap()
            .products
            .values()
            .filter(|(_, deleted)| !deleted)
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogStore {
    async fn get(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.read_delay().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock read failure".to_string()));
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .get(sku)
            .filter(|(_, deleted)| !deleted)
            .map(|(p, _)| p.clone()))
    }

    async fn create(&self, product: NewProduct) -> Result<Committed, DomainError> {
        self.write_delay().await;
        self.check_writes()?;
        let mut state = self.state.lock().unwrap();
        let version = match state.products.get(&product.sku) {
            Some((_, false)) => return Err(DomainError::AlreadyExists(product.sku.clone())),
            Some((tombstone, true)) => tombstone.version + 1,
            None => 1,
        };
        let sku = product.sku.clone();
        let created = product.into_product(version, Utc::now());
        let event = Self::stage(&mut state, ChangeKind::Created, &created);
        state.products.insert(sku, (created.clone(), false));
        Ok(Committed {
            product: created,
            event,
        })
    }

    async fn update(
        &self,
        sku: &str,
        patch: &ProductPatch,
        expected_version: i64,
    ) -> Result<Committed, DomainError> {
        self.write_delay().await;
        self.check_writes()?;
        let mut state = self.state.lock().unwrap();
        let mut product = match state.products.get(sku) {
            Some((p, false)) => p.clone(),
            _ => return Err(DomainError::ProductNotFound(sku.to_string())),
        };
        if product.version != expected_version {
            return Err(DomainError::VersionConflict {
                key: sku.to_string(),
                expected: expected_version,
                current: Some(product.version),
            });
        }
        patch.apply(&mut product, Utc::now());
        let event = Self::stage(&mut state, ChangeKind::Updated, &product);
        state
            .products
            .insert(sku.to_string(), (product.clone(), false));
        Ok(Committed { product, event })
    }

    async fn delete(&self, sku: &str, expected_version: i64) -> Result<Committed, DomainError> {
        self.write_delay().await;
        self.check_writes()?;
        let mut state = self.state.lock().unwrap();
        let mut product = match state.products.get(sku) {
            Some((p, false)) => p.clone(),
            _ => return Err(DomainError::ProductNotFound(sku.to_string())),
        };
        if product.version != expected_version {
            return Err(DomainError::VersionConflict {
                key: sku.to_string(),
                expected: expected_version,
                current: Some(product.version),
            });
        }
        product.version += 1;
        product.updated_at = Utc::now();
        let event = Self::stage(&mut state, ChangeKind::Deleted, &product);
        state
            .products
            .insert(sku.to_string(), (product.clone(), true));
        Ok(Committed { product, event })
    }

    async fn list_visible(&self, page: &PageRequest) -> Result<Page<Product>, DomainError> {
        let items = self
            .live()
            .into_iter()
            .filter(|p| p.is_active && p.is_visible)
            .collect();
        Ok(Self::page_of(items, page))
    }

    async fn search(
        &self,
        criteria: &ProductSearch,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let items = self
            .live()
            .into_iter()
            .filter(|p| {
                criteria.name.as_ref().map_or(true, |n| {
                    p.name.to_lowercase().contains(&n.to_lowercase())
                }) && criteria
                    .category_id
                    .map_or(true, |c| p.category_id == Some(c))
                    && criteria.min_price.as_ref().map_or(true, |m| &p.price >= m)
                    && criteria.max_price.as_ref().map_or(true, |m| &p.price <= m)
                    && criteria.is_active.map_or(true, |a| p.is_active == a)
                    && criteria.is_visible.map_or(true, |v| p.is_visible == v)
            })
            .collect();
        Ok(Self::page_of(items, page))
    }

    async fn list_by_category(
        &self,
        category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let items = self
            .live()
            .into_iter()
            .filter(|p| p.category_id == Some(category_id))
            .collect();
        Ok(Self::page_of(items, page))
    }

    async fn count_in_category(&self, category_id: i64) -> Result<u64, DomainError> {
        Ok(self
            .live()
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .count() as u64)
    }
}

#[async_trait]
impl OutboxRepository for InMemoryCatalogStore {
    async fn pending_for_key(
        &self,
        sku: &str,
        limit: u32,
    ) -> Result<Vec<OutboxEntry>, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .outbox
            .iter()
            .filter(|e| e.published_at.is_none() && e.event.sku.as_ref() == sku)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn due_keys(
        &self,
        now: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Arc<str>>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut seen: Vec<Arc<str>> = Vec::new();
        let mut keys = Vec::new();
        for entry in state.outbox.iter().filter(|e| e.published_at.is_none()) {
            if seen.iter().any(|s| *s == entry.event.sku) {
                continue;
            }
            seen.push(Arc::clone(&entry.event.sku));
            if entry.next_attempt_at <= now {
                keys.push(Arc::clone(&entry.event.sku));
            }
        }
        keys.truncate(limit as usize);
        Ok(keys)
    }

    async fn mark_published(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.outbox.iter_mut().find(|e| e.id() == id) {
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
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.outbox.iter_mut().find(|e| e.id() == id) {
            entry.attempts = attempts;
            entry.next_attempt_at = next_attempt_at;
            entry.last_error = Some(error.to_string());
        }
        Ok(())
    }

    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut state = self.state.lock().unwrap();
        let before = state.outbox.len();
        state
            .outbox
            .retain(|e| e.published_at.map_or(true, |at| at >= cutoff));
        Ok((before - state.outbox.len()) as u64)
    }

    async fn pending_count(&self) -> Result<u64, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .outbox
            .iter()
            .filter(|e| e.published_at.is_none())
            .count() as u64)
    }
}

// ── Categories ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCategoryRepository {
    categories: Arc<Mutex<Vec<Category>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, name: &str, parent_id: Option<i64>) -> Category {
        let category = Category::new(Arc::from(name), None, None, parent_id, None);
        self.create(category).await.unwrap()
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn create(&self, mut category: Category) -> Result<Category, DomainError> {
        let mut categories = self.categories.lock().unwrap();
        if categories
            .iter()
            .any(|c| c.name == category.name || c.slug == category.slug)
        {
            return Err(DomainError::AlreadyExists(format!(
                "Category '{}'",
                category.name
            )));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        category.id = Some(*next_id);
        category.created_at = Some(Utc::now());
        category.updated_at = category.created_at;
        categories.push(category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == Some(id))
            .cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug.as_ref() == slug)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_active(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect())
    }

    async fn get_roots(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_active && c.parent_id.is_none())
            .cloned()
            .collect())
    }

    async fn update(&self, category: Category) -> Result<Category, DomainError> {
        let mut categories = self.categories.lock().unwrap();
        let id = category.id;
        if categories
            .iter()
            .any(|c| c.id != id && (c.name == category.name || c.slug == category.slug))
        {
            return Err(DomainError::AlreadyExists(format!(
                "Category '{}'",
                category.name
            )));
        }
        let slot = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::CategoryNotFound(id.unwrap_or_default()))?;
        *slot = category.clone();
        Ok(category)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != Some(id));
        if categories.len() == before {
            return Err(DomainError::CategoryNotFound(id));
        }
        Ok(())
    }

    async fn count_children(&self, id: i64) -> Result<u64, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.parent_id == Some(id))
            .count() as u64)
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
enum MockSlot {
    Snapshot(Product),
    Fence(i64),
}

/// Version-guarded map without capacity or TTL.
#[derive(Clone, Default)]
pub struct MockProductCache {
    slots: Arc<Mutex<HashMap<String, MockSlot>>>,
    failing: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
    invalidations: Arc<AtomicU64>,
}

impl MockProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn cached_version(&self, sku: &str) -> Option<i64> {
        match self.slots.lock().unwrap().get(sku) {
            Some(MockSlot::Snapshot(p)) => Some(p.version),
            _ => None,
        }
    }

    pub fn fence(&self, sku: &str) -> Option<i64> {
        match self.slots.lock().unwrap().get(sku) {
            Some(MockSlot::Fence(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }

    async fn gate(&self) -> Result<(), DomainError> {
        let ms = self.delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Unavailable("mock cache down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductCache for MockProductCache {
    async fn lookup(&self, sku: &str) -> Result<CacheLookup, DomainError> {
        self.gate().await?;
        Ok(match self.slots.lock().unwrap().get(sku) {
            Some(MockSlot::Snapshot(p)) => CacheLookup::Hit(p.clone()),
            _ => CacheLookup::Miss,
        })
    }

    async fn put(&self, product: &Product) -> Result<bool, DomainError> {
        self.gate().await?;
        let mut slots = self.slots.lock().unwrap();
        let floor = match slots.get(product.sku.as_ref()) {
            Some(MockSlot::Snapshot(p)) => p.version,
            Some(MockSlot::Fence(v)) => *v,
            None => 0,
        };
        if product.version < floor {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Ok(false);
        }
        slots.insert(product.sku.to_string(), MockSlot::Snapshot(product.clone()));
        Ok(true)
    }

    async fn invalidate(&self, sku: &str, floor_version: i64) -> Result<(), DomainError> {
        self.gate().await?;
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        let mut slots = self.slots.lock().unwrap();
        let current = match slots.get(sku) {
            Some(MockSlot::Snapshot(p)) => p.version,
            Some(MockSlot::Fence(v)) => *v,
            None => 0,
        };
        slots.insert(sku.to_string(), MockSlot::Fence(current.max(floor_version)));
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        Ok(0)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.slots.lock().unwrap().len(),
            rejected_puts: self.rejected.load(Ordering::SeqCst),
            invalidations: self.invalidations.load(Ordering::SeqCst),
            ..CacheStats::default()
        }
    }
}

// ── Publisher ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockEventPublisher {
    published: Arc<Mutex<Vec<ChangeEvent>>>,
    failing: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
    attempts: Arc<AtomicU32>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<ChangeEvent> {
        self.published.lock().unwrap().clone()
    }

    pub fn published_versions(&self, sku: &str) -> Vec<i64> {
        self.published()
            .iter()
            .filter(|e| e.sku.as_ref() == sku)
            .map(|e| e.version)
            .collect()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let ms = self.delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Unavailable("mock broker down".to_string()));
        }
        self.published.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ── Inventory ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockInventoryProvider {
    levels: Arc<Mutex<HashMap<i64, i64>>>,
    failing: Arc<AtomicBool>,
}

impl MockInventoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&self, inventory_id: i64, quantity: i64) {
        self.levels.lock().unwrap().insert(inventory_id, quantity);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl InventoryProvider for MockInventoryProvider {
    async fn available_quantity(&self, inventory_id: i64) -> Result<Option<i64>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Unavailable("inventory down".to_string()));
        }
        Ok(self.levels.lock().unwrap().get(&inventory_id).copied())
    }
}

// ── Wiring ───────────────────────────────────────────────────────────────────

pub fn new_product(sku: &str, price: i64, quantity: i64) -> NewProduct {
    NewProduct::new(sku, format!("Product {}", sku), BigDecimal::from(price), quantity)
}

pub fn test_timeouts() -> BoundaryTimeouts {
    BoundaryTimeouts {
        store: Duration::from_millis(500),
        cache: Duration::from_millis(50),
        publish: Duration::from_millis(100),
        inventory: Duration::from_millis(100),
    }
}

/// The full product write/read stack over in-memory adapters.
pub struct Harness {
    pub store: Arc<InMemoryCatalogStore>,
    pub categories: Arc<MockCategoryRepository>,
    pub cache: Arc<MockProductCache>,
    pub publisher: Arc<MockEventPublisher>,
    pub inventory: Arc<MockInventoryProvider>,
    pub cache_layer: Arc<CacheLayer>,
    pub dispatcher: Arc<EventDispatcher>,
    pub get: GetProductUseCase,
    pub create: CreateProductUseCase,
    pub update: Arc<UpdateProductUseCase>,
    pub delete: DeleteProductUseCase,
    pub deactivate: DeactivateProductUseCase,
    pub list: ListProductsUseCase,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_timeouts(test_timeouts())
    }

    pub fn with_timeouts(timeouts: BoundaryTimeouts) -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());
        let categories = Arc::new(MockCategoryRepository::new());
        let cache = Arc::new(MockProductCache::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let inventory = Arc::new(MockInventoryProvider::new());

        let product_repo: Arc<dyn ProductRepository> = store.clone();
        let outbox_repo: Arc<dyn OutboxRepository> = store.clone();
        let category_repo: Arc<dyn CategoryRepository> = categories.clone();

        let cache_layer = Arc::new(CacheLayer::new(
            Some(cache.clone() as Arc<dyn ProductCache>),
            product_repo.clone(),
            timeouts.cache,
            timeouts.store,
        ));
        let dispatcher = Arc::new(EventDispatcher::new(
            outbox_repo,
            publisher.clone(),
            RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(10)),
            timeouts.publish,
            100,
        ));
        let propagator = Arc::new(ChangePropagator::new(
            cache_layer.clone(),
            dispatcher.clone(),
        ));
        let enricher = Arc::new(InventoryEnricher::new(
            Some(inventory.clone() as Arc<dyn InventoryProvider>),
            timeouts.inventory,
        ));

        let update = Arc::new(UpdateProductUseCase::new(
            product_repo.clone(),
            category_repo.clone(),
            cache_layer.clone(),
            propagator.clone(),
            timeouts.store,
        ));

        Self {
            get: GetProductUseCase::new(cache_layer.clone(), enricher.clone()),
            create: CreateProductUseCase::new(
                product_repo.clone(),
                category_repo.clone(),
                cache_layer.clone(),
                propagator.clone(),
                timeouts.store,
            ),
            delete: DeleteProductUseCase::new(
                product_repo.clone(),
                cache_layer.clone(),
                propagator,
                timeouts.store,
            ),
            deactivate: DeactivateProductUseCase::new(update.clone()),
            list: ListProductsUseCase::new(product_repo, category_repo, enricher, timeouts.store),
            update,
            store,
            categories,
            cache,
            publisher,
            inventory,
            cache_layer,
            dispatcher,
        }
    }
}
