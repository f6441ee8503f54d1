use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(ChangeKind::Created),
            "updated" => Some(ChangeKind::Updated),
            "deleted" => Some(ChangeKind::Deleted),
            _ => None,
        }
    }
}

/// A committed mutation of one product, as published downstream.
///
/// `id` is the outbox sequence number. It is `None` only before the event
/// has been staged. `product` carries the state after the change and is
/// absent for deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub id: Option<i64>,
    pub sku: Arc<str>,
    pub kind: ChangeKind,
    pub version: i64,
    pub occurred_at: DateTime<Utc>,
    pub product: Option<Product>,
}

impl ChangeEvent {
    pub fn for_product(kind: ChangeKind, product: &Product) -> Self {
        let snapshot = match kind {
            ChangeKind::Deleted => None,
            ChangeKind::Created | ChangeKind::Updated => Some(product.clone()),
        };
        Self {
            id: None,
            sku: Arc::clone(&product.sku),
            kind,
            version: product.version,
            occurred_at: product.updated_at,
            product: snapshot,
        }
    }

    /// Key used to partition events downstream; all events of one sku
    /// share it.
    pub fn partition_key(&self) -> &str {
        &self.sku
    }
}

/// An outbox row: a staged event plus its delivery bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxEntry {
    pub event: ChangeEvent,
    pub attempts: u32,
    pub next_attempt_at: DateTime<Utc>,
    pub last_error: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl OutboxEntry {
    pub fn id(&self) -> i64 {
        self.event.id.unwrap_or_default()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_none() && self.next_attempt_at <= now
    }
}
