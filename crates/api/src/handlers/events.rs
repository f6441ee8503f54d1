use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use catalog_domain::{ChangeEvent, DomainError};
use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{info, warn};

use crate::{errors::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/events", get(stream_events))
}

/// Comma separated filters, e.g. `?sku=A-1,B-2&kind=updated,deleted`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilterQuery {
    pub sku: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct EventFilter {
    skus: Vec<String>,
    kinds: Vec<String>,
}

impl EventFilter {
    fn from_query(query: &EventFilterQuery) -> Self {
        Self {
            skus: split_csv(query.sku.as_deref()),
            kinds: split_csv(query.kind.as_deref()),
        }
    }

    fn matches(&self, event: &ChangeEvent) -> bool {
        if !self.skus.is_empty() && !self.skus.iter().any(|s| s.as_str() == &*event.sku) {
            return false;
        }
        self.kinds.is_empty() || self.kinds.iter().any(|k| k == event.kind.to_str())
    }
}

fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Live change feed over SSE. Only available when events are published to
/// the in-process broadcast sink.
async fn stream_events(
    State(state): State<AppState>,
    Query(query): Query<EventFilterQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let sender = state.system.event_feed.clone().ok_or_else(|| {
        ApiError(DomainError::NotFound(format!(
            "Change feed is not served by the '{}' event sink",
            state.system.event_sink
        )))
    })?;

    let filter = EventFilter::from_query(&query);
    info!(skus = ?filter.skus, kinds = ?filter.kinds, "Change feed subscriber connected");

    let stream = BroadcastStream::new(sender.subscribe()).filter_map(move |result| {
        let filter = filter.clone();
        async move {
            match result {
                Ok(event) if filter.matches(&event) => Some(Ok(to_sse_event(&event))),
                Ok(_) => None,
                Err(BroadcastStreamRecvError::Lagged(n)) => {
                    warn!(skipped = n, "Change feed subscriber lagged");
                    Some(Ok(Event::default()
                        .event("error")
                        .data(format!("Lagged by {} events", n))))
                }
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

fn to_sse_event(event: &ChangeEvent) -> Event {
    let base = Event::default().event(event.kind.to_str());
    let base = match event.id {
        Some(id) => base.id(id.to_string()),
        None => base,
    };
    match serde_json::to_string(event) {
        Ok(json) => base.data(json),
        Err(e) => Event::default()
            .event("error")
            .data(format!("Failed to encode event: {}", e)),
    }
}
