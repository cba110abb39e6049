// @zen-component: PRD-ProductContextCache
//
//! Single-slot, TTL-based cache of the normalized product catalog.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::ProductSource;
use super::normalize::products_text;
use crate::clock::Clock;

/// The cached catalog text and when it was fetched.
#[derive(Debug, Clone)]
pub struct CachedProductText {
    /// Empty, or newline-joined product lines.
    pub text: String,
    /// `None` until the first successful refresh.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Process-wide product context.
///
/// Serves cached text while it is fresh and refreshes from the
/// [`ProductSource`] otherwise. A failed refresh returns the last known good
/// text (possibly empty) and leaves `fetched_at` untouched, so callers never
/// see an error.
///
/// Consistency is relaxed: the slot lock is only held to read or replace the
/// entry, never across the fetch. Concurrent refreshes may therefore both hit
/// the source and both write; the last write wins. Every entry is a snapshot
/// of the same upstream catalog. `fetched_at` is stamped under the write lock
/// and never moves backwards.
pub struct ProductContextCache {
    source: Arc<dyn ProductSource>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    slot: RwLock<CachedProductText>,
}

impl ProductContextCache {
    pub fn new(source: Arc<dyn ProductSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            slot: RwLock::new(CachedProductText {
                text: String::new(),
                fetched_at: None,
            }),
        }
    }

    /// Current product text for the prompt. Never fails.
    pub async fn products_context(&self) -> String {
        let now = self.clock.now();
        {
            let entry = self.slot.read().await;
            if let Some(text) = fresh_text(&entry, now, self.ttl) {
                debug!("product cache hit");
                return text;
            }
        }

        match self.source.fetch_products().await {
            Ok(products) => {
                let text = products_text(&products);
                let mut entry = self.slot.write().await;
                let now = self.clock.now();
                entry.text = text.clone();
                entry.fetched_at = Some(entry.fetched_at.map_or(now, |prev| prev.max(now)));
                info!(lines = text.lines().count(), "product cache refreshed");
                text
            }
            Err(e) => {
                let entry = self.slot.read().await;
                warn!(error = %e, stale_lines = entry.text.lines().count(), "product fetch failed, serving cached text");
                entry.text.clone()
            }
        }
    }

    /// Copy of the current entry.
    pub async fn snapshot(&self) -> CachedProductText {
        self.slot.read().await.clone()
    }
}

fn fresh_text(entry: &CachedProductText, now: DateTime<Utc>, ttl: chrono::Duration) -> Option<String> {
    let fetched_at = entry.fetched_at?;
    if entry.text.is_empty() || now - fetched_at >= ttl {
        return None;
    }
    Some(entry.text.clone())
}
