//! Per-locale item collection.

use super::{FeedChannel, FeedItem};
use crate::config::LocaleOptions;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;

/// Ordered, guid-deduplicated collection of at most `count` items.
///
/// One store exists per locale and build; it is owned by that locale's
/// task and dropped once its documents are rendered.
#[derive(Debug)]
pub struct FeedStore {
    channel: FeedChannel,
    items: Vec<FeedItem>,
    guids: FxHashSet<String>,
    count: usize,
}

impl FeedStore {
    pub fn new(channel: FeedChannel, count: usize) -> Self {
        Self {
            channel,
            items: Vec::with_capacity(count.min(256)),
            guids: FxHashSet::default(),
            count,
        }
    }

    /// Empty store for a locale, capped at the locale's `count`.
    pub fn for_locale(options: &LocaleOptions, build_time: DateTime<Utc>) -> Self {
        Self::new(FeedChannel::new(options, build_time), options.count)
    }

    /// Append an item. Returns `false` without changing anything when the
    /// guid was already added or the store is full.
    pub fn add(&mut self, item: FeedItem) -> bool {
        if self.is_full() || self.guids.contains(&item.guid) {
            return false;
        }
        self.guids.insert(item.guid.clone());
        self.items.push(item);
        true
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.count
    }

    pub fn channel(&self) -> &FeedChannel {
        &self.channel
    }
}
