//! Feed composition: ordering and the viewer-filter extension hook.
//!
//! The home feed shows every post, newest first. Ordering must be
//! deterministic so the mutate-then-refetch pattern in the client never
//! reshuffles rows between refreshes: `created_at` descending, ties broken
//! by id descending.

use std::cmp::Ordering;

use crate::types::{DbId, Timestamp};

/// Anything that can appear in a feed: has an author and a creation time.
pub trait FeedItem {
    fn author_id(&self) -> DbId;
    fn created_at(&self) -> Timestamp;
    fn item_id(&self) -> DbId;
}

/// Deterministic feed ordering: newest first, ties broken by higher id first.
pub fn feed_order<T: FeedItem>(a: &T, b: &T) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| b.item_id().cmp(&a.item_id()))
}

/// Per-viewer post exclusion hook.
///
/// The current product shows every post to every viewer, so the default
/// filter keeps everything. Later policies (e.g. hiding blocked authors)
/// implement this trait without touching the query or handler.
pub trait FeedFilter {
    /// Return `false` to drop posts by this author from the viewer's feed.
    fn includes_author(&self, viewer_id: DbId, author_id: DbId) -> bool;
}

/// Default filter: no exclusions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowAll;

impl FeedFilter for ShowAll {
    fn includes_author(&self, _viewer_id: DbId, _author_id: DbId) -> bool {
        true
    }
}

/// Sort and filter a fetched post set into final feed order for `viewer_id`.
pub fn compose<T: FeedItem>(mut items: Vec<T>, viewer_id: DbId, filter: &dyn FeedFilter) -> Vec<T> {
    items.retain(|item| filter.includes_author(viewer_id, item.author_id()));
    items.sort_by(feed_order);
    items
}
