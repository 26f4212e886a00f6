//! Ranking for the "suggested connections" sidebar.
//!
//! The candidate set (everyone the viewer has no edge with, pending or
//! accepted, in either direction) is computed by the repository; this module
//! owns the ordering policy. The ranking is a product decision that has
//! changed before and will change again, so it sits behind a trait.

use crate::types::{DbId, Timestamp};

/// A connection candidate as seen by the ranker.
pub trait Candidate {
    fn candidate_id(&self) -> DbId;
    fn signed_up_at(&self) -> Timestamp;
}

/// Ordering policy for connection suggestions.
pub trait SuggestionRanker {
    /// Sort `candidates` in place, best suggestion first.
    fn rank<T: Candidate>(&self, candidates: &mut Vec<T>);
}

/// Default policy: most recent signup first, ties broken by higher id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentSignup;

impl SuggestionRanker for RecentSignup {
    fn rank<T: Candidate>(&self, candidates: &mut Vec<T>) {
        candidates.sort_by(|a, b| {
            b.signed_up_at()
                .cmp(&a.signed_up_at())
                .then_with(|| b.candidate_id().cmp(&a.candidate_id()))
        });
    }
}

/// Rank candidates and truncate to `limit`.
pub fn suggest<T: Candidate, R: SuggestionRanker>(
    mut candidates: Vec<T>,
    ranker: &R,
    limit: usize,
) -> Vec<T> {
    ranker.rank(&mut candidates);
    candidates.truncate(limit);
    candidates
}
