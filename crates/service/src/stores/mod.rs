//! In-memory caches of the last successful fetch, one per REST resource.

pub mod job_store;
pub mod node_store;

pub use job_store::JobStore;
pub use node_store::NodeStore;

/// Result of a read action. Failures never reach the caller as errors:
/// they are handed to the store's `Notifier` and the cache is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cache was replaced by `count` freshly fetched records.
    Synced { count: usize },
    /// The fetch failed; the user was notified and the cache is unchanged.
    Notified,
}

impl RefreshOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced { .. })
    }
}
