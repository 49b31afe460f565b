//! Client-side state for the node web service.
//! - `client` talks REST through reqwest; `api` holds the traits stores depend on.
//! - `stores` cache the last successful fetch and run the CRUD actions.
//! - Refresh failures go to a `Notifier`; mutation failures are returned.

pub mod api;
pub mod client;
pub mod errors;
pub mod notify;
pub mod stores;

pub use client::ApiClient;
pub use errors::ApiError;
pub use notify::{LogNotifier, Notifier};
pub use stores::{JobStore, NodeStore, RefreshOutcome};
