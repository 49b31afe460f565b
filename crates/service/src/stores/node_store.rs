use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use models::Node;

use crate::api::NodeApi;
use crate::notify::Notifier;
use crate::stores::RefreshOutcome;

/// Read-only cache of the peer nodes known to the service.
pub struct NodeStore {
    api: Arc<dyn NodeApi>,
    notifier: Arc<dyn Notifier>,
    nodes: ArcSwap<Vec<Node>>,
}

impl NodeStore {
    pub fn new(api: Arc<dyn NodeApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier, nodes: ArcSwap::from_pointee(Vec::new()) }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        match self.api.list_nodes().await {
            Ok(nodes) => {
                let count = nodes.len();
                let mismatched = nodes.iter().filter(|n| !matches!(n.verify_pubkey_hash(), Ok(true))).count();
                if mismatched > 0 {
                    warn!(mismatched, "nodes with a pubkey hash that does not match their key");
                }
                self.nodes.store(Arc::new(nodes));
                info!(count, "nodes refreshed");
                RefreshOutcome::Synced { count }
            }
            Err(e) => {
                self.notifier.notify("Error loading nodes", &e);
                RefreshOutcome::Notified
            }
        }
    }

    pub fn nodes(&self) -> Arc<Vec<Node>> {
        self.nodes.load_full()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.load().len()
    }

    pub fn node_by_hash(&self, pubkey_hash: &str) -> Option<Node> {
        self.nodes.load().iter().find(|n| n.pubkey_hash.eq_ignore_ascii_case(pubkey_hash)).cloned()
    }

    pub fn pinned_nodes(&self) -> Vec<Node> {
        self.nodes.load().iter().filter(|n| n.pinned).cloned().collect()
    }
}
