use serde::{Deserialize, Serialize};

/// `GET /api/status` of the local node service.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeStatus {
    pub setup_complete: bool,
    #[serde(default)]
    pub connected: bool,
}
