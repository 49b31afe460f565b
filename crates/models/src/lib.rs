//! Wire types exchanged with the node web service.
//! - Jobs and their path entries, nodes, node status.
//! - Reply envelopes shared by every mutating endpoint.

pub mod errors;
pub mod job;
pub mod node;
pub mod reply;
pub mod status;

pub use job::{Job, JobId, JobPath, PathId, PathType};
pub use node::Node;
pub use status::NodeStatus;
