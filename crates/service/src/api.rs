use async_trait::async_trait;
use models::{Job, JobId, JobPath, Node, NodeStatus, PathId};

use crate::errors::ApiError;

/// Backup job resource and its `paths` sub-resource.
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;
    /// Creates the job record from its scalar fields, returning the new id.
    async fn create_job(&self, name: &str) -> Result<JobId, ApiError>;
    async fn update_job(&self, job: &Job) -> Result<(), ApiError>;
    async fn delete_job(&self, job_id: JobId) -> Result<(), ApiError>;
    async fn create_path(&self, job_id: JobId, path: &JobPath) -> Result<(), ApiError>;
    async fn update_path(&self, job_id: JobId, path_id: PathId, path: &JobPath) -> Result<(), ApiError>;
    async fn delete_path(&self, job_id: JobId, path_id: PathId) -> Result<(), ApiError>;
}

/// Read-only node listing; nodes are managed out of band.
#[async_trait]
pub trait NodeApi: Send + Sync {
    async fn list_nodes(&self) -> Result<Vec<Node>, ApiError>;
}

/// Setup and connection state of the local node service.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn status(&self) -> Result<NodeStatus, ApiError>;
    /// First-run setup. Restores keys from `mnemonic`, or generates new ones
    /// and returns their recovery passphrase.
    async fn setup(&self, mnemonic: Option<&str>) -> Result<Option<String>, ApiError>;
}
