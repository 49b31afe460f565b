use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use models::{Job, JobId, JobPath, PathId, PathType};

use crate::api::JobApi;
use crate::errors::ApiError;
use crate::notify::Notifier;
use crate::stores::RefreshOutcome;

/// Cached backup jobs plus the actions that sync them with the service.
///
/// The cache only ever holds what the last successful `refresh` returned.
/// Mutations go to the server first and are followed by a full refetch;
/// nothing is patched locally.
pub struct JobStore {
    api: Arc<dyn JobApi>,
    notifier: Arc<dyn Notifier>,
    jobs: ArcSwap<Vec<Job>>,
}

impl JobStore {
    pub fn new(api: Arc<dyn JobApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier, jobs: ArcSwap::from_pointee(Vec::new()) }
    }

    /// Replace the cache with the server's job list.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.api.list_jobs().await {
            Ok(jobs) => {
                let count = jobs.len();
                self.jobs.store(Arc::new(jobs));
                info!(count, "backup jobs refreshed");
                RefreshOutcome::Synced { count }
            }
            Err(e) => {
                self.notifier.notify("Error loading backup jobs", &e);
                RefreshOutcome::Notified
            }
        }
    }

    /// Create the job record, then each of its paths, then refresh.
    ///
    /// Stops at the first failing request. Records created before it stay
    /// on the server.
    pub async fn create(&self, job: &Job) -> Result<JobId, ApiError> {
        let job_id = self.api.create_job(&job.name).await?;
        info!(job_id, name = %job.name, "backup job created");

        for path in &job.paths {
            self.api.create_path(job_id, path).await.map_err(|e| {
                warn!(job_id, path = %path.path, error = %e, "path create failed, job left partially created");
                e
            })?;
        }

        self.refresh().await;
        Ok(job_id)
    }

    /// Update scalar fields, upsert the supplied paths, delete the paths that
    /// were cached for this job but are no longer supplied, then refresh.
    pub async fn update(&self, job: &Job) -> Result<(), ApiError> {
        let job_id = job.job_id.ok_or(ApiError::Unsaved)?;
        let known: Vec<PathId> = self
            .jobs
            .load()
            .iter()
            .find(|j| j.job_id == Some(job_id))
            .map(|j| j.path_ids().collect())
            .unwrap_or_default();

        self.api.update_job(job).await?;

        for path in &job.paths {
            match path.path_id {
                Some(path_id) => self.api.update_path(job_id, path_id, path).await?,
                None => self.api.create_path(job_id, path).await?,
            }
        }

        let kept: HashSet<PathId> = job.path_ids().collect();
        let removed: Vec<PathId> = known.into_iter().filter(|id| !kept.contains(id)).collect();
        for path_id in &removed {
            self.api.delete_path(job_id, *path_id).await?;
        }

        info!(job_id, upserted = job.paths.len(), removed = removed.len(), "backup job updated");
        self.refresh().await;
        Ok(())
    }

    pub async fn delete(&self, job_id: JobId) -> Result<(), ApiError> {
        self.api.delete_job(job_id).await?;
        info!(job_id, "backup job deleted");
        self.refresh().await;
        Ok(())
    }

    /// Snapshot of the whole cache.
    pub fn jobs(&self) -> Arc<Vec<Job>> {
        self.jobs.load_full()
    }

    pub fn job_by_id(&self, job_id: JobId) -> Option<Job> {
        self.jobs.load().iter().find(|j| j.job_id == Some(job_id)).cloned()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.load().len()
    }

    pub fn job_folders(&self, job_id: JobId) -> Vec<JobPath> {
        self.paths_of(job_id, PathType::Folder)
    }

    pub fn job_ignore_patterns(&self, job_id: JobId) -> Vec<JobPath> {
        self.paths_of(job_id, PathType::IgnorePattern)
    }

    fn paths_of(&self, job_id: JobId, path_type: PathType) -> Vec<JobPath> {
        self.jobs
            .load()
            .iter()
            .find(|j| j.job_id == Some(job_id))
            .map(|j| j.paths_of(path_type).cloned().collect())
            .unwrap_or_default()
    }
}
