use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type JobId = i32;
pub type PathId = i32;

/// Whether a path entry is included in the backup or excludes files from it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PathType {
    Folder,
    IgnorePattern,
}

/// One include or exclude rule of a backup job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobPath {
    /// `None` until the server assigns one.
    #[serde(default)]
    pub path_id: Option<PathId>,
    pub path: String,
    pub path_type: PathType,
}

impl JobPath {
    pub fn folder(path: impl Into<String>) -> Self {
        Self { path_id: None, path: path.into(), path_type: PathType::Folder }
    }

    pub fn ignore_pattern(path: impl Into<String>) -> Self {
        Self { path_id: None, path: path.into(), path_type: PathType::IgnorePattern }
    }

    pub fn with_id(mut self, path_id: PathId) -> Self {
        self.path_id = Some(path_id);
        self
    }
}

/// A backup job with its paths. On the wire each entry of
/// `GET /api/backup_jobs` is nested as `{ job: {...}, paths: [...] }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "JobItem", into = "JobItem")]
pub struct Job {
    pub job_id: Option<JobId>,
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub last_ran: Option<DateTime<Utc>>,
    pub paths: Vec<JobPath>,
}

/// Scalar fields of a job as the service stores them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRecord {
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub name: String,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub last_ran: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobItem {
    pub job: JobRecord,
    #[serde(default)]
    pub paths: Vec<JobPath>,
}

impl From<JobItem> for Job {
    fn from(JobItem { job, paths }: JobItem) -> Self {
        Self { job_id: job.job_id, name: job.name, created: job.created, last_ran: job.last_ran, paths }
    }
}

impl From<Job> for JobItem {
    fn from(j: Job) -> Self {
        let job = JobRecord { job_id: j.job_id, name: j.name, created: j.created, last_ran: j.last_ran };
        Self { job, paths: j.paths }
    }
}

impl Job {
    /// An unsaved job with no paths.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_path(mut self, path: JobPath) -> Self {
        self.paths.push(path);
        self
    }

    pub fn paths_of(&self, path_type: PathType) -> impl Iterator<Item = &JobPath> {
        self.paths.iter().filter(move |p| p.path_type == path_type)
    }

    pub fn folders(&self) -> Vec<JobPath> {
        self.paths_of(PathType::Folder).cloned().collect()
    }

    pub fn ignore_patterns(&self) -> Vec<JobPath> {
        self.paths_of(PathType::IgnorePattern).cloned().collect()
    }

    /// Identifiers of paths the server already knows about.
    pub fn path_ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.paths.iter().filter_map(|p| p.path_id)
    }
}

/// `{ jobs: [...] }` envelope of the list endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
}
