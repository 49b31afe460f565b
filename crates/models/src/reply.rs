//! Request bodies and the reply envelope of mutating endpoints.

use serde::{Deserialize, Serialize};

use crate::job::{Job, JobId, JobPath, PathId, PathType};

/// `{ success, job_id?, passphrase?, error? }`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub job_id: Option<JobId>,
    /// Recovery words of freshly generated keys, only sent by setup.
    #[serde(default)]
    pub passphrase: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of error responses: `{ error }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CreateJobBody<'a> {
    pub name: &'a str,
}

/// Body of `PUT /api/backup_jobs/{id}`: flat scalar fields only.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UpdateJobBody<'a> {
    pub name: &'a str,
    pub last_ran: Option<i64>,
}

impl<'a> From<&'a Job> for UpdateJobBody<'a> {
    fn from(job: &'a Job) -> Self {
        Self { name: &job.name, last_ran: job.last_ran.map(|t| t.timestamp()) }
    }
}

/// Body of `POST /api/setup`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SetupBody<'a> {
    pub mnemonic: Option<&'a str>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CreatePathBody<'a> {
    pub path: &'a str,
    pub path_type: PathType,
}

impl<'a> From<&'a JobPath> for CreatePathBody<'a> {
    fn from(p: &'a JobPath) -> Self {
        Self { path: &p.path, path_type: p.path_type }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UpdatePathBody<'a> {
    pub path_id: PathId,
    pub path: &'a str,
    pub path_type: PathType,
}
