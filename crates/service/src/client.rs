use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use configs::ApiConfig;
use models::job::JobList;
use models::reply::{ApiReply, CreateJobBody, CreatePathBody, ErrorBody, SetupBody, UpdateJobBody, UpdatePathBody};
use models::{Job, JobId, JobPath, Node, NodeStatus, PathId};

use crate::api::{JobApi, NodeApi, StatusApi};
use crate::errors::ApiError;

pub const JOBS_ENDPOINT: &str = "/api/backup_jobs";
pub const NODES_ENDPOINT: &str = "/api/nodes";
pub const STATUS_ENDPOINT: &str = "/api/status";
pub const SETUP_ENDPOINT: &str = "/api/setup";

const JSON: &str = "application/json";

/// REST client for the node web service. One request per call, no retries.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, None, None)
    }

    pub fn from_config(cfg: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_timeouts(cfg.base_url.clone(), Some(cfg.connect_timeout()), cfg.request_timeout())
    }

    fn with_timeouts(
        base_url: impl Into<String>,
        connect: Option<Duration>,
        request: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(t) = connect {
            builder = builder.connect_timeout(t);
        }
        if let Some(t) = request {
            builder = builder.timeout(t);
        }
        let http = builder.build().map_err(ApiError::network)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn job_url(&self, job_id: JobId) -> String {
        self.url(&format!("{JOBS_ENDPOINT}/{job_id}"))
    }

    fn paths_url(&self, job_id: JobId) -> String {
        self.url(&format!("{JOBS_ENDPOINT}/{job_id}/paths"))
    }

    fn path_url(&self, job_id: JobId, path_id: PathId) -> String {
        self.url(&format!("{JOBS_ENDPOINT}/{job_id}/paths/{path_id}"))
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, method = "GET", "api request");
        let resp = self.http.get(&url).header(ACCEPT, JSON).send().await.map_err(ApiError::network)?;
        if !resp.status().is_success() {
            return Err(http_error(resp).await);
        }
        resp.json::<T>().await.map_err(ApiError::parse)
    }

    /// Sends a mutating request and checks both the status and the
    /// `success` flag of the reply. `Content-Type` is set by `.json()`, so
    /// bodyless DELETEs carry `Accept` only.
    async fn mutate(&self, req: RequestBuilder) -> Result<ApiReply, ApiError> {
        let resp = req.header(ACCEPT, JSON).send().await.map_err(ApiError::network)?;
        debug!(url = %resp.url(), status = resp.status().as_u16(), "api response");
        if !resp.status().is_success() {
            return Err(http_error(resp).await);
        }
        let reply: ApiReply = resp.json().await.map_err(ApiError::parse)?;
        if !reply.success {
            warn!(error = ?reply.error, "service answered success=false");
            return Err(ApiError::Rejected);
        }
        Ok(reply)
    }
}

async fn http_error(resp: Response) -> ApiError {
    let status = resp.status();
    let body = resp.bytes().await.unwrap_or_default();
    let message = match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(ErrorBody { error: Some(msg) }) => msg,
        _ => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    warn!(status = status.as_u16(), %message, "api request failed");
    ApiError::Http { status: status.as_u16(), message }
}

#[async_trait]
impl JobApi for ApiClient {
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let list: JobList = self.fetch(JOBS_ENDPOINT).await?;
        Ok(list.jobs)
    }

    async fn create_job(&self, name: &str) -> Result<JobId, ApiError> {
        let req = self.http.post(self.url(JOBS_ENDPOINT)).json(&CreateJobBody { name });
        let reply = self.mutate(req).await?;
        reply.job_id.ok_or_else(|| ApiError::Parse("create reply is missing job_id".into()))
    }

    async fn update_job(&self, job: &Job) -> Result<(), ApiError> {
        let job_id = job.job_id.ok_or(ApiError::Unsaved)?;
        let req = self.http.put(self.job_url(job_id)).json(&UpdateJobBody::from(job));
        self.mutate(req).await.map(|_| ())
    }

    async fn delete_job(&self, job_id: JobId) -> Result<(), ApiError> {
        let req = self.http.delete(self.job_url(job_id));
        self.mutate(req).await.map(|_| ())
    }

    async fn create_path(&self, job_id: JobId, path: &JobPath) -> Result<(), ApiError> {
        let req = self.http.post(self.paths_url(job_id)).json(&CreatePathBody::from(path));
        self.mutate(req).await.map(|_| ())
    }

    async fn update_path(&self, job_id: JobId, path_id: PathId, path: &JobPath) -> Result<(), ApiError> {
        let body = UpdatePathBody { path_id, path: &path.path, path_type: path.path_type };
        let req = self.http.put(self.path_url(job_id, path_id)).json(&body);
        self.mutate(req).await.map(|_| ())
    }

    async fn delete_path(&self, job_id: JobId, path_id: PathId) -> Result<(), ApiError> {
        let req = self.http.delete(self.path_url(job_id, path_id));
        self.mutate(req).await.map(|_| ())
    }
}

#[async_trait]
impl NodeApi for ApiClient {
    async fn list_nodes(&self) -> Result<Vec<Node>, ApiError> {
        self.fetch(NODES_ENDPOINT).await
    }
}

#[async_trait]
impl StatusApi for ApiClient {
    async fn status(&self) -> Result<NodeStatus, ApiError> {
        self.fetch(STATUS_ENDPOINT).await
    }

    async fn setup(&self, mnemonic: Option<&str>) -> Result<Option<String>, ApiError> {
        let req = self.http.post(self.url(SETUP_ENDPOINT)).json(&SetupBody { mnemonic });
        let reply = self.mutate(req).await?;
        Ok(reply.passphrase)
    }
}
