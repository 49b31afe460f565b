//! Fake node web service served by axum on an ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use models::{Job, JobId, JobPath, Node, NodeStatus, PathId, PathType};
use service::{ApiError, Notifier};

#[derive(Clone, Debug, Default)]
pub enum Behavior {
    #[default]
    Normal,
    /// Mutations answer 200 with `success: false`.
    Reject,
    /// Path mutations answer with this status and `{ error }` body.
    FailPaths(u16, String),
    /// Path mutations answer with this status and an empty body.
    FailPathsBare(u16),
    /// The job list answers 200 with a body that is not JSON.
    GarbageList,
}

#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub method: Method,
    pub uri: String,
    pub accept: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    pub jobs: Vec<Job>,
    pub nodes: Vec<Node>,
    pub status: NodeStatus,
    pub behavior: Behavior,
    pub seen: Vec<SeenRequest>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct TestApp {
    pub base_url: String,
    pub state: Shared,
}

impl TestApp {
    pub fn set_behavior(&self, behavior: Behavior) {
        self.state.lock().unwrap().behavior = behavior;
    }

    pub fn seed_jobs(&self, jobs: Vec<Job>) {
        self.state.lock().unwrap().jobs = jobs;
    }

    pub fn server_jobs(&self) -> Vec<Job> {
        self.state.lock().unwrap().jobs.clone()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.seen()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .map(|r| format!("{} {}", r.method, r.uri))
            .collect()
    }
}

pub async fn start_server(state: FakeState) -> anyhow::Result<TestApp> {
    let state: Shared = Arc::new(Mutex::new(state));
    let app = Router::new()
        .route("/api/backup_jobs", get(list_jobs).post(create_job))
        .route("/api/backup_jobs/:job_id", put(update_job).delete(delete_job))
        .route("/api/backup_jobs/:job_id/paths", axum::routing::post(create_path))
        .route("/api/backup_jobs/:job_id/paths/:path_id", put(update_path).delete(delete_path))
        .route("/api/nodes", get(list_nodes))
        .route("/api/status", get(status))
        .route("/api/setup", axum::routing::post(setup))
        .layer(axum::middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, state })
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

async fn record(
    State(state): State<Shared>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let header = |h: &HeaderMap, name: &str| h.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let seen = SeenRequest {
        method: req.method().clone(),
        uri: req.uri().path().to_string(),
        accept: header(req.headers(), "accept"),
        content_type: header(req.headers(), "content-type"),
    };
    state.lock().unwrap().seen.push(seen);
    next.run(req).await
}

fn ok() -> Response {
    Json(json!({ "success": true })).into_response()
}

fn rejected() -> Response {
    Json(json!({ "success": false, "error": "refused" })).into_response()
}

fn error(status: u16, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": message }))).into_response()
}

fn not_found(what: &str) -> Response {
    error(404, &format!("{what} not found"))
}

/// Early answer for path mutations under a failing behavior.
fn path_failure(behavior: &Behavior) -> Option<Response> {
    match behavior {
        Behavior::Reject => Some(rejected()),
        Behavior::FailPaths(status, message) => Some(error(*status, message)),
        Behavior::FailPathsBare(status) => {
            Some(StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR).into_response())
        }
        _ => None,
    }
}

async fn list_jobs(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if matches!(state.behavior, Behavior::GarbageList) {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }
    let jobs: Vec<Value> = state.jobs.iter().map(wire_job).collect();
    Json(json!({ "jobs": jobs })).into_response()
}

/// Entry shape of the list endpoint: `{ job: {...}, paths: [...] }`.
fn wire_job(job: &Job) -> Value {
    json!({
        "job": {
            "job_id": job.job_id,
            "name": job.name,
            "created": job.created.map(|t| t.timestamp()),
            "last_ran": job.last_ran.map(|t| t.timestamp()),
        },
        "paths": job.paths.iter().map(|p| json!({
            "path_id": p.path_id,
            "path": p.path,
            "path_type": p.path_type,
        })).collect::<Vec<_>>(),
    })
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

async fn create_job(State(state): State<Shared>, Json(body): Json<NameBody>) -> Response {
    let mut state = state.lock().unwrap();
    if matches!(state.behavior, Behavior::Reject) {
        return rejected();
    }
    let job_id = state.jobs.iter().filter_map(|j| j.job_id).max().unwrap_or(0) + 1;
    state.jobs.push(Job { job_id: Some(job_id), name: body.name, ..Job::default() });
    Json(json!({ "success": true, "job_id": job_id })).into_response()
}

#[derive(Deserialize)]
struct JobUpdateBody {
    name: String,
    #[serde(default)]
    last_ran: Option<i64>,
}

async fn update_job(
    State(state): State<Shared>,
    Path(job_id): Path<JobId>,
    Json(body): Json<JobUpdateBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    if matches!(state.behavior, Behavior::Reject) {
        return rejected();
    }
    match state.jobs.iter_mut().find(|j| j.job_id == Some(job_id)) {
        Some(stored) => {
            stored.name = body.name;
            stored.last_ran = body.last_ran.and_then(|t| chrono::DateTime::from_timestamp(t, 0));
            ok()
        }
        None => not_found("job"),
    }
}

async fn delete_job(State(state): State<Shared>, Path(job_id): Path<JobId>) -> Response {
    let mut state = state.lock().unwrap();
    if matches!(state.behavior, Behavior::Reject) {
        return rejected();
    }
    let before = state.jobs.len();
    state.jobs.retain(|j| j.job_id != Some(job_id));
    if state.jobs.len() == before { not_found("job") } else { ok() }
}

#[derive(Deserialize)]
struct PathBody {
    #[serde(default)]
    path_id: Option<PathId>,
    path: String,
    path_type: PathType,
}

async fn create_path(State(state): State<Shared>, Path(job_id): Path<JobId>, Json(body): Json<PathBody>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(resp) = path_failure(&state.behavior) {
        return resp;
    }
    let path_id = state.jobs.iter().flat_map(|j| j.path_ids()).max().unwrap_or(0) + 1;
    match state.jobs.iter_mut().find(|j| j.job_id == Some(job_id)) {
        Some(job) => {
            job.paths.push(JobPath { path_id: Some(path_id), path: body.path, path_type: body.path_type });
            ok()
        }
        None => not_found("job"),
    }
}

async fn update_path(
    State(state): State<Shared>,
    Path((job_id, path_id)): Path<(JobId, PathId)>,
    Json(body): Json<PathBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(resp) = path_failure(&state.behavior) {
        return resp;
    }
    if body.path_id != Some(path_id) {
        return error(400, "path_id mismatch");
    }
    let path = state
        .jobs
        .iter_mut()
        .find(|j| j.job_id == Some(job_id))
        .and_then(|j| j.paths.iter_mut().find(|p| p.path_id == Some(path_id)));
    match path {
        Some(p) => {
            p.path = body.path;
            p.path_type = body.path_type;
            ok()
        }
        None => not_found("path"),
    }
}

async fn delete_path(State(state): State<Shared>, Path((job_id, path_id)): Path<(JobId, PathId)>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(resp) = path_failure(&state.behavior) {
        return resp;
    }
    match state.jobs.iter_mut().find(|j| j.job_id == Some(job_id)) {
        Some(job) => {
            job.paths.retain(|p| p.path_id != Some(path_id));
            ok()
        }
        None => not_found("job"),
    }
}

async fn list_nodes(State(state): State<Shared>) -> Response {
    Json(state.lock().unwrap().nodes.clone()).into_response()
}

async fn status(State(state): State<Shared>) -> Response {
    Json(state.lock().unwrap().status).into_response()
}

#[derive(Deserialize)]
struct SetupRequest {
    #[serde(default)]
    mnemonic: Option<String>,
}

/// Words the fake accepts in a recovery passphrase.
pub const WORDS: [&str; 4] = ["wolf", "lunar", "grape", "anchor"];

async fn setup(State(state): State<Shared>, Json(body): Json<SetupRequest>) -> Response {
    let mut state = state.lock().unwrap();
    if state.status.setup_complete {
        return error(400, "Setup already completed");
    }
    let passphrase = match body.mnemonic {
        Some(words) => {
            if let Some(bad) = words.split_whitespace().find(|w| !WORDS.contains(w)) {
                return error(400, &format!("Invalid passphrase word: {bad}"));
            }
            None
        }
        None => Some(WORDS.join(" ")),
    };
    state.status.setup_complete = true;
    Json(json!({ "success": true, "passphrase": passphrase })).into_response()
}

/// Collects notifications as `"<context>: <error>"`.
#[derive(Default)]
pub struct CollectingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, context: &str, error: &ApiError) {
        self.messages.lock().unwrap().push(format!("{context}: {error}"));
    }
}
