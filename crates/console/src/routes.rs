use models::JobId;
use thiserror::Error;

const JOBS: &str = "backup_jobs";
const NEW: &str = "new";
const NODES: &str = "nodes";

/// Views reachable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    BackupJobs,
    BackupJobEdit { id: JobId },
    BackupJobNew,
    Nodes,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::BackupJobs => "backup-jobs",
            Route::BackupJobEdit { .. } => "backup-job-edit",
            Route::BackupJobNew => "backup-job-new",
            Route::Nodes => "nodes",
        }
    }

    /// Path relative to the router's base.
    pub fn path(&self) -> String {
        match self {
            Route::BackupJobs => format!("/{JOBS}"),
            Route::BackupJobEdit { id } => format!("/{JOBS}/{id}"),
            Route::BackupJobNew => format!("/{JOBS}/{NEW}"),
            Route::Nodes => format!("/{NODES}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub route: Route,
    /// Set when the requested path was a redirect.
    pub redirected_from: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no view for path {0}")]
    NotFound(String),
}

/// Static path table: `/` redirects to the job list.
#[derive(Debug, Clone)]
pub struct Router {
    base_path: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    pub fn new(base_path: &str) -> Self {
        let inner = base_path.trim().trim_matches('/');
        let base_path = if inner.is_empty() { String::new() } else { format!("/{inner}") };
        Self { base_path }
    }

    pub fn href(&self, route: Route) -> String {
        format!("{}{}", self.base_path, route.path())
    }

    pub fn resolve(&self, path: &str) -> Result<Resolved, RouteError> {
        let not_found = || RouteError::NotFound(path.to_string());
        let bare = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let local = self.strip_base(bare).ok_or_else(not_found)?;
        let segments: Vec<&str> = local.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => {
                return Ok(Resolved { route: Route::BackupJobs, redirected_from: Some(bare.to_string()) });
            }
            [JOBS] => Route::BackupJobs,
            [JOBS, NEW] => Route::BackupJobNew,
            [JOBS, id] => Route::BackupJobEdit { id: id.parse().map_err(|_| not_found())? },
            [NODES] => Route::Nodes,
            _ => return Err(not_found()),
        };
        Ok(Resolved { route, redirected_from: None })
    }

    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base_path.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(&self.base_path)?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}
