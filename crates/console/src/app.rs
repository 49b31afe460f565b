use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{error, info};

use configs::AppConfig;
use models::{Job, JobId, JobPath};
use service::api::StatusApi;
use service::{ApiClient, ApiError, JobStore, NodeStore, Notifier};

use crate::cli::{Command, JobsCommand};
use crate::routes::{Route, Router};
use crate::views;

/// Prints refresh failures for the person at the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, context: &str, error: &ApiError) {
        error!(%error, "{context}");
        eprintln!("{context}: {error}");
    }
}

/// Owns the router and the stores every view reads from.
pub struct App {
    router: Router,
    jobs: Arc<JobStore>,
    nodes: Arc<NodeStore>,
    status: Arc<dyn StatusApi>,
}

impl App {
    pub fn new(router: Router, jobs: Arc<JobStore>, nodes: Arc<NodeStore>, status: Arc<dyn StatusApi>) -> Self {
        Self { router, jobs, nodes, status }
    }

    /// Wire one `ApiClient` into both stores.
    pub fn from_config(cfg: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let client = Arc::new(ApiClient::from_config(&cfg.api)?);
        info!(base_url = %client.base_url(), "using node service");
        let jobs = Arc::new(JobStore::new(client.clone(), notifier.clone()));
        let nodes = Arc::new(NodeStore::new(client.clone(), notifier));
        Ok(Self::new(Router::new(&cfg.ui.base_path), jobs, nodes, client))
    }

    pub fn jobs(&self) -> &Arc<JobStore> {
        &self.jobs
    }

    pub fn nodes(&self) -> &Arc<NodeStore> {
        &self.nodes
    }

    /// Resolve `path`, refresh whatever the view reads and render it.
    pub async fn open(&self, path: &str) -> Result<String> {
        let resolved = self.router.resolve(path)?;
        if let Some(from) = &resolved.redirected_from {
            info!(%from, to = %self.router.href(resolved.route), "redirect");
        }
        self.show(resolved.route).await
    }

    pub async fn show(&self, route: Route) -> Result<String> {
        match route {
            Route::BackupJobs => {
                self.jobs.refresh().await;
                Ok(views::job_list(&self.jobs.jobs(), &self.router))
            }
            Route::BackupJobEdit { id } => {
                self.jobs.refresh().await;
                Ok(self.render_job(id)?)
            }
            Route::BackupJobNew => Ok(views::job_new()),
            Route::Nodes => {
                self.nodes.refresh().await;
                Ok(views::node_list(&self.nodes.nodes()))
            }
        }
    }

    fn render_job(&self, id: JobId) -> Result<String> {
        self.detail(id).ok_or_else(|| anyhow!("no backup job with id {id}"))
    }

    fn detail(&self, id: JobId) -> Option<String> {
        let job = self.jobs.job_by_id(id)?;
        Some(views::job_detail(&job, &self.jobs.job_folders(id), &self.jobs.job_ignore_patterns(id)))
    }

    pub async fn run(&self, command: Command) -> Result<String> {
        match command {
            Command::Open { path } => self.open(&path).await,
            Command::Nodes => self.show(Route::Nodes).await,
            Command::Status => Ok(views::status(&self.status.status().await?)),
            Command::Setup { mnemonic } => {
                let passphrase = self.status.setup(mnemonic.as_deref()).await?;
                Ok(views::setup_done(passphrase.as_deref()))
            }
            Command::Jobs(cmd) => self.run_jobs(cmd).await,
        }
    }

    async fn run_jobs(&self, command: JobsCommand) -> Result<String> {
        match command {
            JobsCommand::List => self.show(Route::BackupJobs).await,
            JobsCommand::Show { id } => self.show(Route::BackupJobEdit { id }).await,
            JobsCommand::Create { name, folders, ignores } => {
                let mut job = Job::new(name);
                add_paths(&mut job, folders, ignores);
                let id = self.jobs.create(&job).await?;
                Ok(format!("Created backup job #{id}\n{}", self.detail(id).unwrap_or_default()))
            }
            JobsCommand::Update { id, name, folders, ignores, remove_paths } => {
                self.jobs.refresh().await;
                let mut job = self.jobs.job_by_id(id).ok_or_else(|| anyhow!("no backup job with id {id}"))?;
                if let Some(name) = name {
                    job.name = name;
                }
                job.paths.retain(|p| p.path_id.map_or(true, |pid| !remove_paths.contains(&pid)));
                add_paths(&mut job, folders, ignores);
                self.jobs.update(&job).await?;
                Ok(format!("Updated backup job #{id}\n{}", self.detail(id).unwrap_or_default()))
            }
            JobsCommand::Delete { id } => {
                self.jobs.delete(id).await?;
                Ok(format!("Deleted backup job #{id}\n"))
            }
        }
    }
}

fn add_paths(job: &mut Job, folders: Vec<String>, ignores: Vec<String>) {
    job.paths.extend(folders.into_iter().map(JobPath::folder));
    job.paths.extend(ignores.into_iter().map(JobPath::ignore_pattern));
}
