use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use configs::AppConfig;
use models::{JobId, PathId};

#[derive(Parser, Debug)]
#[command(name = "pluto-console")]
#[command(version)]
#[command(about = "Manage backup jobs and inspect peer nodes of a local node service")]
pub struct Cli {
    #[arg(long, global = true)]
    #[arg(help = "TOML config file (defaults to $CONFIG_PATH or config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    #[arg(help = "Base URL of the node web service, overrides the config file")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve a console path such as /backup_jobs/3 and show its view
    Open { path: String },
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// List peer nodes
    Nodes,
    /// Show setup and connection state of the node service
    Status,
    /// Complete first-run setup, restoring keys from a passphrase or generating new ones
    Setup {
        #[arg(long, help = "Recovery passphrase of existing keys")]
        mnemonic: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum JobsCommand {
    List,
    Show { id: JobId },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "folder")]
        folders: Vec<String>,
        #[arg(long = "ignore")]
        ignores: Vec<String>,
    },
    /// Rename a job, add paths, or drop existing paths by id
    Update {
        id: JobId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "folder")]
        folders: Vec<String>,
        #[arg(long = "ignore")]
        ignores: Vec<String>,
        #[arg(long = "remove-path")]
        remove_paths: Vec<PathId>,
    },
    Delete { id: JobId },
}

impl Cli {
    /// Config file first, then `PLUTO_API_URL`, then `--api-url`.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut cfg = match &self.config {
            Some(path) => configs::load_from_file(&path.to_string_lossy())?,
            None => configs::load_default()?,
        };
        cfg.normalize_and_validate().context("invalid configuration")?;
        if let Some(url) = &self.api_url {
            cfg.api.base_url = url.clone();
            cfg.api.normalize();
            cfg.api.validate()?;
        }
        Ok(cfg)
    }
}
