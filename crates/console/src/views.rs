//! Plain-text renderings of store snapshots.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use models::{Job, JobPath, Node, NodeStatus};

use crate::routes::{Route, Router};

fn when(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "never".into())
}

pub fn job_list(jobs: &[Job], router: &Router) -> String {
    let mut out = format!("Backup jobs ({})\n", jobs.len());
    if jobs.is_empty() {
        let _ = writeln!(out, "  none yet, create one at {}", router.href(Route::BackupJobNew));
        return out;
    }
    for job in jobs {
        let id = job.job_id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        let folders = job.paths_of(models::PathType::Folder).count();
        let ignores = job.paths_of(models::PathType::IgnorePattern).count();
        let href = job.job_id.map(|id| router.href(Route::BackupJobEdit { id })).unwrap_or_default();
        let _ = writeln!(
            out,
            "  #{id:<4} {:<24} last ran {:<16} {folders} folder(s), {ignores} ignore pattern(s)  {href}",
            job.name,
            when(job.last_ran),
        );
    }
    out
}

pub fn job_detail(job: &Job, folders: &[JobPath], ignores: &[JobPath]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", job.name);
    let _ = writeln!(out, "  created   {}", when(job.created));
    let _ = writeln!(out, "  last ran  {}", when(job.last_ran));
    section(&mut out, "Folders", folders);
    section(&mut out, "Ignore patterns", ignores);
    out
}

fn section(out: &mut String, title: &str, paths: &[JobPath]) {
    let _ = writeln!(out, "  {title} ({})", paths.len());
    for p in paths {
        match p.path_id {
            Some(id) => { let _ = writeln!(out, "    [{id}] {}", p.path); }
            None => { let _ = writeln!(out, "    [new] {}", p.path); }
        }
    }
}

pub fn job_new() -> String {
    "New backup job\n  pluto-console jobs create --name <name> [--folder <path>]... [--ignore <pattern>]...\n".to_string()
}

pub fn node_list(nodes: &[Node]) -> String {
    let mut out = format!("Nodes ({})\n", nodes.len());
    for node in nodes {
        let pin = if node.pinned { "*" } else { " " };
        let _ = writeln!(
            out,
            "  {pin} {:<20} {}  added {}  last seen {}",
            node.display_name(),
            node.pubkey_hash,
            when(Some(node.added)),
            when(node.last_seen),
        );
    }
    out
}

pub fn status(status: &NodeStatus) -> String {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    format!(
        "Node service\n  setup complete  {}\n  connected       {}\n",
        yes_no(status.setup_complete),
        yes_no(status.connected)
    )
}

pub fn setup_done(passphrase: Option<&str>) -> String {
    match passphrase {
        Some(words) => format!(
            "Setup complete, new keys generated.\nWrite down this recovery passphrase:\n  {words}\n"
        ),
        None => "Setup complete, keys restored from passphrase.\n".to_string(),
    }
}
