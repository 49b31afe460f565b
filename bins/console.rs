use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use console::app::ConsoleNotifier;
use console::cli::Cli;
use console::App;

fn main() -> ExitCode {
    // .env may carry RUST_LOG, CONFIG_PATH or PLUTO_API_URL
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match cli.load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(event = "config_invalid", error = %e, "failed to load configuration");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.json);

    // one session per process; stores start empty and live until exit
    let session_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "console", event = "panic", %session_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "console", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "console", event = "start", %session_id, version, base_url = %cfg.api.base_url, "console starting");

    rt.block_on(async move {
        let app = match App::from_config(&cfg, Arc::new(ConsoleNotifier)) {
            Ok(app) => app,
            Err(e) => {
                error!(event = "client_build_failed", error = %e, "failed to build api client");
                return ExitCode::FAILURE;
            }
        };

        tokio::select! {
            res = app.run(cli.command) => match res {
                Ok(out) => {
                    print!("{out}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "console", event = "command_failed", %session_id, error = %e, "command failed");
                    eprintln!("error: {e:#}");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "console", event = "interrupted", %session_id, "received Ctrl+C, in-flight requests are abandoned");
                ExitCode::from(130)
            }
        }
    })
}
