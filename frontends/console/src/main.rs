use clap::Parser;
use dashboard::DashboardConfig;
use dashboard_console::cli::Cli;
use dashboard_console::launcher::run_app;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to ~/.config/dashboard/dashboard.log or ./dashboard.log
fn open_log_file() -> Option<File> {
    let log_file_path = match DashboardConfig::config_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).ok();
            dir.join("dashboard.log")
        }
        None => PathBuf::from("dashboard.log"),
    };

    match OpenOptions::new().create(true).append(true).open(&log_file_path) {
        Ok(file) => Some(file),
        Err(_) => {
            eprintln!(
                "Warning: Could not open log file {:?}, logging disabled",
                log_file_path
            );
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the console, so logs only ever go to the file
    // Default to INFO level, can be overridden with RUST_LOG env var
    if let Some(log_file) = open_log_file() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(log_file).with_ansi(false))
            .init();
    }

    let cli = Cli::parse();
    let dashboard = cli.build_dashboard()?;
    run_app(dashboard).await
}
