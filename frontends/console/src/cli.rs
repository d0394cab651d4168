use anyhow::Result;
use clap::Parser;
use dashboard::{Dashboard, DashboardConfig};
use dashboard_jsonplaceholder::FakeRestApi;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dashboard-console")]
#[command(about = "Console client for the JSONPlaceholder posts dashboard")]
pub struct Cli {
    /// YAML config file (default: ~/.config/dashboard/config.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Serve a built-in in-memory dataset instead of calling the API
    #[arg(long)]
    pub offline: bool,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Config file, then environment, then these flags
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut config = DashboardConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
            config.validate()?;
        }
        Ok(config)
    }

    pub fn build_dashboard(&self) -> Result<Dashboard> {
        let config = self.resolve_config()?;
        let mut builder = Dashboard::builder();
        if self.offline {
            info!("[Console] Offline mode, using in-memory data");
            builder = builder.api(Arc::new(FakeRestApi::seeded()));
        } else {
            info!("[Console] Using {}", config.base_url);
        }
        Ok(builder.config(config).build()?)
    }
}
