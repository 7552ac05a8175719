use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Question answering service backed by Yandex Search and YandexGPT
#[derive(Parser, Debug)]
#[command(name = "qa", version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "QA_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = qa::config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let _log_guard = qa::logging::init(&config)?;

    let service = Arc::new(qa::service::QaService::from_config(&config)?);
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    qa::server::serve(listener, service).await
}
