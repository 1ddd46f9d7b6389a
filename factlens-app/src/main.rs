use anyhow::Result;
use clap::Parser;
use factlens_common::observability::{init_logging, LogConfig};
use factlens_config::FactlensConfigLoader;
use factlens_llm::completion_client_from;
use factlens_llm::traits::CompletionClient;
use factlens_web::{create_app, AppState};
use std::path::PathBuf;

/// Claim extraction and verification API server.
#[derive(Parser, Debug)]
#[command(name = "factlens", version, about)]
struct Cli {
    /// Path to the YAML configuration file. Missing file means defaults plus
    /// FACTLENS_-prefixed environment variables.
    #[arg(long, default_value = "factlens.yaml")]
    config: PathBuf,

    /// Override the configured listen address.
    #[arg(long)]
    listen: Option<String>,

    /// Probe the completion upstream and exit.
    #[arg(long)]
    probe_upstream: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let cfg = FactlensConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()?;

    let log_path = init_logging(LogConfig::default())?;
    tracing::info!(log_path = %log_path.display(), "logging initialised");

    if cli.probe_upstream {
        let client = completion_client_from(&cfg.completion)?;
        let healthy = client.health_check().await?;
        println!("completion upstream healthy: {healthy}");
        return Ok(());
    }

    let listen = cli.listen.unwrap_or_else(|| cfg.server.listen.clone());
    let state = AppState::from_config(&cfg)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!(%listen, base_url = %cfg.server.base_url, "factlens api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
