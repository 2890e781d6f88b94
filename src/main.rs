use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wc_explorer::api::state::AppState;
use wc_explorer::config::AppConfig;
use wc_explorer::context::DashboardContext;
use wc_explorer::models::MatchId;
use wc_explorer::query;
use wc_explorer::storage::StorageConfig;

#[derive(Parser)]
#[command(name = "wc-explorer")]
#[command(about = "FIFA World Cup 2018 match explorer over StatsBomb open data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write every derived table as JSONL
    Export {
        /// Output directory (default: {data_dir}/derived)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the match catalog, or one match's top performers
    Summary {
        #[arg(long)]
        match_id: Option<MatchId>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting wc-explorer v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate().context("Invalid server configuration")?;

            let context = DashboardContext::build(&config).with_context(|| {
                format!("Failed to load dataset from {}", config.data_dir.display())
            })?;
            let state = AppState::new(context, config.server.clone());
            let app = wc_explorer::api::build_router(state);

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Export { out } => {
            let context = DashboardContext::build(&config).with_context(|| {
                format!("Failed to load dataset from {}", config.data_dir.display())
            })?;
            let out = out.unwrap_or_else(|| StorageConfig::from_config(&config).derived_dir());

            let rows = context
                .export(&out)
                .with_context(|| format!("Failed to export tables to {}", out.display()))?;
            tracing::info!("Exported {} rows to {}", rows, out.display());
        }
        Commands::Summary { match_id } => {
            let context = DashboardContext::build(&config).with_context(|| {
                format!("Failed to load dataset from {}", config.data_dir.display())
            })?;

            match match_id {
                None => {
                    for m in query::match_list(&context) {
                        println!("{:>8}  {}  {}", m.match_id, m.match_date, m.description);
                    }
                }
                Some(id) => {
                    let header = query::match_header(&context, id)?;
                    println!("{}  ({}, {})", header.header, header.display_date, header.stage.label());
                    for p in context.tables.top_performers_for(id) {
                        println!(
                            "  {:<30} {:<20} xG {:.3}  shots {}  goals {}",
                            p.player_name, p.team, p.total_xg, p.shots, p.goals
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_with_config(path: &std::path::Path, command: &str) -> Cli {
        Cli::try_parse_from(["wc-explorer", "--config", path.to_str().unwrap(), command]).unwrap()
    }

    #[test]
    fn test_load_config_rejects_invalid_file_for_every_command() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dataset]\nmax_minute = 0\n").unwrap();

        for command in ["serve", "export", "summary"] {
            let err = load_config(&cli_with_config(&path, command)).unwrap_err();
            assert!(format!("{:#}", err).contains("max_minute"), "{}", command);
        }
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let cli = Cli::try_parse_from([
            "wc-explorer",
            "--config",
            path.to_str().unwrap(),
            "--data-dir",
            "/tmp/wc",
            "summary",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/wc"));
    }
}
