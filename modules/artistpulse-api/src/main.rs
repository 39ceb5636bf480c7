use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use artistpulse_aggregator::{AggregatorOptions, ArtistProfileAggregator, Providers};
use artistpulse_api::dashboard::{self, DashboardOptions};
use artistpulse_api::{router, AppState};
use artistpulse_common::Config;

#[derive(Parser)]
#[command(name = "artistpulse")]
#[command(about = "Cross-platform artist profile dashboard")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an artist, fetch every table and print a text dashboard
    Profile {
        /// Artist name as typed by the user
        name: String,

        /// Number of tracks in the top-tracks list
        #[arg(long, default_value_t = artistpulse_aggregator::views::DEFAULT_TOP_TRACKS)]
        top_tracks: usize,

        /// Number of comments in the top-comments list (1-20)
        #[arg(long, default_value_t = artistpulse_aggregator::views::DEFAULT_TOP_COMMENTS)]
        top_comments: usize,

        /// Print the snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Serve the JSON API
    Serve {
        /// Overrides API_HOST
        #[arg(long)]
        host: Option<String>,

        /// Overrides API_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env().add_directive("artistpulse=info".parse()?);
    if cli.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;
    config.log_keys();

    let providers = Providers::from_config(&config)?;
    let options = AggregatorOptions::from(&config);

    match cli.command {
        Commands::Profile {
            name,
            top_tracks,
            top_comments,
            json,
        } => {
            let agg = ArtistProfileAggregator::new(&name, providers, options).await?;
            let snapshot = agg.snapshot().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let opts = DashboardOptions {
                    top_tracks,
                    top_comments,
                };
                print!("{}", dashboard::render(&snapshot, &opts));
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.api_host.clone());
            let port = port.unwrap_or(config.api_port);

            let state = Arc::new(AppState { providers, options });
            let app = router(state);

            let addr = format!("{host}:{port}");
            info!("Artist Pulse API starting on {addr}");

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
