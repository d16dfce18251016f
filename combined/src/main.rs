//! Chirpy binary: runs the whole backend in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chirpy::Settings;

#[derive(Parser)]
#[command(name = "chirpy")]
#[command(about = "Chirpy social posting backend")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the database file if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else {
        "info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut settings = Settings::from_env()?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.gateway.host = host;
            }
            if let Some(port) = port {
                settings.gateway.port = port;
            }

            info!(platform = %settings.gateway.platform, "Starting Chirpy");
            if let Err(e) = chirpy::serve(&settings).await {
                error!("Server failed: {}", e);
                return Err(e.into());
            }
        }
        Commands::Init => {
            chirpy::init(&settings).await?;
            info!("Database ready at {}", settings.data.database_path.display());
        }
    }

    Ok(())
}
