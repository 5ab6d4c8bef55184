use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plumage::Site;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plumage")]
#[command(about = "A YAML-driven personal portfolio site generator")]
struct Cli {
    /// Directory containing the YAML configuration files
    #[arg(long, default_value = "configs")]
    config_dir: PathBuf,

    /// Directory containing the static assets (css, js, images)
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Base path the site is served under
    #[arg(long, default_value = "/")]
    base_path: String,

    /// Print more verbose logging information
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the portfolio dynamically
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1")]
        address: IpAddr,

        /// Listen port
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Pre-render the portfolio into a static site
    Build {
        /// Directory to write the static build to
        #[arg(long, default_value = "dist")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(config_dir = %cli.config_dir.display(), "using config directory");

    let builder = Site::builder()
        .config_dir(&cli.config_dir)
        .static_dir(&cli.static_dir)
        .base_path(&cli.base_path);

    match cli.command {
        Commands::Serve { address, port } => {
            let site = builder.build();
            site.serve(SocketAddr::new(address, port)).await?;
        }
        Commands::Build { output_dir } => {
            let mut site = builder.output_dir(&output_dir).build();
            site.build()?;
        }
    }

    Ok(())
}
