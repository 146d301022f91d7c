use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skimmer")]
#[command(about = "Extract time-windowed events from a compressed S3 archive", long_about = None)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract matching events into a CSV table
    Extract(skimmer::cli::run::ExtractArgs),
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Init {
        #[arg(long)]
        stdout: bool,
    },
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skimmer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config_path = skimmer::config::resolve_config_path(cli.config.as_deref());

    match cli.command {
        Commands::Extract(args) => {
            skimmer::cli::run::extract(config_path, args).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { stdout } => {
                skimmer::cli::config::init(stdout)?;
            }
            ConfigAction::Validate => {
                skimmer::cli::config::validate(config_path)?;
            }
        },
    }

    Ok(())
}
