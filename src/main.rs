use anyhow::Result;
use clap::{Parser, Subcommand};

/// mealmate - recipes, meal plans and shared shopping lists
#[derive(Parser)]
#[command(name = "mealmate")]
#[command(about = "Recipe sharing, weekly meal planning and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealmate::config::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealmate::observability::init_observability(
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => mealmate::cli::serve(config, host, port).await,
        Commands::Migrate => mealmate::cli::migrate(config).await,
        Commands::Reset => mealmate::cli::reset(config).await,
    }
}
