use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod contract;
mod error;
mod imaging;
mod input;
mod output;
mod places;
mod provider;
mod runner;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Progress is logged at info; --verbose adds per-request detail
    let filter = if cli.verbose {
        EnvFilter::new("location_curator=debug")
    } else {
        EnvFilter::new("location_curator=info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Check(args) => cli::check::execute(args).await,
        Commands::Profiles(args) => cli::profiles::execute(args),
        Commands::Schema => cli::schema::execute(),
    }
}
