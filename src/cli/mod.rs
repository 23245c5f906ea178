pub mod check;
pub mod profiles;
pub mod run;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "location-curator")]
#[command(
    author,
    version,
    about = "Find, score and curate the best photos of each location with a local vision model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Curate photos for every location in a CSV file
    Run(RunArgs),

    /// Verify the vision model server and the configuration
    Check(CheckArgs),

    /// List the built-in and configured category profiles
    Profiles(ProfilesArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// CSV file with one location per row
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Directory for downloads, curated picks and reports
    #[arg(value_name = "OUTPUT_DIR", default_value = "curator_output")]
    pub output_dir: PathBuf,

    /// Path to config file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "curator.yaml")]
    pub config: PathBuf,

    /// Google Places API key
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// CSV column holding the location names
    #[arg(long, default_value = "Location")]
    pub column: String,

    /// Override the vision model (e.g. llava:7b)
    #[arg(long)]
    pub model: Option<String>,

    /// Override the category profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Override how many photos to keep per location
    #[arg(long)]
    pub select_count: Option<usize>,

    /// Override how many photos to download per location
    #[arg(long)]
    pub max_candidates: Option<usize>,

    /// Skip the model server check before starting
    #[arg(long)]
    pub skip_preflight: bool,

    /// Show plan without executing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    /// Path to config file
    #[arg(short, long, default_value = "curator.yaml")]
    pub config: PathBuf,

    /// Override the vision model to check for
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Parser, Clone)]
pub struct ProfilesArgs {
    /// Path to config file
    #[arg(short, long, default_value = "curator.yaml")]
    pub config: PathBuf,
}
