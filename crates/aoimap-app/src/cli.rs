use clap::Parser;
use std::path::PathBuf;

/// aoimap - interactive Area-of-Interest definition shell
#[derive(Parser, Debug)]
#[command(name = "aoimap")]
#[command(about = "Define map areas of interest by search or drawing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Session state file (overrides config)
    #[arg(long)]
    pub state_path: Option<PathBuf>,

    /// Geocoder base URL (overrides config)
    #[arg(long)]
    pub geocoder_url: Option<String>,

    /// Maximum geocoder results per query (overrides config)
    #[arg(long)]
    pub search_limit: Option<usize>,

    /// Keep session state in memory only (nothing written to disk)
    #[arg(long)]
    pub ephemeral: bool,
}
