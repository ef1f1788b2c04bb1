use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-matchr",
    about = "Identify which open-source license a LICENSE file contains",
    version
)]
pub struct Cli {
    /// License file, or project directory to search for one
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.license-matchr/config.toml,
    /// fallback ~/.config/license-matchr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Number of ranked candidates in the terminal report [default: from config, 5]
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Maximum concurrent scoring tasks; 0 uses every available core
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Directory of <slug>.txt reference texts to use instead of the bundled ones
    #[arg(long, value_name = "DIR")]
    pub licenses_dir: Option<PathBuf>,

    /// List the known licenses and exit
    #[arg(long)]
    pub list: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print a one-line result
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pom,
}
