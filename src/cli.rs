use clap::Parser;
use std::path::PathBuf;

/// Lints utility-class attribute values against a design system
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The class attribute values to check, e.g. "flex w-4 h-4"
    pub values: Vec<String>,

    /// Read one value per line from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Apply fixes and print the fixed values
    #[arg(long)]
    pub fix: bool,

    /// Configuration file to use instead of the per-user one
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog file describing the design system
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Required class prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// List the enabled rules and exit
    #[arg(long)]
    pub list_rules: bool,
}
