use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pathvis", version, about = "Path-set graph layout engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML configuration file (node box size, label property, set labels)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Layered,
    Force,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a path batch and emit positioned geometry
    Layout {
        /// JSON file with an array of { nodes, edges } path objects
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = LayoutArg::Layered)]
        layout: LayoutArg,
        /// Emit the frame as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Summarize the hierarchical path statistics for a batch
    Stats {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show graph model counts for a batch
    Info {
        input: PathBuf,
    },
}
