use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nodegraph")]
#[command(version, about = "Run and inspect visual-scripting graph documents")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a document and run its entry nodes
    Run {
        file: PathBuf,
        /// Class of the nodes to start from (defaults to the configured entry class)
        #[arg(long)]
        entry: Option<String>,
        /// How many times to run the entry nodes
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
    /// List registered node types by namespace
    Nodes,
    /// Write a small demo document
    Demo { file: PathBuf },
    /// Load a document and report what it contains
    Validate { file: PathBuf },
    /// Show the effective config
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}
