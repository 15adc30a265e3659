mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weave")]
#[command(version)]
#[command(about = "Declare your network topology once; the engine does the rest.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the topology declaration and print a summary
    Validate {
        /// Declaration file (defaults to the discovered topology.kdl)
        #[arg(short, long, env = "NETWEAVE_CONFIG_PATH")]
        file: Option<PathBuf>,
    },
    /// Evaluate the declaration and print the resource set as JSON
    Synth {
        /// Declaration file (defaults to the discovered topology.kdl)
        #[arg(short, long, env = "NETWEAVE_CONFIG_PATH")]
        file: Option<PathBuf>,
    },
    /// Print the named outputs of the evaluated topology
    Outputs {
        /// Declaration file (defaults to the discovered topology.kdl)
        #[arg(short, long, env = "NETWEAVE_CONFIG_PATH")]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => commands::validate::handle(file),
        Commands::Synth { file } => commands::synth::handle(file),
        Commands::Outputs { file } => commands::outputs::handle(file),
    }
}
