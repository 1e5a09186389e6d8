use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{inputs_command, outputs_command, show_config_command, sync_command};

#[derive(Parser, Debug)]
#[command(name = "bazel-bridge")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Bazel workspace root (defaults to the current directory)
    #[arg(short = 'w', long = "workspace", global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the project from aspect output files
    Sync {
        /// Directory holding `*.target-info.json` files
        #[arg(short = 'a', long = "aspect-output")]
        aspect_output: PathBuf,

        /// Bazel execution root (defaults to the workspace root)
        #[arg(long = "exec-root")]
        exec_root: Option<PathBuf>,

        /// Ignore the stored project and resolve again
        #[arg(short = 'r', long = "refresh")]
        refresh: bool,

        /// Print the whole project as JSON
        #[arg(long = "json")]
        json: bool,
    },
    /// List compiler inputs of a target from an aquery JSON dump
    Inputs {
        /// Target label, e.g. //app:lib
        target: String,

        /// Output of `bazel aquery --output=jsonproto`
        #[arg(short = 'g', long = "action-graph")]
        action_graph: PathBuf,

        /// File suffixes to keep
        #[arg(short = 's', long = "suffix", default_values_t = [".jar".to_string(), "js".to_string()])]
        suffixes: Vec<String>,

        /// Print absolute paths under this execution root instead of URIs
        #[arg(long = "exec-root")]
        exec_root: Option<PathBuf>,
    },
    /// List outputs of a target from an aquery JSON dump
    Outputs {
        /// Target label, e.g. //app:lib
        target: String,

        /// Output of `bazel aquery --output=jsonproto`
        #[arg(short = 'g', long = "action-graph")]
        action_graph: PathBuf,

        /// File suffixes to keep
        #[arg(short = 's', long = "suffix", default_values_t = [".jar".to_string()])]
        suffixes: Vec<String>,
    },
    /// Print the effective configuration
    ShowConfig,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let workspace = self.workspace;
        match self.command {
            Commands::Sync {
                aspect_output,
                exec_root,
                refresh,
                json,
            } => sync_command(workspace, &aspect_output, exec_root, refresh, json),
            Commands::Inputs {
                target,
                action_graph,
                suffixes,
                exec_root,
            } => inputs_command(&target, &action_graph, &suffixes, exec_root.as_deref()),
            Commands::Outputs {
                target,
                action_graph,
                suffixes,
            } => outputs_command(&target, &action_graph, &suffixes),
            Commands::ShowConfig => show_config_command(workspace),
        }
    }
}
