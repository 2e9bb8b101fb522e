//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// teardownM - sets up the sledge build environment for teardownM.
#[derive(Debug, Parser)]
#[command(name = "teardownm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Install root holding sledge/ and teardownM-client/ (defaults to the current directory)
    #[arg(short, long, global = true, env = "TEARDOWNM_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to config file (overrides default .teardownm/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the chosen command asked never to prompt.
    pub fn non_interactive(&self) -> bool {
        match &self.command {
            Some(Commands::Run(args)) => args.non_interactive,
            Some(Commands::Check(args)) => args.non_interactive,
            _ => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check prerequisites, then clone and build sledge (default if no command specified)
    Run(RunArgs),

    /// Only check prerequisites
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Never prompt; answers come from TEARDOWNM_PROMPT_<KEY> variables
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Never prompt; answers come from TEARDOWNM_PROMPT_<KEY> variables
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
