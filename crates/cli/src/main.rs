mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_hook, cmd_info};
use tcgpack_lib::config::project_root;
use tcgpack_lib::lifecycle::Hook;

/// tcgpack - build and package pytcg
#[derive(Parser)]
#[command(name = "tcgpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project root (default: $TCGPACK_PROJECT, then the current directory)
  #[arg(short, long, global = true)]
  project: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the native library and bindings, then run the backend build
  Build {
    /// Arguments passed through to the packaging backend
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Build in place and install in development mode
  Develop {
    /// Arguments passed through to the packaging backend
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Run a full build, then install
  Install {
    /// Arguments passed through to the packaging backend
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Remove binaries, curate native sources, then create a source distribution
  Sdist {
    /// Arguments passed through to the packaging backend
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Run a full build, then create an egg
  BdistEgg {
    /// Arguments passed through to the packaging backend
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Run a full build, then create a wheel tagged for this platform
  BdistWheel {
    /// Arguments passed through to the packaging backend
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Show host platform, wheel tag and available hooks
  Info,
}

impl Commands {
  /// The lifecycle hook and pass-through arguments, if this command runs one.
  fn into_hook(self) -> Option<(Hook, Vec<String>)> {
    match self {
      Commands::Build { args } => Some((Hook::Build, args)),
      Commands::Develop { args } => Some((Hook::Develop, args)),
      Commands::Install { args } => Some((Hook::Install, args)),
      Commands::Sdist { args } => Some((Hook::Sdist, args)),
      Commands::BdistEgg { args } => Some((Hook::BdistEgg, args)),
      Commands::BdistWheel { args } => Some((Hook::BdistWheel, args)),
      Commands::Info => None,
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let root = project_root(cli.project.as_deref());

  match cli.command.into_hook() {
    Some((hook, args)) => cmd_hook(&root, hook, &args),
    None => cmd_info(&root),
  }
}
