use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trubuild_lib::config::BuildConfig;
use trubuild_lib::platform::Platform;

mod cmd;
mod output;

use cmd::{BuildArgs, cmd_build, cmd_check, cmd_clean, cmd_info};
use output::{OutputFormat, print_error};

/// trubuild - package TruFont into a standalone bundle
#[derive(Parser)]
#[command(name = "trubuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Project directory holding TruFont.pdy and build-sysroot.py
  #[arg(short = 'C', long, global = true, default_value = ".")]
  project_dir: PathBuf,

  /// Config file (default: trubuild.toml in the project directory, if present)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the bundle (the default when no command is given)
  Build(BuildArgs),

  /// Validate the host toolchain without building
  Check,

  /// Show platform, layout, tools and packages
  Info {
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Remove root/, modules/, dist/ and the bundle
  Clean,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info,trubuild_lib=debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let platform = Platform::current();
  let mut config = BuildConfig::load(&cli.project_dir, platform, cli.config.as_deref())?;

  match cli.command.unwrap_or_else(|| Commands::Build(BuildArgs::default())) {
    Commands::Build(args) => {
      args.apply(&mut config);
      cmd_build(config, args.output)
    }
    Commands::Check => cmd_check(&config),
    Commands::Info { output } => cmd_info(&config, output),
    Commands::Clean => cmd_clean(&config),
  }
}
