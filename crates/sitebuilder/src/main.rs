//! sitebuilder CLI - builds a single-page static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "sitebuilder")]
#[command(about = "Render a data-driven page, compile its styles and copy its assets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root directory
    #[arg(short = 'C', long, default_value = ".", global = true)]
    root: PathBuf,

    /// Path to site.toml config file, relative to the project root
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the distribution directory (default)
    Build,

    /// Create a starter project in the root directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            commands::build::run(&cli.root, &cli.config)?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.root, yes)?;
        }
    }

    Ok(())
}
