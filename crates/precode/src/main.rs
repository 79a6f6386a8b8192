//! precode CLI - embed component source files into MDX documentation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use precode_static::OutputFormat;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "precode")]
#[command(about = "Embed component source files into MDX documentation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to precode.toml config file
    #[arg(short, long, default_value = "precode.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a config file, sample catalog and sample page
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Rewrite previews and write the output
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: html or mdx
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Resolve every preview without writing output
    Check {
        /// Exit with an error if any preview could not be resolved
        #[arg(long)]
        strict: bool,
    },

    /// Build, then rebuild whenever docs, catalog or sources change
    Watch {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: html or mdx
        #[arg(short, long)]
        format: Option<OutputFormat>,
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

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build { output, format } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::build::run(config.build_config(output, format))?;
        }
        Commands::Check { strict } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::check::run(config.build_config(None, None), strict)?;
        }
        Commands::Watch { output, format } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::watch::run(config.build_config(output, format))?;
        }
    }

    Ok(())
}
