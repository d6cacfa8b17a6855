//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, list, scan, watch};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "todomd")]
#[command(author, version, about = "Checkbox todos with due dates, straight from your markdown")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to configuration, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan markdown files and print the todo tree
    Scan {
        /// Directory or file to scan (defaults to the project root)
        path: Option<PathBuf>,
    },

    /// Show todos grouped into overdue, today, active, and completed
    List {
        /// Directory or file to scan (defaults to the project root)
        path: Option<PathBuf>,

        /// Reference date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Report scheduling-option problems; exits non-zero if any are found
    Check {
        /// Directory or file to scan (defaults to the project root)
        path: Option<PathBuf>,
    },

    /// Watch for markdown changes and rescan
    Watch {
        /// Directory to watch (defaults to the project root)
        path: Option<PathBuf>,
    },
}

/// Resolves the scan root and its configuration.
///
/// An explicit path wins; otherwise the nearest ancestor with a
/// `.todomd.toml` is used, falling back to the current directory.
fn resolve(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    match path {
        Some(path) => {
            let config_root = if path.is_file() {
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."))
                    .to_path_buf()
            } else {
                path.clone()
            };
            let config = Config::for_root(&config_root)?;
            Ok((config, path))
        }
        None => {
            let config = Config::load()?;
            let root = config
                .project_root
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, root))
        }
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format_flag = cli.format;
    let verbose = cli.verbose;

    let make_output = |config: &Config| {
        let format = format_flag.unwrap_or_else(|| config.global.default_format.into());
        Output::new(format, verbose)
    };

    match cli.command {
        Commands::Scan { path } => {
            let (config, root) = resolve(path)?;
            let output = make_output(&config);
            output.verbose_ctx("scan", &format!("Scanning: {}", root.display()));
            scan::run(&output, &config, &root)
        }

        Commands::List { path, date } => {
            let (config, root) = resolve(path)?;
            let output = make_output(&config);
            output.verbose_ctx("list", &format!("Listing: {}", root.display()));
            list::run(&output, &config, &root, date.as_deref())
        }

        Commands::Check { path } => {
            let (config, root) = resolve(path)?;
            let output = make_output(&config);
            output.verbose_ctx("check", &format!("Checking: {}", root.display()));
            check::run(&output, &config, &root)
        }

        Commands::Watch { path } => {
            let (config, root) = resolve(path)?;
            let output = make_output(&config);
            output.verbose_ctx("watch", &format!("Watching: {}", root.display()));
            watch::run(&output, &config, &root)
        }
    }
}
