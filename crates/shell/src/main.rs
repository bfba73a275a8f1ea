//! JFiler
//!
//! Command line file manager with navigation history and a locked home.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use filer::{Filer, SearchQuery};
use shell::config::Config;
use shell::repl::Repl;
use shell::view;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// JFiler - command line file manager.
#[derive(Parser, Debug)]
#[command(name = "jfiler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List a folder
    Ls {
        /// Folder to list (defaults to the working directory)
        path: Option<PathBuf>,

        /// Include hidden entries
        #[arg(long, short)]
        all: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show details of a file or folder
    Info {
        path: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Search recursively by name, or by content with --content
    Search {
        /// Regular expression to match
        pattern: String,

        /// Where to search (defaults to the working directory)
        #[arg(long = "in", value_name = "DIR")]
        root: Option<PathBuf>,

        /// Match file contents instead of names
        #[arg(long)]
        content: bool,
    },

    /// Create an empty file
    Touch { path: PathBuf },

    /// Create a folder
    Mkdir { path: PathBuf },

    /// Delete a file or folder
    Rm { path: PathBuf },

    /// Rename a file or folder in place
    Rename { path: PathBuf, name: String },

    /// Hide a file or folder
    Hide { path: PathBuf },

    /// Unhide a file or folder
    Unhide { path: PathBuf },

    /// Copy a file or folder
    Cp { source: PathBuf, destination: PathBuf },

    /// Move a file or folder
    Mv { source: PathBuf, destination: PathBuf },

    /// Create a zip archive
    Zip {
        archive: PathBuf,

        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Extract a zip archive
    Unzip { archive: PathBuf, destination: PathBuf },

    /// Start an interactive session
    Shell {
        /// Start location (overrides the configured home)
        #[arg(long, value_name = "DIR")]
        home: Option<PathBuf>,

        /// Keep navigation at or below the start location
        #[arg(long)]
        locked: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default()?
    };

    // Apply environment variable overrides
    config.apply_env_overrides();

    // Validate configuration
    config.validate()?;

    let _guard = init_logging(&config, cli.verbose)?;
    tracing::debug!("Configuration loaded: {:?}", config);

    run(cli.command, &config)
}

/// Initialise tracing. Keep the returned guard alive to flush file output.
fn init_logging(config: &Config, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let level = if verbose {
        "debug"
    } else {
        config.logging.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &config.logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Session rooted at the working directory for one-shot commands.
fn working_session(config: &Config) -> anyhow::Result<Filer> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    Ok(Filer::new(&cwd)?
        .include_hidden(config.listing.include_hidden)
        .overwrite(config.transfer.overwrite))
}

fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Shell { home, locked } => {
            let home = home.unwrap_or_else(|| config.session.home.clone());
            let locked = locked || config.session.locked;
            let filer = Filer::with_lock(&home, locked)
                .with_context(|| format!("Failed to open session at {}", home.display()))?
                .include_hidden(config.listing.include_hidden)
                .overwrite(config.transfer.overwrite);

            tracing::info!("Starting interactive session at {:?}", filer.current_location());
            let mut repl = Repl::new(filer);
            repl.run(io::stdin().lock(), io::stdout().lock())?;
        }
        Commands::Ls { path, all, json } => {
            let mut filer = working_session(config)?;
            if all {
                filer = filer.include_hidden(true);
            }
            if let Some(path) = path {
                filer.open_folder(&path)?;
            }
            let files = filer.list()?;
            print_nonempty(&view::render_entries(&files, json)?);
        }
        Commands::Info { path, json } => {
            let filer = working_session(config)?;
            println!("{}", view::render_info(&filer.get_file(&path)?, json)?);
        }
        Commands::Search {
            pattern,
            root,
            content,
        } => {
            let filer = working_session(config)?;
            let query = if content {
                SearchQuery::content(&pattern)?
            } else {
                SearchQuery::name(&pattern)?
            };
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            for found in filer.search_in(&root, &query)? {
                println!("{}", found.display());
            }
        }
        Commands::Touch { path } => {
            let file = working_session(config)?.create_new_file(&path)?;
            report("Created", file.location());
        }
        Commands::Mkdir { path } => {
            let folder = working_session(config)?.create_new_folder(&path)?;
            report("Created", folder.location());
        }
        Commands::Rm { path } => {
            working_session(config)?.delete(&path)?;
            report("Removed", &path);
        }
        Commands::Rename { path, name } => {
            let file = working_session(config)?.rename(&path, &name)?;
            report("Renamed to", file.location());
        }
        Commands::Hide { path } => {
            let hidden = working_session(config)?.hide(&path)?;
            report("Hidden", &hidden);
        }
        Commands::Unhide { path } => {
            let visible = working_session(config)?.un_hide(&path)?;
            report("Visible", &visible);
        }
        Commands::Cp {
            source,
            destination,
        } => {
            let copied = working_session(config)?.copy_to(&source, &destination)?;
            report("Copied to", copied.location());
        }
        Commands::Mv {
            source,
            destination,
        } => {
            let moved = working_session(config)?.cut_to(&source, &destination)?;
            report("Moved to", moved.location());
        }
        Commands::Zip { archive, paths } => {
            let zipped = working_session(config)?.zip(&paths, &archive)?;
            report("Created", zipped.location());
        }
        Commands::Unzip {
            archive,
            destination,
        } => {
            let folder = working_session(config)?.unzip(&archive, &destination)?;
            report("Extracted into", folder.location());
        }
    }

    Ok(())
}

fn report(action: &str, path: &Path) {
    println!("{} {}", action, path.display());
}

fn print_nonempty(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}
