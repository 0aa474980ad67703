//! specmonkey - Index URLs referenced from source code comments
//!
//! specmonkey walks a source tree, finds every `http://` / `https://` URL
//! written inside a comment, and reports where each one lives. The `index`
//! command groups those links per domain so a spec or bug tracker can see
//! which code points at it.

use clap::{ArgAction, Parser, Subcommand};
use eyre::{Result, WrapErr};
use owo_colors::OwoColorize;
use specmonkey::config::Config;
use specmonkey::output::{OutputFormat, render_links};
use specmonkey::{DEFAULT_EXTENSIONS, build_index, scan_directory};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "specmonkey", version)]
#[command(about = "Index URLs referenced from source code comments", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of worker threads (default: available parallelism)
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Find URLs in comments under a directory and print or save them
    Scan {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format: txt, csv, json
        #[arg(short, long, default_value = "txt")]
        format: OutputFormat,

        /// File extension to include; repeatable (default: cpp h rs js html)
        #[arg(short, long = "extension", value_name = "EXT")]
        extensions: Vec<String>,

        /// Glob of paths to skip, relative to DIR; repeatable
        #[arg(short = 'x', long, value_name = "GLOB")]
        exclude: Vec<String>,
    },

    /// Index references from the source repository into the index repository
    Index {
        /// Path to the configuration YAML file
        #[arg(short, long, value_name = "FILE")]
        config_file: PathBuf,

        /// Path to the source repository
        #[arg(value_name = "SOURCE_REPO")]
        source_repository_path: PathBuf,

        /// Path to the index repository
        #[arg(value_name = "INDEX_REPO")]
        index_repository_path: PathBuf,
    },

    /// Write a default configuration file
    CreateConfig {
        #[arg(value_name = "FILE")]
        filename: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .wrap_err("Failed to configure worker threads")?;
    }

    match cli.command {
        Command::Scan {
            directory,
            output,
            format,
            extensions,
            exclude,
        } => run_scan_command(directory, output, format, extensions, exclude),
        Command::Index {
            config_file,
            source_repository_path,
            index_repository_path,
        } => run_index_command(config_file, source_repository_path, index_repository_path),
        Command::CreateConfig { filename } => {
            Config::write_default(&filename)?;
            eprintln!(
                "{} Wrote default config to {}",
                "OK".green().bold(),
                filename.display()
            );
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_scan_command(
    directory: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    extensions: Vec<String>,
    exclude: Vec<String>,
) -> Result<()> {
    let extensions = if extensions.is_empty() {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    } else {
        extensions
    };

    eprintln!(
        "{} Scanning {}...",
        "->".blue().bold(),
        directory.display()
    );
    let started = Instant::now();

    let result = scan_directory(&directory, &extensions, &exclude)?;
    let rendered = render_links(&result.links, format)?;

    eprintln!(
        "   Found {} links in {} files ({:.2}s)",
        result.links.len().to_string().green(),
        result.files,
        started.elapsed().as_secs_f64()
    );

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} links to {}",
                "OK".green().bold(),
                result.links.len(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn run_index_command(
    config_file: PathBuf,
    source_repository_path: PathBuf,
    index_repository_path: PathBuf,
) -> Result<()> {
    let config = Config::load(&config_file)?;

    eprintln!(
        "{} Indexing {}...",
        "->".blue().bold(),
        source_repository_path.display()
    );

    let index = build_index(&config, &source_repository_path)?;
    if index.is_empty() {
        eprintln!(
            "{} No links matched domains [{}]",
            "!".yellow().bold(),
            config.domains.join(", ")
        );
    }

    let written = index.write_json(&index_repository_path)?;
    eprintln!(
        "{} Wrote {} links for {} domains to {}",
        "OK".green().bold(),
        index.len(),
        written.len(),
        index_repository_path.display()
    );

    Ok(())
}
