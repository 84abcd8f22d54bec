//! bucketree - A terminal file manager for S3 buckets.
//!
//! Usage:
//!   bkt                      Launch interactive TUI
//!   bkt tree                 Print the bucket as a directory tree
//!   bkt tree --format json   Dump the derived tree as JSON
//!   bkt check                Verify credentials and connectivity
//!   bkt --help               Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};

use bucketree_core::{BucketConfig, NodeId, ObjectTree, ROOT};
use bucketree_store::{ObjectStore, S3Store};

#[derive(Parser)]
#[command(
    name = "bucketree",
    version,
    about = "A terminal file manager for S3 buckets",
    long_about = "bucketree renders an S3 bucket as a navigable directory tree.\n\n\
                  Launch the interactive TUI by running `bkt`, or use subcommands \
                  for quick operations."
)]
struct Cli {
    /// Credentials file (defaults to the standard config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the bucket as a directory tree
    Tree {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Verify the bucket answers a listing request
    Check,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Tree { format }) => {
            run_tree(&cli.config, format)?;
        }
        Some(Command::Check) => {
            run_check(&cli.config)?;
        }
        None => {
            // Launch TUI
            bucketree_tui::run(cli.config)?;
        }
    }

    Ok(())
}

/// Fetch one listing and print the derived tree.
fn run_tree(config_path: &Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path)?;

    eprintln!("Listing {}...", config.bucket_name);

    let keys = fetch_keys(&config)?;
    let tree = ObjectTree::from_keys(&keys);

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(" {}", config.bucket_name);
            println!(
                " {} files, {} directories",
                tree.file_count(),
                tree.directory_count()
            );
            println!("{}", "─".repeat(60));
            println!();

            print_node(&tree, ROOT, 0);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
    }

    Ok(())
}

/// Check that the bucket is reachable with the stored credentials.
fn run_check(config_path: &Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;

    eprintln!("Checking {}...", config.bucket_name);

    let keys = fetch_keys(&config)?;
    println!("ok: {} objects in {}", keys.len(), config.bucket_name);

    Ok(())
}

/// Load credentials and refuse to continue when they are incomplete.
fn load_config(config_path: &Option<PathBuf>) -> Result<BucketConfig> {
    let config = match config_path {
        Some(path) => BucketConfig::load_from(path),
        None => BucketConfig::load(),
    }
    .unwrap_or_default();

    if !config.is_complete() {
        bail!("bucket credentials are missing or incomplete; run `bkt` and press `c` to set them");
    }

    Ok(config)
}

/// Run a single listing request on a private runtime.
fn fetch_keys(config: &BucketConfig) -> Result<Vec<String>> {
    let rt = tokio::runtime::Runtime::new()?;
    let store = S3Store::connect(config);
    let keys = rt
        .block_on(store.list_objects(&config.bucket_name))
        .context("Bucket listing failed")?;

    Ok(keys)
}

/// Print a node and its children.
fn print_node(tree: &ObjectTree, id: NodeId, depth: usize) {
    let node = tree.node(id);
    let indent = "  ".repeat(depth);

    let name = if depth == 0 { "/" } else { node.name.as_str() };
    let dir_marker = if node.is_dir() && depth > 0 { "/" } else { "" };

    println!(
        "{}{}{}{}",
        indent,
        if node.is_dir() { "▼ " } else { "  " },
        name,
        dir_marker
    );

    for child in tree.children(id) {
        print_node(tree, *child, depth + 1);
    }
}
