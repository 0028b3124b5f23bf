//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Tagmine using Clap
//! derive macros. It provides a type-safe way to parse command-line
//! arguments and route them to appropriate functionality.
//!
//! ## Commands
//!
//! - `import`: Load a raw playlist CSV into the catalog database
//! - `list`: Display the imported playlist catalog
//! - `cluster`: Run the clustering pipeline and export results
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! tagmine import data/df_playlists.csv
//! tagmine cluster --output gen
//! tagmine cluster --min-support 0.1 --seed 7
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. The main structure contains only a subcommand
/// since all functionality is accessed through specific commands.
#[derive(Parser)]
#[command(name = "tagmine")]
#[command(about = "Tagmine: Playlist genre clustering - association rules over genre tags")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to a major piece of functionality in Tagmine.
/// Command arguments are embedded directly in the enum variants for
/// type safety and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Import a raw playlist table into the catalog database
    ///
    /// Reads a CSV file with `id`, `name` and `genre` columns, where genre
    /// is comma-separated free text and may be empty, and stores the rows
    /// in the catalog. Exact duplicate rows are collapsed on import.
    Import {
        /// Path to the playlist CSV file
        path: PathBuf,

        /// Force overwrite existing database
        ///
        /// If specified, will delete and recreate the database even if it
        /// already exists. Without this flag, import will fail if the
        /// database exists.
        #[arg(long)]
        force: bool,
    },

    /// List all playlists in the catalog
    ///
    /// Displays every imported playlist with its id, name and raw genre
    /// field, followed by a total count.
    List,

    /// Run the clustering pipeline and export the results
    ///
    /// Mines association rules between genre tags over a seeded random
    /// sample of the catalog, maps tags to genre clusters, assigns every
    /// playlist (mood playlists included) and writes the membership matrix
    /// and per-cluster statistics as CSV.
    Cluster {
        /// Output directory for the exported CSV files
        #[arg(long, default_value = "gen")]
        output: PathBuf,

        /// JSON config file with mining parameters
        ///
        /// Missing fields fall back to their defaults; CLI flags below
        /// override the file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum itemset support threshold
        #[arg(long)]
        min_support: Option<f64>,

        /// Minimum rule confidence threshold
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Number of playlist ids sampled for basket construction
        #[arg(long)]
        sample_size: Option<usize>,

        /// Seed for the sampling RNG
        ///
        /// Same catalog and same seed reproduce the exact same clusters.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate shell completions
    ///
    /// Generates completion scripts for various shells to enable tab
    /// completion of commands and options.
    ///
    /// Usage: tagmine completion bash > ~/.local/share/bash-completion/completions/tagmine
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
