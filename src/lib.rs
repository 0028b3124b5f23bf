//! Playlist clustering engine that mines association rules between genre tags.
//!
//! Core modules:
//! - [`basket`] - Seeded sampling and the playlist-by-tag presence matrix
//! - [`mining`] - Frequent itemset mining and rule derivation
//! - [`cluster`] - Tag-to-cluster mapping, membership matrix, statistics
//! - [`pipeline`] - The full batch run, wired end to end
//!
//! ### Supporting Modules
//!
//! - [`catalog`] - Playlist records and CSV import
//! - [`tags`] - Genre-string splitting and normalization
//! - [`mood`] - Mood playlist detection from display names
//! - [`db`] - SQLite catalog storage
//! - [`export`] - CSV export of results
//! - [`config`] - Mining parameters and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use tagmine::{catalog, config, export, pipeline};
//!
//! // Load the raw playlist table
//! let playlists = catalog::read_playlists_csv(std::path::Path::new("df_playlists.csv"))?;
//!
//! // Run the clustering pipeline with default parameters
//! let outcome = pipeline::run(&playlists, &config::MiningConfig::default())?;
//! println!(
//!     "{} clusters, {:.1}% of playlists unassigned",
//!     outcome.stats.len(),
//!     outcome.unassigned_pct()
//! );
//!
//! // Export the membership matrix and statistics
//! export::export_results(&outcome, std::path::Path::new("gen"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## How Clustering Works
//!
//! Mining runs over a small seeded random sample of the catalog. For each
//! recognized main genre, the basket matrix is restricted to playlists
//! carrying that genre, frequent tag itemsets of size one and two are
//! enumerated, and directed rules are scored by confidence and lift. Rules
//! that survive the filters map their antecedent tag into the genre's
//! cluster; a tag may map into several clusters. The mapping is then joined
//! against the *full* catalog, mood playlists (detected from names) are
//! merged in, and the result is a playlist-by-cluster membership matrix
//! plus per-cluster counts.
//!
//! Determinism is a hard requirement, not a nicety: the sampling seed is an
//! explicit parameter, every intermediate structure iterates in sorted
//! order, and two runs over the same catalog with the same configuration
//! produce identical mappings, matrices and statistics.
//!
//! ## Error Handling
//!
//! All public functions return `Result<T, anyhow::Error>`. Degenerate
//! configurations (thresholds that accept no rules) are not errors; they
//! produce valid, possibly empty, results. Malformed inputs - a missing id
//! column, a tag record outside the intended sample - fail loudly instead.

pub mod basket;
pub mod catalog;
pub mod cli;
pub mod cluster;
pub mod completion;
pub mod config;
pub mod db;
pub mod export;
pub mod mining;
pub mod mood;
pub mod pipeline;
pub mod tags;
