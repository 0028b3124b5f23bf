//! # Tagmine - Playlist Genre Clustering
//!
//! Tagmine assigns every playlist in a catalog to one or more semantic
//! genre clusters by mining association rules between its free-text genre
//! tags. It is a batch tool: import the catalog once, then run the
//! clustering pipeline as often as the thresholds need tuning.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `db`: SQLite catalog storage
//! - `catalog` / `tags`: CSV import and tag normalization
//! - `basket` / `mining` / `cluster`: the mining engine
//! - `pipeline`: end-to-end batch run
//! - `export`: CSV output
//!
//! ## Usage
//!
//! ```bash
//! # Import the raw playlist table
//! tagmine import data/df_playlists.csv
//!
//! # List the imported catalog
//! tagmine list
//!
//! # Run the pipeline and export results
//! tagmine cluster --output gen
//!
//! # Reproduce a run exactly
//! tagmine cluster --seed 1 --min-support 0.2 --min-confidence 0.9
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::info;
use tagmine::{catalog, cli, completion, config, db, export, pipeline};

/// Main entry point for the Tagmine application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate module functions. All operations return Results for
/// consistent error handling throughout the application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug tagmine cluster` - Enable debug logging
/// - `RUST_LOG=tagmine::mining=trace tagmine cluster` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Import { path, force } => {
            info!("Importing playlist catalog from: {}", path.display());
            let playlists = catalog::read_playlists_csv(&path)?;
            let db_path = config::get_db_path()?;
            db::init(&playlists, &db_path, force)?;
            println!(
                "Imported {} playlist rows ({} distinct playlists)",
                playlists.len(),
                catalog::distinct_playlist_count(&playlists)
            );
        }
        cli::Command::List => {
            let db_path = config::get_db_path()?;
            let conn = db::connect(&db_path)?;
            let playlists = db::retrieve_playlists(&conn)?;

            for playlist in &playlists {
                println!(
                    "{}\t{}\t{}",
                    playlist.id,
                    playlist.name,
                    playlist.genre.as_deref().unwrap_or("-")
                );
            }
            println!("{} rows", playlists.len());
        }
        cli::Command::Cluster {
            output,
            config: config_file,
            min_support,
            min_confidence,
            sample_size,
            seed,
        } => {
            let mut mining_config = match config_file {
                Some(path) => config::MiningConfig::load(&path)?,
                None => config::MiningConfig::default(),
            };
            if let Some(value) = min_support {
                mining_config.min_support = value;
            }
            if let Some(value) = min_confidence {
                mining_config.min_confidence = value;
            }
            if let Some(value) = sample_size {
                mining_config.sample_size = value;
            }
            if let Some(value) = seed {
                mining_config.random_seed = value;
            }

            info!(
                "Starting association rule mining with minimum confidence of {} and minimum support of {}",
                mining_config.min_confidence, mining_config.min_support
            );

            let db_path = config::get_db_path()?;
            let conn = db::connect(&db_path)?;
            let playlists = db::retrieve_playlists(&conn)?;
            if playlists.is_empty() {
                anyhow::bail!("Playlist catalog is empty. Run `tagmine import` first.");
            }

            let outcome = pipeline::run(&playlists, &mining_config)?;

            println!("{:<20} {:>14} {:>15}", "label", "num_playlists", "perc_playlists");
            for stat in &outcome.stats {
                println!(
                    "{:<20} {:>14} {:>15.1}",
                    stat.label, stat.num_playlists, stat.perc_playlists
                );
            }
            println!(
                "{:.1}% of all playlists is not assigned to any cluster",
                outcome.unassigned_pct()
            );

            export::export_results(&outcome, &output)?;
            println!("Results written to {}", output.display());
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
