//! # Configuration Module
//!
//! This module handles configuration management and data directory setup for
//! Tagmine. It provides platform-appropriate data storage locations, the
//! mining parameters (`MiningConfig`), and the fixed vocabularies the
//! pipeline relies on: the recognized top-level genres and the mood keywords
//! matched against playlist names.
//!
//! ## Data Storage
//!
//! Tagmine stores its playlist catalog in the platform-standard data
//! directory:
//! - Linux: `~/.local/share/tagmine/`
//! - macOS: `~/Library/Application Support/tagmine/`
//! - Windows: `%APPDATA%\tagmine\`
//!
//! ## Mining Parameters
//!
//! All thresholds can be overridden from a JSON config file or per-run CLI
//! flags. The defaults reproduce the reference clustering run: a seeded
//! 5-playlist sample, minimum support 0.2, minimum confidence 0.90.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level genres recognized as cluster targets.
///
/// A tag in this set is a "main genre": mining runs once per entry, and
/// rules whose antecedent is itself a main genre are rejected so that
/// genre-to-genre associations (e.g. "rock" -> "pop") never masquerade as
/// tag clustering.
pub const DEFAULT_MAIN_GENRES: &[&str] = &[
    "blues",
    "classical",
    "country",
    "dance",
    "edm",
    "funk",
    "hiphop",
    "indie",
    "jazz",
    "pop",
    "rnb",
    "rock",
];

lazy_static::lazy_static! {
    /// Keywords that mark a playlist as mood-based when they lead its name.
    ///
    /// A name matches when, lowercased, it equals the keyword or starts with
    /// the keyword followed by a space.
    pub static ref MOOD_KEYWORDS: HashSet<&'static str> = [
        "mood", "fuzzy", "feel", "rage", "anger", "angry", "annoying",
        "aggresive", "interest", "interesting", "optimism", "optimistic",
        "ecstasy", "joy", "serenity", "love", "trust", "acceptance",
        "accepting", "submission", "terror", "fear", "awe", "amaze",
        "amazing", "surprise", "surprising", "distraction", "distracting",
        "grief", "sadness", "sad", "pensiveness", "pensive", "remorse",
        "loathing", "disgust", "boredom", "boring", "bored", "chill",
        "active", "cheerful", "reflective", "gloomy", "humorous", "humor",
        "melancholy", "romantic", "mysterious", "ominous", "calm",
        "lighthearted", "hope", "hopeful", "fearful", "tense", "lonely",
        "alone", "happy", "good", "bad", "suave", "vibe", "breakup",
        "depressed", "depression", "emo", "heart broken",
    ]
    .into_iter()
    .collect();
}

/// Returns the platform-appropriate database file path.
///
/// Locates the standard data directory for the current platform and creates
/// the Tagmine subdirectory if it doesn't exist. The database file is named
/// `playlists.db` and stores the imported playlist catalog.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The tagmine subdirectory cannot be created due to permissions
pub fn get_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let tagmine_dir = data_dir.join("tagmine");
    fs::create_dir_all(&tagmine_dir).with_context(|| {
        format!(
            "Failed to create Tagmine data directory at {}. Please check file permissions.",
            tagmine_dir.display()
        )
    })?;

    Ok(tagmine_dir.join("playlists.db"))
}

/// Parameters governing one clustering run.
///
/// Serializable so a run can be pinned in a JSON file and reproduced later;
/// every field has a default matching the reference run, so partial config
/// files are fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Number of playlist ids drawn for basket construction.
    ///
    /// Deliberately small by default; raising it trades run time for more
    /// (and noisier) rules.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Seed for the sampling RNG. Same catalog + same seed = identical
    /// rules, mapping, and statistics.
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Minimum itemset support. Higher support means fewer association
    /// rules and fewer clusters.
    #[serde(default = "default_min_support")]
    pub min_support: f64,

    /// Minimum rule confidence (inclusive cutoff).
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Recognized top-level genre vocabulary.
    #[serde(default = "default_main_genres")]
    pub main_genres: Vec<String>,
}

fn default_sample_size() -> usize {
    5
}

fn default_random_seed() -> u64 {
    1
}

fn default_min_support() -> f64 {
    0.2
}

fn default_min_confidence() -> f64 {
    0.90
}

fn default_main_genres() -> Vec<String> {
    DEFAULT_MAIN_GENRES.iter().map(|g| (*g).to_string()).collect()
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            random_seed: default_random_seed(),
            min_support: default_min_support(),
            min_confidence: default_min_confidence(),
            main_genres: default_main_genres(),
        }
    }
}

impl MiningConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Is `tag` one of the recognized main genres?
    #[must_use]
    pub fn is_main_genre(&self, tag: &str) -> bool {
        self.main_genres.iter().any(|g| g == tag)
    }
}
