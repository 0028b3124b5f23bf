//! Playlist catalog records and CSV import.
//!
//! The raw playlist table arrives as a CSV file with `id`, `name` and
//! `genre` columns, where `genre` is comma-separated free text and may be
//! empty. Rows with an empty genre still count as playlists (they matter
//! for coverage accounting) but contribute no tags downstream.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::collections::HashSet;
use std::path::Path;

/// How a playlist (and its raw genre field) is stored in the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// External playlist identifier, e.g. a streaming-service id.
    pub id: String,
    /// Display name, used only for mood keyword matching.
    pub name: String,
    /// Raw comma-separated genre string. `None` when the source row had no
    /// genre field.
    pub genre: Option<String>,
}

/// Read the raw playlist table from a CSV file.
///
/// The header row must contain an `id` column; `name` and `genre` columns
/// are optional and default to empty when absent. Exact duplicate
/// `(id, genre)` rows are collapsed here, before anything downstream sees
/// them.
pub fn read_playlists_csv(path: &Path) -> Result<Vec<Playlist>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open playlist CSV {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers from {}", path.display()))?
        .clone();

    let id_idx = headers
        .iter()
        .position(|h| h == "id")
        .ok_or_else(|| anyhow::anyhow!("Playlist CSV {} has no 'id' column", path.display()))?;
    let name_idx = headers.iter().position(|h| h == "name");
    let genre_idx = headers.iter().position(|h| h == "genre");

    if genre_idx.is_none() {
        warn!("Playlist CSV has no 'genre' column; every playlist will be tagless");
    }

    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    let mut playlists = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse CSV record {} in {}", line + 2, path.display()))?;

        let id = match record.get(id_idx) {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            // A row without an id belongs to no playlist; skip it.
            _ => {
                debug!("Skipping CSV record {} with empty id", line + 2);
                continue;
            }
        };

        let name = name_idx
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string();

        let genre = genre_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);

        if seen.insert((id.clone(), genre.clone())) {
            playlists.push(Playlist { id, name, genre });
        }
    }

    debug!("Read {} playlist rows from {}", playlists.len(), path.display());
    Ok(playlists)
}

/// Count the distinct playlist ids in the catalog. This is the population
/// that coverage percentages are computed against.
#[must_use]
pub fn distinct_playlist_count(playlists: &[Playlist]) -> usize {
    playlists.iter().map(|p| p.id.as_str()).collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("playlists.csv");
        let mut file = std::fs::File::create(&path).expect("create csv");
        file.write_all(content.as_bytes()).expect("write csv");
        (dir, path)
    }

    #[test]
    fn test_read_basic_catalog() {
        let (_dir, path) = write_csv(
            "id,name,genre\n\
             p1,Morning Drive,\"pop, dance pop\"\n\
             p2,Gym Hits,pop\n",
        );

        let playlists = read_playlists_csv(&path).expect("read csv");

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].id, "p1");
        assert_eq!(playlists[0].name, "Morning Drive");
        assert_eq!(playlists[0].genre.as_deref(), Some("pop, dance pop"));
    }

    #[test]
    fn test_missing_genre_becomes_none() {
        let (_dir, path) = write_csv("id,name,genre\np1,No Tags,\n");

        let playlists = read_playlists_csv(&path).expect("read csv");

        assert_eq!(playlists.len(), 1);
        assert!(playlists[0].genre.is_none());
    }

    #[test]
    fn test_duplicate_rows_collapse() {
        let (_dir, path) = write_csv(
            "id,name,genre\n\
             p1,Morning Drive,pop\n\
             p1,Morning Drive,pop\n\
             p1,Morning Drive,rock\n",
        );

        let playlists = read_playlists_csv(&path).expect("read csv");

        // Exact (id, genre) duplicates collapse; a different genre row stays.
        assert_eq!(playlists.len(), 2);
        assert_eq!(distinct_playlist_count(&playlists), 1);
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let (_dir, path) = write_csv("id,name,genre\n,Nameless,pop\np2,Kept,rock\n");

        let playlists = read_playlists_csv(&path).expect("read csv");

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, "p2");
    }

    #[test]
    fn test_missing_id_column_is_an_error() {
        let (_dir, path) = write_csv("name,genre\nMorning Drive,pop\n");

        assert!(read_playlists_csv(&path).is_err());
    }
}
