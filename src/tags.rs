//! Tag-record extraction and normalization.
//!
//! A playlist's raw genre field is comma-separated free text ("Pop,
//! Dance-Pop , rock"). Splitting and normalizing it yields the
//! `(playlist_id, tag)` pairs every later stage works on. Normalization is
//! lowercase, hyphens to spaces, then trim; duplicates after normalization
//! are removed here explicitly rather than relying on the basket pivot to
//! collapse them.

use crate::catalog::Playlist;
use log::debug;
use std::collections::HashSet;

/// A single (playlist id, normalized tag) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagRecord {
    pub playlist_id: String,
    pub tag: String,
}

/// Normalize one raw tag fragment. Returns `None` when nothing is left
/// after trimming (e.g. a stray comma produced an empty fragment).
#[must_use]
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.to_lowercase().replace('-', " ");
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

/// Split every playlist's genre field into deduplicated tag records.
///
/// Playlists without a genre field contribute nothing. Record order follows
/// catalog order, so the output is deterministic for a given catalog.
#[must_use]
pub fn extract_tag_records(playlists: &[Playlist]) -> Vec<TagRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut records = Vec::new();

    for playlist in playlists {
        let Some(genre) = &playlist.genre else {
            continue;
        };

        for fragment in genre.split(',') {
            let Some(tag) = normalize_tag(fragment) else {
                continue;
            };
            if seen.insert((playlist.id.clone(), tag.clone())) {
                records.push(TagRecord {
                    playlist_id: playlist.id.clone(),
                    tag,
                });
            }
        }
    }

    debug!(
        "Extracted {} tag records from {} playlists",
        records.len(),
        playlists.len()
    );
    records
}
