//! Mood playlist detection from display names.
//!
//! Some playlists are organized around a feeling rather than a genre
//! ("sad songs", "chill vibes"). Their genre tags rarely say so, but their
//! names do: a fixed keyword vocabulary is matched against the start of
//! each playlist name, and every hit lands the playlist in the single
//! "mood" cluster alongside the rule-derived genre clusters.

use crate::catalog::Playlist;
use crate::config::MOOD_KEYWORDS;
use log::info;
use std::collections::HashSet;

/// The one cluster label all mood matches share.
pub const MOOD_CLUSTER: &str = "mood";

/// A (playlist id, cluster label) pair produced by name matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodMatch {
    pub playlist_id: String,
    pub cluster: String,
}

/// Does a lowercased playlist name hit the keyword? Whole-word-or-prefix:
/// the name equals the keyword, or starts with the keyword followed by a
/// space. "mood booster" matches "mood", "moody tunes" does not.
fn name_matches(name: &str, keyword: &str) -> bool {
    name == keyword
        || (name.len() > keyword.len()
            && name.starts_with(keyword)
            && name.as_bytes()[keyword.len()] == b' ')
}

/// Scan the catalog for mood playlists.
///
/// Each matching playlist id appears once in the output no matter how many
/// keywords its name hits. Output follows catalog order.
#[must_use]
pub fn mood_matches(playlists: &[Playlist]) -> Vec<MoodMatch> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut matches = Vec::new();

    for playlist in playlists {
        if seen.contains(playlist.id.as_str()) {
            continue;
        }
        let name = playlist.name.to_lowercase();
        if MOOD_KEYWORDS.iter().any(|kw| name_matches(&name, kw)) {
            seen.insert(playlist.id.as_str());
            matches.push(MoodMatch {
                playlist_id: playlist.id.clone(),
                cluster: MOOD_CLUSTER.to_string(),
            });
        }
    }

    info!("Identified {} mood playlists", matches.len());
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: &str, name: &str) -> Playlist {
        Playlist {
            id: id.to_string(),
            name: name.to_string(),
            genre: None,
        }
    }

    #[test]
    fn test_exact_keyword_name_matches() {
        let matches = mood_matches(&[playlist("p1", "Mood")]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].playlist_id, "p1");
        assert_eq!(matches[0].cluster, MOOD_CLUSTER);
    }

    #[test]
    fn test_keyword_prefix_requires_space() {
        // "mood booster" matches; "moody" must not.
        let matches = mood_matches(&[
            playlist("p1", "Mood Booster"),
            playlist("p2", "Moody Tunes"),
        ]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].playlist_id, "p1");
    }

    #[test]
    fn test_keyword_mid_name_does_not_match() {
        let matches = mood_matches(&[playlist("p1", "In a Good Mood")]);

        assert!(matches.is_empty());
    }

    #[test]
    fn test_multiword_keyword() {
        let matches = mood_matches(&[playlist("p1", "Heart Broken anthems")]);

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_one_match_per_playlist() {
        // "sad" and "sadness" both hit; one MoodMatch comes out.
        let matches = mood_matches(&[playlist("p1", "Sad songs"), playlist("p1", "Sad songs")]);

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_non_mood_names_ignored() {
        let matches = mood_matches(&[
            playlist("p1", "Workout Bangers"),
            playlist("p2", "Deep Focus"),
        ]);

        assert!(matches.is_empty());
    }
}
