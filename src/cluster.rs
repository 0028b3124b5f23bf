//! Tag-to-cluster mapping, membership assignment and cluster statistics.
//!
//! Accepted rules become a tag -> cluster mapping (one entry per rule plus
//! the genre's own identity entry), the mapping is joined back against the
//! full unsampled tag table, mood matches are merged in, and the result is
//! pivoted into a playlist-by-cluster membership matrix with per-cluster
//! counts on top.

use crate::mining::Rule;
use crate::mood::MoodMatch;
use crate::tags::TagRecord;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Deduplicated (tag, cluster) mapping entries.
///
/// A tag may legitimately map to several clusters (e.g. "soft rock" to both
/// rock and pop); entries are only dropped when they are exact duplicates,
/// never because the tag already maps elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagClusterMap {
    entries: Vec<(String, String)>,
    seen: HashSet<(String, String)>,
}

impl TagClusterMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (tag, cluster) entry, ignoring exact duplicates.
    pub fn push(&mut self, tag: &str, cluster: &str) {
        let key = (tag.to_string(), cluster.to_string());
        if self.seen.insert(key.clone()) {
            self.entries.push(key);
        }
    }

    /// All entries, in first-insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clusters the given tag maps to.
    pub fn clusters_for<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(t, _)| t == tag)
            .map(|(_, c)| c.as_str())
    }

    /// Distinct cluster labels, sorted.
    #[must_use]
    pub fn cluster_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, c)| c.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Turn one genre's accepted rules into mapping entries.
///
/// Every rule contributes its antecedent, and the genre contributes itself:
/// the identity entry is what guarantees a genre always lands in its own
/// cluster once any rule for it is accepted.
pub fn map_genre_rules(mapping: &mut TagClusterMap, rules: &[Rule], genre: &str) {
    for rule in rules {
        mapping.push(&rule.antecedent, genre);
        mapping.push(genre, genre);
    }
}

/// Boolean playlist-by-cluster membership matrix.
///
/// Rows exist only for playlists that earned at least one cluster, from a
/// mapped tag or a mood match. Absence of a row means "unassigned", which
/// callers must account for against the full catalog population rather
/// than against this matrix's own row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MembershipMatrix {
    ids: Vec<String>,
    labels: Vec<String>,
    cells: Vec<Vec<bool>>,
}

impl MembershipMatrix {
    /// Row keys (sorted playlist ids).
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Column keys (sorted cluster labels).
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Does the given playlist belong to the given cluster?
    #[must_use]
    pub fn contains(&self, playlist_id: &str, label: &str) -> bool {
        let Ok(row) = self.ids.binary_search_by(|id| id.as_str().cmp(playlist_id)) else {
            return false;
        };
        let Ok(col) = self.labels.binary_search_by(|l| l.as_str().cmp(label)) else {
            return false;
        };
        self.cells[row][col]
    }
}

/// Join the full tag table against the mapping, merge mood matches, and
/// pivot into the membership matrix.
///
/// A playlist whose every tag is uncovered by the mapping and that has no
/// mood match contributes no (id, cluster) pair and therefore no row.
/// Duplicate pairs (two tags feeding the same cluster, or a mood match
/// duplicating a tag-derived one) collapse before the pivot.
#[must_use]
pub fn assign_clusters(
    records: &[TagRecord],
    mapping: &TagClusterMap,
    moods: &[MoodMatch],
) -> MembershipMatrix {
    let mut pairs: BTreeSet<(String, String)> = BTreeSet::new();

    for record in records {
        for cluster in mapping.clusters_for(&record.tag) {
            pairs.insert((record.playlist_id.clone(), cluster.to_string()));
        }
    }
    for mood in moods {
        pairs.insert((mood.playlist_id.clone(), mood.cluster.clone()));
    }

    let ids: Vec<String> = pairs.iter().map(|(id, _)| id.clone()).collect::<BTreeSet<_>>().into_iter().collect();
    let labels: Vec<String> = pairs.iter().map(|(_, c)| c.clone()).collect::<BTreeSet<_>>().into_iter().collect();

    let mut cells = vec![vec![false; labels.len()]; ids.len()];
    for (id, cluster) in &pairs {
        let row = ids.binary_search(id).unwrap_or_else(|_| unreachable!());
        let col = labels.binary_search(cluster).unwrap_or_else(|_| unreachable!());
        cells[row][col] = true;
    }

    debug!(
        "Assigned {} playlists across {} clusters",
        ids.len(),
        labels.len()
    );
    MembershipMatrix { ids, labels, cells }
}

/// Per-cluster playlist count and share of the assigned population.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStat {
    pub label: String,
    pub num_playlists: usize,
    /// Percentage of the membership matrix's rows, 0..=100.
    pub perc_playlists: f64,
}

/// Count and percentage per cluster column, sorted by percentage
/// descending (label ascending on ties, for stable reports). An empty
/// matrix yields an empty set.
#[must_use]
pub fn cluster_stats(matrix: &MembershipMatrix) -> Vec<ClusterStat> {
    if matrix.is_empty() {
        return Vec::new();
    }

    let total = matrix.n_rows() as f64;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (col, label) in matrix.labels().iter().enumerate() {
        let count = (0..matrix.n_rows()).filter(|&r| matrix.cell(r, col)).count();
        counts.insert(label, count);
    }

    let mut stats: Vec<ClusterStat> = counts
        .into_iter()
        .map(|(label, num_playlists)| ClusterStat {
            label: label.to_string(),
            num_playlists,
            perc_playlists: num_playlists as f64 / total * 100.0,
        })
        .collect();

    // BTreeMap iteration gave label order; a stable sort on the percentage
    // keeps the label-ascending tiebreak.
    stats.sort_by(|a, b| {
        b.perc_playlists
            .partial_cmp(&a.perc_playlists)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}
