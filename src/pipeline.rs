//! The full clustering pipeline.
//!
//! One call wires the stages together: tag extraction, seeded sampling,
//! basket construction, per-genre rule mining, mapping union, mood
//! matching, membership assignment and statistics. Each stage returns a
//! fresh value consumed by the next; nothing is mutated across stage
//! boundaries, which is what makes the determinism guarantee cheap to
//! keep.

use crate::basket::{sample_playlist_ids, BasketMatrix};
use crate::catalog::{distinct_playlist_count, Playlist};
use crate::cluster::{
    assign_clusters, cluster_stats, map_genre_rules, ClusterStat, MembershipMatrix, TagClusterMap,
};
use crate::config::MiningConfig;
use crate::mining::{derive_rules, frequent_itemsets};
use crate::mood::mood_matches;
use crate::tags::extract_tag_records;
use anyhow::Result;
use log::info;
use rayon::prelude::*;
use std::collections::HashSet;

/// Everything one clustering run produces.
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    /// Deduplicated tag -> cluster mapping from all genres' accepted rules.
    pub mapping: TagClusterMap,
    /// Playlist-by-cluster membership matrix (tag-derived plus mood).
    pub membership: MembershipMatrix,
    /// Per-cluster counts, sorted by share descending.
    pub stats: Vec<ClusterStat>,
    /// Distinct playlist ids in the raw catalog.
    pub total_playlists: usize,
}

impl ClusterOutcome {
    /// Playlists that earned no cluster at all.
    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.total_playlists - self.membership.n_rows()
    }

    /// Share of the catalog left unassigned, 0..=100.
    #[must_use]
    pub fn unassigned_pct(&self) -> f64 {
        if self.total_playlists == 0 {
            return 0.0;
        }
        self.unassigned_count() as f64 / self.total_playlists as f64 * 100.0
    }
}

/// Run the whole pipeline over one catalog snapshot.
///
/// Mining happens on a small seeded sample; assignment joins the resulting
/// mapping back against the *full* tag table, so rules learned from the
/// sample label the whole catalog. Genres mine independently and in
/// parallel; results are collected in vocabulary order, so the output is
/// identical run to run for a fixed catalog, seed and config.
pub fn run(playlists: &[Playlist], config: &MiningConfig) -> Result<ClusterOutcome> {
    let records = extract_tag_records(playlists);

    let sample = sample_playlist_ids(&records, config.sample_size, config.random_seed);
    let sample_set: HashSet<&str> = sample.iter().map(String::as_str).collect();
    let sampled_records: Vec<_> = records
        .iter()
        .filter(|r| sample_set.contains(r.playlist_id.as_str()))
        .cloned()
        .collect();
    let basket = BasketMatrix::build(&sampled_records, &sample)?;

    info!(
        "Mining {} genres over a {}x{} basket (min_support {}, min_confidence {})",
        config.main_genres.len(),
        basket.n_rows(),
        basket.tags().len(),
        config.min_support,
        config.min_confidence
    );

    // Each genre's mining run only reads the basket; fan out, then union
    // the per-genre mappings in vocabulary order.
    let per_genre: Vec<Vec<(String, String)>> = config
        .main_genres
        .par_iter()
        .map(|genre| {
            let itemsets = frequent_itemsets(&basket, genre, config.min_support);
            let rules = derive_rules(&itemsets, genre, config.min_confidence, &config.main_genres);
            let mut genre_mapping = TagClusterMap::new();
            map_genre_rules(&mut genre_mapping, &rules, genre);
            genre_mapping.entries().to_vec()
        })
        .collect();

    let mut mapping = TagClusterMap::new();
    for entries in &per_genre {
        for (tag, cluster) in entries {
            mapping.push(tag, cluster);
        }
    }
    info!(
        "Accepted {} mapping entries across {} clusters",
        mapping.len(),
        mapping.cluster_labels().len()
    );

    let moods = mood_matches(playlists);
    let membership = assign_clusters(&records, &mapping, &moods);
    let stats = cluster_stats(&membership);

    let outcome = ClusterOutcome {
        mapping,
        membership,
        stats,
        total_playlists: distinct_playlist_count(playlists),
    };
    info!(
        "{:.1}% of all playlists is not assigned to any cluster",
        outcome.unassigned_pct()
    );
    Ok(outcome)
}
