//! # Integration Tests for Tagmine
//!
//! These tests exercise the full pipeline from a user perspective: CSV
//! import into the catalog database, the end-to-end clustering run, the
//! pinned boundary policies, and the exported result files.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use tagmine::catalog::{self, Playlist};
use tagmine::cluster::{assign_clusters, cluster_stats, TagClusterMap};
use tagmine::config::MiningConfig;
use tagmine::mood::{MoodMatch, MOOD_CLUSTER};
use tagmine::tags::{extract_tag_records, TagRecord};
use tagmine::{db, export, pipeline};

/// Test helper to create a temporary catalog database from CSV content
fn create_test_database(csv_content: &str) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let csv_path = temp_dir.path().join("playlists.csv");
    std::fs::write(&csv_path, csv_content)?;

    let playlists = catalog::read_playlists_csv(&csv_path)?;
    let db_path = temp_dir.path().join("test_playlists.db");
    db::init(&playlists, &db_path, false)?;

    Ok((temp_dir, db_path))
}

/// A small catalog with overlapping tags, a mood playlist and a tagless one
const SAMPLE_CSV: &str = "id,name,genre\n\
    p1,Morning Drive,\"Pop, Dance-Pop\"\n\
    p2,Gym Hits,\"pop, dance pop\"\n\
    p3,Charts,pop\n\
    p4,Garage Nights,\"rock, hard rock\"\n\
    p5,Mood Booster,pop\n\
    p6,Tagless,\n";

#[cfg(test)]
mod database_integration_tests {
    use super::*;

    #[test]
    fn test_import_and_retrieve_catalog() -> Result<()> {
        let (_temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;

        let conn = db::connect(&db_path)?;
        let playlists = db::retrieve_playlists(&conn)?;

        assert_eq!(playlists.len(), 6);
        assert_eq!(playlists[0].id, "p1");
        assert_eq!(playlists[0].genre.as_deref(), Some("Pop, Dance-Pop"));
        assert!(playlists[5].genre.is_none());

        Ok(())
    }

    #[test]
    fn test_reimport_requires_force() -> Result<()> {
        let (temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;

        let csv_path = temp_dir.path().join("playlists.csv");
        let playlists = catalog::read_playlists_csv(&csv_path)?;

        assert!(db::init(&playlists, &db_path, false).is_err());
        assert!(db::init(&playlists, &db_path, true).is_ok());

        Ok(())
    }
}

#[cfg(test)]
mod pipeline_integration_tests {
    use super::*;

    fn load_catalog(db_path: &std::path::Path) -> Result<Vec<Playlist>> {
        let conn = db::connect(db_path)?;
        db::retrieve_playlists(&conn)
    }

    #[test]
    fn test_full_run_is_deterministic() -> Result<()> {
        let (_temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;
        let catalog = load_catalog(&db_path)?;
        let config = MiningConfig::default();

        let first = pipeline::run(&catalog, &config)?;
        let second = pipeline::run(&catalog, &config)?;

        assert_eq!(first.mapping.entries(), second.mapping.entries());
        assert_eq!(first.membership, second.membership);
        assert_eq!(first.stats, second.stats);

        Ok(())
    }

    #[test]
    fn test_lift_boundary_excludes_rule_end_to_end() -> Result<()> {
        // The reference boundary scenario: within the pop-filtered sample,
        // "dance pop" -> "pop" scores confidence 1.0 and lift exactly 1.0.
        // Confidence clears the 0.9 cutoff and the consequent is the target
        // genre, so only the strict lift comparison excludes it.
        let csv = "id,name,genre\n\
            p1,A,\"pop, dance pop\"\n\
            p2,B,\"pop, dance pop\"\n\
            p3,C,pop\n\
            p4,D,rock\n\
            p5,E,rock\n";
        let (_temp_dir, db_path) = create_test_database(csv)?;
        let catalog = load_catalog(&db_path)?;

        let config = MiningConfig {
            sample_size: 5,
            ..MiningConfig::default()
        };
        let outcome = pipeline::run(&catalog, &config)?;

        assert!(!outcome
            .mapping
            .entries()
            .iter()
            .any(|(tag, cluster)| tag == "dance pop" && cluster == "pop"));

        // Pin the numbers the exclusion rests on.
        let records = extract_tag_records(&catalog);
        let sample: Vec<String> = vec!["p1", "p2", "p3", "p4", "p5"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let basket = tagmine::basket::BasketMatrix::build(&records, &sample)?;
        let itemsets = tagmine::mining::frequent_itemsets(&basket, "pop", config.min_support);

        let joint = itemsets
            .pairs
            .iter()
            .find(|(a, b, _)| a == "dance pop" && b == "pop")
            .expect("pair is frequent")
            .2;
        let confidence = joint / itemsets.single_support("dance pop").unwrap();
        let lift = confidence / itemsets.single_support("pop").unwrap();
        assert!((confidence - 1.0).abs() < 1e-10);
        assert!((lift - 1.0).abs() < 1e-10);

        Ok(())
    }

    #[test]
    fn test_coverage_accounting_matches_matrix() -> Result<()> {
        let (_temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;
        let catalog = load_catalog(&db_path)?;

        let outcome = pipeline::run(&catalog, &MiningConfig::default())?;

        let total = catalog::distinct_playlist_count(&catalog);
        assert_eq!(outcome.total_playlists, total);
        assert_eq!(
            outcome.unassigned_count(),
            total - outcome.membership.n_rows()
        );

        // Unassigned means: no mapped tag and no mood match.
        let all_ids: std::collections::HashSet<&str> =
            catalog.iter().map(|p| p.id.as_str()).collect();
        let assigned: std::collections::HashSet<&str> =
            outcome.membership.ids().iter().map(String::as_str).collect();
        assert_eq!(outcome.unassigned_count(), all_ids.difference(&assigned).count());

        Ok(())
    }

    #[test]
    fn test_mood_playlist_assigned_without_tags() -> Result<()> {
        let csv = "id,name,genre\n\
            p1,Workout,rock\n\
            p9,Sad songs,\n";
        let (_temp_dir, db_path) = create_test_database(csv)?;
        let catalog = load_catalog(&db_path)?;

        let outcome = pipeline::run(&catalog, &MiningConfig::default())?;

        // p9 has no genre tags at all, only the mood name match.
        assert!(outcome.membership.contains("p9", MOOD_CLUSTER));
        assert_eq!(outcome.membership.labels(), &[MOOD_CLUSTER.to_string()]);

        Ok(())
    }

    #[test]
    fn test_raising_min_support_never_adds_mapping_entries() -> Result<()> {
        let (_temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;
        let catalog = load_catalog(&db_path)?;

        let loose = pipeline::run(
            &catalog,
            &MiningConfig {
                min_support: 0.1,
                ..MiningConfig::default()
            },
        )?;
        let strict = pipeline::run(
            &catalog,
            &MiningConfig {
                min_support: 0.6,
                ..MiningConfig::default()
            },
        )?;

        for entry in strict.mapping.entries() {
            assert!(loose.mapping.entries().contains(entry));
        }

        Ok(())
    }
}

#[cfg(test)]
mod mapping_invariant_tests {
    use super::*;

    #[test]
    fn test_self_membership_invariant() {
        // Every cluster that appears in a mapping also contains itself.
        let rules = vec![
            tagmine::mining::Rule {
                antecedent: "dance pop".to_string(),
                consequent: "pop".to_string(),
                support: 0.4,
                confidence: 1.0,
                lift: 1.25,
            },
            tagmine::mining::Rule {
                antecedent: "soft rock".to_string(),
                consequent: "pop".to_string(),
                support: 0.3,
                confidence: 0.95,
                lift: 1.1,
            },
        ];

        let mut mapping = TagClusterMap::new();
        tagmine::cluster::map_genre_rules(&mut mapping, &rules, "pop");

        for (_, cluster) in mapping.entries() {
            assert!(
                mapping
                    .entries()
                    .iter()
                    .any(|(t, c)| t == cluster && c == cluster),
                "cluster '{cluster}' is missing its identity entry"
            );
        }
    }

    #[test]
    fn test_ambiguous_tag_keeps_all_clusters() {
        let mut mapping = TagClusterMap::new();
        mapping.push("soft rock", "rock");
        mapping.push("rock", "rock");
        mapping.push("soft rock", "pop");
        mapping.push("pop", "pop");

        let records = vec![TagRecord {
            playlist_id: "p1".to_string(),
            tag: "soft rock".to_string(),
        }];
        let matrix = assign_clusters(&records, &mapping, &[]);

        assert!(matrix.contains("p1", "rock"));
        assert!(matrix.contains("p1", "pop"));
    }

    #[test]
    fn test_duplicate_contributions_count_once() {
        // Two tags of the same playlist feed the pop cluster; the matrix
        // cell and the statistics must both count it once.
        let mut mapping = TagClusterMap::new();
        mapping.push("dance pop", "pop");
        mapping.push("pop", "pop");

        let records = vec![
            TagRecord {
                playlist_id: "p1".to_string(),
                tag: "pop".to_string(),
            },
            TagRecord {
                playlist_id: "p1".to_string(),
                tag: "dance pop".to_string(),
            },
        ];
        let matrix = assign_clusters(&records, &mapping, &[]);
        let stats = cluster_stats(&matrix);

        assert!(matrix.contains("p1", "pop"));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].num_playlists, 1);
        assert!((stats[0].perc_playlists - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_mood_match_merges_with_tag_assignments() {
        let mut mapping = TagClusterMap::new();
        mapping.push("dance pop", "pop");

        let records = vec![TagRecord {
            playlist_id: "p1".to_string(),
            tag: "dance pop".to_string(),
        }];
        let moods = vec![MoodMatch {
            playlist_id: "p1".to_string(),
            cluster: MOOD_CLUSTER.to_string(),
        }];
        let matrix = assign_clusters(&records, &mapping, &moods);

        assert!(matrix.contains("p1", "pop"));
        assert!(matrix.contains("p1", MOOD_CLUSTER));
        assert_eq!(matrix.n_rows(), 1);
    }
}

#[cfg(test)]
mod export_integration_tests {
    use super::*;

    #[test]
    fn test_full_run_exports_readable_csv() -> Result<()> {
        let (temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;
        let conn = db::connect(&db_path)?;
        let catalog = db::retrieve_playlists(&conn)?;

        let outcome = pipeline::run(&catalog, &MiningConfig::default())?;
        let out_dir = temp_dir.path().join("gen");
        export::export_results(&outcome, &out_dir)?;

        let clusters = std::fs::read_to_string(out_dir.join(export::CLUSTERS_FILE))?;
        let stats = std::fs::read_to_string(out_dir.join(export::STATS_FILE))?;

        assert!(clusters.starts_with("id"));
        assert!(stats.starts_with("label,num_playlists,perc_playlists"));
        // Row count in the file matches the matrix.
        assert_eq!(
            clusters.trim_end().lines().count(),
            outcome.membership.n_rows() + 1
        );

        Ok(())
    }

    #[test]
    fn test_export_is_byte_identical_across_runs() -> Result<()> {
        let (temp_dir, db_path) = create_test_database(SAMPLE_CSV)?;
        let conn = db::connect(&db_path)?;
        let catalog = db::retrieve_playlists(&conn)?;
        let config = MiningConfig::default();

        let dir_a = temp_dir.path().join("a");
        let dir_b = temp_dir.path().join("b");
        export::export_results(&pipeline::run(&catalog, &config)?, &dir_a)?;
        export::export_results(&pipeline::run(&catalog, &config)?, &dir_b)?;

        assert_eq!(
            std::fs::read(dir_a.join(export::CLUSTERS_FILE))?,
            std::fs::read(dir_b.join(export::CLUSTERS_FILE))?
        );
        assert_eq!(
            std::fs::read(dir_a.join(export::STATS_FILE))?,
            std::fs::read(dir_b.join(export::STATS_FILE))?
        );

        Ok(())
    }
}

#[cfg(test)]
mod cli_tests {
    use clap::CommandFactory;

    #[test]
    fn test_help_lists_all_commands() {
        let help = tagmine::cli::Args::command().render_long_help().to_string();

        assert!(help.contains("import"));
        assert!(help.contains("list"));
        assert!(help.contains("cluster"));
        assert!(help.contains("completion"));
    }
}
