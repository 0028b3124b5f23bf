//! CSV export of clustering results.
//!
//! Two files land in the output directory (created on demand):
//! `playlist_clusters.csv`, the membership matrix with `id` as the row key
//! and one 0/1 column per cluster label, and `cluster_stats.csv` with one
//! row per cluster.

use crate::cluster::{ClusterStat, MembershipMatrix};
use crate::pipeline::ClusterOutcome;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// File name of the exported membership matrix.
pub const CLUSTERS_FILE: &str = "playlist_clusters.csv";
/// File name of the exported statistics table.
pub const STATS_FILE: &str = "cluster_stats.csv";

/// Write both result files into `out_dir`, creating it if needed.
pub fn export_results(outcome: &ClusterOutcome, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    write_membership_csv(&outcome.membership, &out_dir.join(CLUSTERS_FILE))?;
    write_stats_csv(&outcome.stats, &out_dir.join(STATS_FILE))?;

    info!("Exported results to {}", out_dir.display());
    Ok(())
}

/// Membership matrix as wide CSV: one row per assigned playlist, one
/// column per cluster label, cells 0/1.
pub fn write_membership_csv(matrix: &MembershipMatrix, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut header = vec!["id"];
    header.extend(matrix.labels().iter().map(String::as_str));
    writer.write_record(&header).context("Failed to write membership header")?;

    for (row, id) in matrix.ids().iter().enumerate() {
        let mut record = vec![id.clone()];
        for col in 0..matrix.labels().len() {
            record.push(if matrix.cell(row, col) { "1" } else { "0" }.to_string());
        }
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write membership row for playlist '{id}'"))?;
    }

    writer.flush().context("Failed to flush membership CSV")?;
    Ok(())
}

/// Statistics table as CSV, in the order the stats were computed (share
/// descending).
pub fn write_stats_csv(stats: &[ClusterStat], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record(["label", "num_playlists", "perc_playlists"])
        .context("Failed to write stats header")?;

    for stat in stats {
        writer
            .write_record([
                stat.label.clone(),
                stat.num_playlists.to_string(),
                format!("{:.1}", stat.perc_playlists),
            ])
            .with_context(|| format!("Failed to write stats row for cluster '{}'", stat.label))?;
    }

    writer.flush().context("Failed to flush stats CSV")?;
    Ok(())
}
