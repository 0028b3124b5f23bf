//! Basket matrix construction and deterministic sampling.
//!
//! Rule mining runs over a boolean playlist-by-tag presence matrix built
//! from a small random sample of the catalog. The sample is drawn with an
//! explicitly seeded RNG so that repeated runs over the same catalog
//! produce identical rule sets; the seed is threaded in as a parameter,
//! never taken from ambient global state.

use crate::tags::TagRecord;
use anyhow::{bail, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashSet};

/// Draw `sample_size` distinct playlist ids from the tag records.
///
/// The candidate population is the distinct id set of the records, sorted
/// before drawing so the only source of variation is the seed. When the
/// population is smaller than `sample_size`, every id is taken. The result
/// comes back sorted, ready to serve as basket row keys.
#[must_use]
pub fn sample_playlist_ids(records: &[TagRecord], sample_size: usize, seed: u64) -> Vec<String> {
    let population: BTreeSet<&str> = records.iter().map(|r| r.playlist_id.as_str()).collect();
    let population: Vec<&str> = population.into_iter().collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sample: Vec<String> = population
        .choose_multiple(&mut rng, sample_size.min(population.len()))
        .map(|id| (*id).to_string())
        .collect();
    sample.sort();

    debug!(
        "Sampled {} of {} playlist ids (seed {})",
        sample.len(),
        population.len(),
        seed
    );
    sample
}

/// Boolean playlist-by-tag presence matrix.
///
/// Rows are keyed by playlist id, columns by tag, both in sorted order.
/// A cell is `true` exactly when the playlist carries the tag; there are no
/// missing values. Built once per mining run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketMatrix {
    ids: Vec<String>,
    tags: Vec<String>,
    cells: Vec<Vec<bool>>,
}

impl BasketMatrix {
    /// Build the matrix from tag records restricted to the sampled ids.
    ///
    /// # Errors
    ///
    /// Every record must belong to the sample: a record whose playlist id
    /// is outside `sample` means the caller filtered incorrectly, and
    /// silently dropping or admitting it would mismatch rows, so this is a
    /// hard error.
    pub fn build(records: &[TagRecord], sample: &[String]) -> Result<Self> {
        let sample_set: HashSet<&str> = sample.iter().map(String::as_str).collect();

        for record in records {
            if !sample_set.contains(record.playlist_id.as_str()) {
                bail!(
                    "Tag record for playlist '{}' is outside the intended sample",
                    record.playlist_id
                );
            }
        }

        let ids: Vec<String> = records
            .iter()
            .map(|r| r.playlist_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let tags: Vec<String> = records
            .iter()
            .map(|r| r.tag.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut cells = vec![vec![false; tags.len()]; ids.len()];
        for record in records {
            // Binary search is fine here: both key vectors are sorted.
            let row = ids.binary_search(&record.playlist_id).unwrap_or_else(|_| unreachable!());
            let col = tags.binary_search(&record.tag).unwrap_or_else(|_| unreachable!());
            cells[row][col] = true;
        }

        debug!("Built {}x{} basket matrix", ids.len(), tags.len());
        Ok(Self { ids, tags, cells })
    }

    /// Row keys (sorted playlist ids).
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Column keys (sorted tags).
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Column index of `tag`, if the tag occurs anywhere in the basket.
    #[must_use]
    pub fn tag_index(&self, tag: &str) -> Option<usize> {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).ok()
    }

    /// Does row `row` carry the tag at column `col`?
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Indices of all rows where the given column is set.
    #[must_use]
    pub fn rows_with(&self, col: usize) -> Vec<usize> {
        (0..self.n_rows()).filter(|&r| self.cells[r][col]).collect()
    }
}
