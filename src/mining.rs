//! Frequent itemset mining and association rule derivation.
//!
//! The miner is a level-wise pass over the basket matrix, capped at
//! itemsets of size 2: only genre-tag pairs are consumed downstream, so
//! longer itemsets would be wasted work. Support, confidence and lift are
//! computed directly from row counts rather than through a generic mining
//! library; the boundary policies (inclusive support and confidence
//! cutoffs, strictly-greater lift) are load-bearing and easier to keep
//! honest in plain code.

use crate::basket::BasketMatrix;
use log::{debug, trace};

/// Frequent itemsets of size 1 and 2, with their supports.
///
/// Supports are fractions of the *filtered* basket rows (those carrying the
/// target genre), per the mining contract. Singles and pairs are kept in
/// sorted tag order, so the collection iterates deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itemsets {
    /// (tag, support), sorted by tag.
    pub singles: Vec<(String, f64)>,
    /// (tag a, tag b, joint support) with `a < b`, sorted by (a, b).
    pub pairs: Vec<(String, String, f64)>,
}

impl Itemsets {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.pairs.is_empty()
    }

    /// Support of a single tag, if it met the threshold.
    #[must_use]
    pub fn single_support(&self, tag: &str) -> Option<f64> {
        self.singles
            .binary_search_by(|(t, _)| t.as_str().cmp(tag))
            .ok()
            .map(|i| self.singles[i].1)
    }
}

/// A directed two-item association rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Left side: the tag whose presence predicts the consequent.
    pub antecedent: String,
    /// Right side: always a main genre in this pipeline.
    pub consequent: String,
    /// Joint support of antecedent and consequent.
    pub support: f64,
    /// P(consequent | antecedent) within the filtered subset.
    pub confidence: f64,
    /// Confidence over the consequent's baseline support.
    pub lift: f64,
}

/// Mine frequent itemsets of size <= 2 for one target genre.
///
/// Rows are first restricted to playlists carrying `genre`; if the genre
/// column is absent or never set, the result is empty and the caller moves
/// on to the next genre. Level 1 keeps every column whose support over the
/// filtered rows meets `min_support` (inclusive); level 2 keeps every
/// unordered pair of level-1 survivors whose joint support does. No level 3
/// is computed.
#[must_use]
pub fn frequent_itemsets(basket: &BasketMatrix, genre: &str, min_support: f64) -> Itemsets {
    let Some(genre_col) = basket.tag_index(genre) else {
        trace!("Genre '{genre}' absent from basket; no itemsets");
        return Itemsets::default();
    };

    let rows = basket.rows_with(genre_col);
    if rows.is_empty() {
        trace!("Genre '{genre}' never set in basket; no itemsets");
        return Itemsets::default();
    }
    let n = rows.len() as f64;

    // Level 1: per-column support over the filtered rows.
    let mut singles: Vec<(usize, f64)> = Vec::new();
    for col in 0..basket.tags().len() {
        let count = rows.iter().filter(|&&r| basket.cell(r, col)).count();
        let support = count as f64 / n;
        if support >= min_support {
            singles.push((col, support));
        }
    }

    // Level 2: unordered pairs of level-1 survivors. Column order is sorted
    // tag order, so pairs come out with a < b already.
    let mut pairs: Vec<(usize, usize, f64)> = Vec::new();
    for i in 0..singles.len() {
        for j in (i + 1)..singles.len() {
            let (a, _) = singles[i];
            let (b, _) = singles[j];
            let count = rows
                .iter()
                .filter(|&&r| basket.cell(r, a) && basket.cell(r, b))
                .count();
            let support = count as f64 / n;
            if support >= min_support {
                pairs.push((a, b, support));
            }
        }
    }

    debug!(
        "Genre '{genre}': {} frequent singles, {} frequent pairs over {} rows",
        singles.len(),
        pairs.len(),
        rows.len()
    );

    let tags = basket.tags();
    Itemsets {
        singles: singles
            .into_iter()
            .map(|(col, s)| (tags[col].clone(), s))
            .collect(),
        pairs: pairs
            .into_iter()
            .map(|(a, b, s)| (tags[a].clone(), tags[b].clone(), s))
            .collect(),
    }
}

/// Derive, score and filter directed rules for one target genre.
///
/// Every size-2 itemset {A, B} yields both A->B and B->A. The filters run
/// in this exact order:
///
/// 1. keep rules with lift strictly greater than 1 (a rule no better than
///    chance is no rule at all, so the boundary itself is excluded);
/// 2. sort by confidence descending, ties by support descending;
/// 3. keep rules with confidence >= `min_confidence` (inclusive cutoff);
/// 4. keep only rules whose consequent is the target genre and whose
///    antecedent is not itself a recognized main genre.
///
/// The inclusive/strict asymmetry between steps 1 and 3 is intentional:
/// the confidence threshold is a tunable acceptance level, while lift > 1
/// is a structural better-than-chance requirement.
#[must_use]
pub fn derive_rules(
    itemsets: &Itemsets,
    genre: &str,
    min_confidence: f64,
    main_genres: &[String],
) -> Vec<Rule> {
    let mut rules: Vec<Rule> = Vec::new();

    for (a, b, joint_support) in &itemsets.pairs {
        for (antecedent, consequent) in [(a, b), (b, a)] {
            // Pair members are level-1 survivors, so both supports exist.
            let Some(antecedent_support) = itemsets.single_support(antecedent) else {
                continue;
            };
            let Some(consequent_support) = itemsets.single_support(consequent) else {
                continue;
            };

            let confidence = joint_support / antecedent_support;
            let lift = confidence / consequent_support;

            // Filter 1: strictly better than chance.
            if lift > 1.0 {
                rules.push(Rule {
                    antecedent: antecedent.clone(),
                    consequent: consequent.clone(),
                    support: *joint_support,
                    confidence,
                    lift,
                });
            }
        }
    }

    // Filter 2: order by confidence, then support, both descending. The
    // sort is stable and the input order is deterministic, so full ties
    // keep their pair order.
    rules.sort_by(|x, y| {
        y.confidence
            .partial_cmp(&x.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                y.support
                    .partial_cmp(&x.support)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });

    // Filters 3 and 4: confidence cutoff, then restrict to tag -> genre.
    let rules: Vec<Rule> = rules
        .into_iter()
        .filter(|r| r.confidence >= min_confidence)
        .filter(|r| r.consequent == genre && !main_genres.iter().any(|g| g == &r.antecedent))
        .collect();

    trace!("Genre '{genre}': {} rules accepted", rules.len());
    rules
}
