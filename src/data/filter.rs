use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::model::{Dataset, PriceTier, Record};
use super::score;
use crate::chart::ColoringMode;

/// Category selection value meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "All Categories";

// ---------------------------------------------------------------------------
// Filter parameters: one snapshot of the sidebar controls
// ---------------------------------------------------------------------------

/// Closed interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Bounds { lo, hi }
    }

    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Everything a refresh needs to know about the current control values.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    /// Applied to `rounded_normalized_rating`.
    pub rating_range: Bounds<i64>,
    /// Applied to `total_reviews`.
    pub review_range: Bounds<u64>,
    pub prices: BTreeSet<PriceTier>,
    /// Empty, or containing [`ALL_CATEGORIES`], means no category filter.
    pub main_categories: Vec<String>,
    /// Names to call out on the chart; empty means no highlighting.
    pub highlighted: BTreeSet<String>,
    pub coloring: ColoringMode,
}

impl FilterParams {
    /// The "show everything" parameters for a dataset.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        FilterParams {
            rating_range: Bounds::new(0, 100),
            review_range: Bounds::new(0, dataset.max_total_reviews),
            prices: PriceTier::ALL.into_iter().collect(),
            main_categories: vec![ALL_CATEGORIES.to_string()],
            highlighted: BTreeSet::new(),
            coloring: ColoringMode::default(),
        }
    }

    fn category_filter_active(&self) -> bool {
        !self.main_categories.is_empty()
            && !self.main_categories.iter().any(|c| c == ALL_CATEGORIES)
    }

    /// The conjunctive inclusion predicate.
    pub fn matches(&self, record: &Record) -> bool {
        self.rating_range.contains(record.rounded_normalized_rating)
            && self.review_range.contains(record.total_reviews)
            && self.prices.contains(&record.price)
            && (!self.category_filter_active()
                || self.main_categories.contains(&record.main_category))
    }
}

// ---------------------------------------------------------------------------
// Filtered output
// ---------------------------------------------------------------------------

/// A record that survived filtering, with its score for the current subset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: Record,
    /// 0–100, relative to the other rows of the same [`FilteredTable`].
    pub score: f64,
}

/// Result of one filter pass. Independently owned; never aliases the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredTable {
    pub rows: Vec<ScoredRecord>,
}

impl FilteredTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|r| &r.record)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("rating range {0} is inverted")]
    InvertedRatingRange(Bounds<i64>),
    #[error("review count range {0} is inverted")]
    InvertedReviewRange(Bounds<u64>),
    #[error("score for {name:?} is not a finite number")]
    NonFiniteScore { name: String },
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Filter, sort by main category, and score.
///
/// Never fails: any error is logged and turned into an empty table, which the
/// chart builder renders the same way as "no matches".
pub fn filter(records: &[Record], params: &FilterParams) -> FilteredTable {
    match try_filter(records, params) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("Filtering failed, showing no restaurants: {e}");
            FilteredTable::default()
        }
    }
}

/// Fallible core of [`filter`].
pub fn try_filter(records: &[Record], params: &FilterParams) -> Result<FilteredTable, FilterError> {
    if params.rating_range.is_inverted() {
        return Err(FilterError::InvertedRatingRange(params.rating_range));
    }
    if params.review_range.is_inverted() {
        return Err(FilterError::InvertedReviewRange(params.review_range));
    }

    let mut kept: Vec<Record> = records
        .iter()
        .filter(|r| params.matches(r))
        .cloned()
        .collect();

    if kept.is_empty() {
        return Ok(FilteredTable::default());
    }

    // Stable, so ties keep file order.
    kept.sort_by(|a, b| a.main_category.cmp(&b.main_category));

    let raw: Vec<f64> = kept.iter().map(score::raw_score).collect();
    if let Some(bad) = raw.iter().position(|s| !s.is_finite()) {
        return Err(FilterError::NonFiniteScore {
            name: kept[bad].name.clone(),
        });
    }

    let rows = kept
        .into_iter()
        .zip(score::normalize(&raw))
        .map(|(record, score)| ScoredRecord { record, score })
        .collect();

    Ok(FilteredTable { rows })
}
