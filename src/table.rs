//! Display-ready row table for the filtered restaurants.

use std::collections::BTreeSet;

use crate::data::filter::{FilteredTable, ScoredRecord};

/// Source column names, in display order.
pub const COLUMNS: [&str; 9] = [
    "name",
    "main_category",
    "categories",
    "price",
    "average_rating",
    "rounded_normalized_rating",
    "total_reviews",
    "rounded_normalized_total_reviews",
    "score",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `rounded_normalized_rating` → `Normalized Rating`.
pub fn humanize_header(column: &str) -> String {
    let titled = column
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");

    match titled.strip_prefix("Rounded ") {
        Some(rest) => rest.to_string(),
        None => titled,
    }
}

fn cells(row: &ScoredRecord) -> Vec<String> {
    let r = &row.record;
    vec![
        r.name.clone(),
        r.main_category.clone(),
        r.categories.join(", "),
        r.price.symbol().to_string(),
        format!("{:.3}", r.average_rating),
        r.rounded_normalized_rating.to_string(),
        r.total_reviews.to_string(),
        r.rounded_normalized_total_reviews.to_string(),
        format!("{:.2}", row.score),
    ]
}

/// Project, humanize and sort the filtered rows.
///
/// A non-empty highlight set restricts the table to those restaurants.
/// Rows are ordered best-rated first, ties broken by review count.
pub fn format_table(table: &FilteredTable, highlighted: &BTreeSet<String>) -> DisplayTable {
    let mut rows: Vec<&ScoredRecord> = table
        .rows
        .iter()
        .filter(|row| highlighted.is_empty() || highlighted.contains(&row.record.name))
        .collect();

    rows.sort_by(|a, b| {
        let key = |r: &ScoredRecord| {
            (
                r.record.rounded_normalized_rating,
                r.record.rounded_normalized_total_reviews,
            )
        };
        key(b).cmp(&key(a))
    });

    DisplayTable {
        headers: COLUMNS.iter().map(|c| humanize_header(c)).collect(),
        rows: rows.into_iter().map(cells).collect(),
    }
}
