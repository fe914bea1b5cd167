use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// PriceTier – the ordinal "$" … "$$$$" column
// ---------------------------------------------------------------------------

/// Price tier of a restaurant, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriceTier {
    One,
    Two,
    Three,
    Four,
}

impl PriceTier {
    /// All tiers, low → high.
    pub const ALL: [PriceTier; 4] = [
        PriceTier::One,
        PriceTier::Two,
        PriceTier::Three,
        PriceTier::Four,
    ];

    /// The dollar-sign symbol used in the source data and the UI.
    pub fn symbol(self) -> &'static str {
        match self {
            PriceTier::One => "$",
            PriceTier::Two => "$$",
            PriceTier::Three => "$$$",
            PriceTier::Four => "$$$$",
        }
    }

    /// Zero-based rank, low → high.
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown price tier {0:?} (expected one of $, $$, $$$, $$$$)")]
pub struct PriceParseError(pub String);

impl FromStr for PriceTier {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceTier::ALL
            .into_iter()
            .find(|tier| tier.symbol() == s.trim())
            .ok_or_else(|| PriceParseError(s.to_string()))
    }
}

impl TryFrom<String> for PriceTier {
    type Error = PriceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceTier> for String {
    fn from(tier: PriceTier) -> Self {
        tier.symbol().to_string()
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the review table
// ---------------------------------------------------------------------------

/// A single restaurant (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub main_category: String,
    /// Fine-grained tags.
    pub categories: Vec<String>,
    pub price: PriceTier,
    pub average_rating: f64,
    /// Rating rescaled to 0–100.
    pub normalized_rating: f64,
    pub rounded_normalized_rating: i64,
    pub total_reviews: u64,
    /// Review count rescaled to 0–100.
    pub normalized_total_reviews: f64,
    pub rounded_normalized_total_reviews: i64,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed lookup lists.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Distinct `main_category` values in first-appearance order.
    pub main_categories: Vec<String>,
    /// Distinct fine-grained tags in first-appearance order.
    pub categories: Vec<String>,
    /// Distinct restaurant names in first-appearance order.
    pub names: Vec<String>,
    /// Largest `total_reviews` seen (0 for an empty table).
    pub max_total_reviews: u64,
}

impl Dataset {
    /// Build the lookup lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut main_categories = Vec::new();
        let mut categories = Vec::new();
        let mut names = Vec::new();
        let mut seen_main: BTreeSet<&str> = BTreeSet::new();
        let mut seen_tags: BTreeSet<&str> = BTreeSet::new();
        let mut seen_names: BTreeSet<&str> = BTreeSet::new();

        for rec in &records {
            if seen_main.insert(&rec.main_category) {
                main_categories.push(rec.main_category.clone());
            }
            for tag in &rec.categories {
                if seen_tags.insert(tag) {
                    categories.push(tag.clone());
                }
            }
            if seen_names.insert(&rec.name) {
                names.push(rec.name.clone());
            }
        }

        let max_total_reviews = records.iter().map(|r| r.total_reviews).max().unwrap_or(0);

        Dataset {
            records,
            main_categories,
            categories,
            names,
            max_total_reviews,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(name: &str, main: &str, price: PriceTier, rating: f64, reviews: u64) -> Record {
        Record {
            name: name.to_string(),
            main_category: main.to_string(),
            categories: vec![main.to_string(), "Restaurants".to_string()],
            price,
            average_rating: 1.0 + rating * 0.04,
            normalized_rating: rating,
            rounded_normalized_rating: rating.round() as i64,
            total_reviews: reviews,
            normalized_total_reviews: reviews as f64 / 10.0,
            rounded_normalized_total_reviews: (reviews as f64 / 10.0).round() as i64,
            url: format!("https://example.com/{name}"),
        }
    }

    #[test]
    fn price_symbols_parse_in_order() {
        let parsed: Vec<PriceTier> = ["$", "$$", "$$$", "$$$$"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(parsed, PriceTier::ALL.to_vec());
        assert!(PriceTier::One < PriceTier::Four);
        assert!("$$$$$".parse::<PriceTier>().is_err());
    }

    #[test]
    fn dataset_indices_keep_first_appearance_order() {
        let ds = Dataset::from_records(vec![
            record("b", "Pizza", PriceTier::One, 50.0, 10),
            record("a", "Bars", PriceTier::Two, 60.0, 300),
            record("c", "Pizza", PriceTier::One, 70.0, 20),
        ]);
        assert_eq!(ds.main_categories, vec!["Pizza", "Bars"]);
        assert_eq!(ds.categories, vec!["Pizza", "Restaurants", "Bars"]);
        assert_eq!(ds.names, vec!["b", "a", "c"]);
        assert_eq!(ds.max_total_reviews, 300);
        assert_eq!(ds.len(), 3);
    }
}
