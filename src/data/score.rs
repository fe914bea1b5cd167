//! Composite popularity score.
//!
//! The raw score rewards restaurants that are both well rated and heavily
//! reviewed; it is then min-max rescaled over whatever subset is currently
//! shown, so it has to be recomputed on every filter pass.

use super::model::Record;

/// `ln(rating*10 * reviews/100 + 1)`, exactly 0 when the product is 0.
pub fn raw_score(record: &Record) -> f64 {
    let product = record.normalized_rating * 10.0 * record.normalized_total_reviews / 100.0;
    if product == 0.0 {
        0.0
    } else {
        (product + 1.0).ln()
    }
}

/// Min-max rescale to `[0, 100]`, rounded to 2 decimals.
///
/// When every value is equal there is no spread to rescale and all scores
/// collapse to 0.
pub fn normalize(raw: &[f64]) -> Vec<f64> {
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    raw.iter()
        .map(|&v| {
            if range.abs() < f64::EPSILON {
                0.0
            } else {
                round_to((v - min) / range * 100.0, 2)
            }
        })
        .collect()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
