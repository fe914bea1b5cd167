//! Property-based tests for the filter engine and score.
//!
//! # Invariants tested
//!
//! - **Soundness and completeness:** a record is kept exactly when it passes
//!   every predicate; an inverted range keeps nothing.
//! - **Idempotence:** filtering a filtered table again changes nothing.
//! - **Score bounds:** scores lie in `[0, 100]`, the lowest raw score maps to
//!   0 and the highest to 100, and a table with no spread scores all 0.
//! - **Highlight distinction:** highlighted points differ from the rest in
//!   colour and size in every colouring mode.

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::sample::subsequence;

use food_grid::chart::{self, ColoringMode, HIGHLIGHT_SIZE, OTHER_SIZE};
use food_grid::color::ColorMap;
use food_grid::data::filter::{ALL_CATEGORIES, Bounds, FilterParams, filter};
use food_grid::data::model::{Dataset, PriceTier, Record};
use food_grid::data::score;

const CATEGORIES: [&str; 4] = ["Bars", "Cafes", "French", "Pizza"];

/// A restaurant with an in-domain rating and review count. Names are made
/// unique by the table strategy.
fn record_strategy() -> impl Strategy<Value = Record> {
    (
        0..CATEGORIES.len(),
        0..PriceTier::ALL.len(),
        0.0_f64..=100.0,
        0_u64..=2_000,
    )
        .prop_map(|(cat, price, rating, reviews)| {
            let main = CATEGORIES[cat].to_string();
            Record {
                name: String::new(),
                categories: vec![main.clone()],
                main_category: main,
                price: PriceTier::ALL[price],
                average_rating: 1.0 + rating * 0.04,
                normalized_rating: rating,
                rounded_normalized_rating: rating.round() as i64,
                total_reviews: reviews,
                normalized_total_reviews: reviews as f64 / 20.0,
                rounded_normalized_total_reviews: (reviews as f64 / 20.0).round() as i64,
                url: String::new(),
            }
        })
}

fn table_strategy(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record_strategy(), 0..=max_len).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.name = format!("R{i}");
                r.url = format!("https://example.com/r{i}");
                r
            })
            .collect()
    })
}

/// Control values, including inverted and out-of-domain bounds, empty price
/// sets, unknown categories and the "all" sentinel.
fn params_strategy() -> impl Strategy<Value = FilterParams> {
    let categories: Vec<String> = CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .chain([ALL_CATEGORIES.to_string(), "Nowhere".to_string()])
        .collect();
    let max_categories = categories.len();
    (
        (-20_i64..=120, -20_i64..=120),
        (0_u64..=2_500, 0_u64..=2_500),
        subsequence(PriceTier::ALL.to_vec(), 0..=PriceTier::ALL.len()),
        subsequence(categories, 0..=max_categories),
        prop_oneof![
            Just(ColoringMode::Category),
            Just(ColoringMode::Price),
            Just(ColoringMode::Score),
        ],
    )
        .prop_map(|((r_lo, r_hi), (v_lo, v_hi), prices, main_categories, coloring)| FilterParams {
            rating_range: Bounds::new(r_lo, r_hi),
            review_range: Bounds::new(v_lo, v_hi),
            prices: prices.into_iter().collect(),
            main_categories,
            highlighted: BTreeSet::new(),
            coloring,
        })
}

/// Predicate written out independently of `FilterParams::matches`.
fn expected_kept(record: &Record, params: &FilterParams) -> bool {
    let category_open = params.main_categories.is_empty()
        || params.main_categories.iter().any(|c| c == ALL_CATEGORIES);
    params.rating_range.lo <= record.rounded_normalized_rating
        && record.rounded_normalized_rating <= params.rating_range.hi
        && params.review_range.lo <= record.total_reviews
        && record.total_reviews <= params.review_range.hi
        && params.prices.contains(&record.price)
        && (category_open || params.main_categories.contains(&record.main_category))
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 65536, ..ProptestConfig::with_cases(256) })]

    #[test]
    fn filter_is_sound_and_complete(
        records in table_strategy(40),
        params in params_strategy(),
    ) {
        let out = filter(&records, &params);
        let kept: BTreeSet<&str> = out.records().map(|r| r.name.as_str()).collect();
        prop_assert_eq!(kept.len(), out.len());

        let inverted = params.rating_range.is_inverted() || params.review_range.is_inverted();
        for r in &records {
            let expected = !inverted && expected_kept(r, &params);
            prop_assert_eq!(kept.contains(r.name.as_str()), expected, "{}", r.name);
        }

        let order: Vec<&str> = out.records().map(|r| r.main_category.as_str()).collect();
        prop_assert!(order.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn filter_is_idempotent(
        records in table_strategy(40),
        params in params_strategy(),
    ) {
        let once = filter(&records, &params);
        let again: Vec<Record> = once.records().cloned().collect();
        prop_assert_eq!(filter(&again, &params), once);
    }

    #[test]
    fn scores_follow_min_max_rule(
        records in table_strategy(40),
        params in params_strategy(),
    ) {
        let out = filter(&records, &params);
        prop_assume!(!out.is_empty());

        let scores: Vec<f64> = out.rows.iter().map(|r| r.score).collect();
        prop_assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));

        let raw: Vec<f64> = out.records().map(score::raw_score).collect();
        let lo = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if hi - lo < f64::EPSILON {
            prop_assert!(scores.iter().all(|s| *s == 0.0));
        } else {
            for (s, r) in scores.iter().zip(&raw) {
                if *r == lo {
                    prop_assert_eq!(*s, 0.0);
                }
                if *r == hi {
                    prop_assert_eq!(*s, 100.0);
                }
            }
        }
    }

    #[test]
    fn identical_restaurants_all_score_zero(
        template in record_strategy(),
        n in 1_usize..=20,
    ) {
        let records: Vec<Record> = (0..n)
            .map(|i| Record { name: format!("Twin {i}"), ..template.clone() })
            .collect();
        let ds = Dataset::from_records(records);
        let out = filter(&ds.records, &FilterParams::for_dataset(&ds));
        prop_assert_eq!(out.len(), n);
        prop_assert!(out.rows.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn highlighted_points_differ_in_colour_and_size(
        records in table_strategy(30).prop_filter("non-empty", |r| !r.is_empty()),
        picks in proptest::collection::btree_set(0_usize..30, 1..=5),
        coloring in prop_oneof![
            Just(ColoringMode::Category),
            Just(ColoringMode::Price),
            Just(ColoringMode::Score),
        ],
    ) {
        let ds = Dataset::from_records(records);
        let color_map = ColorMap::new(&ds.main_categories);
        let highlighted: BTreeSet<String> = picks
            .into_iter()
            .filter(|i| *i < ds.len())
            .map(|i| format!("R{i}"))
            .collect();
        prop_assume!(!highlighted.is_empty());

        let out = filter(&ds.records, &FilterParams::for_dataset(&ds));
        let spec = chart::build(&out, coloring, &highlighted, &color_map);
        let scatter = spec.as_scatter().expect("non-empty table gives a scatter chart");

        let (hi, other): (Vec<_>, Vec<_>) = scatter
            .points
            .iter()
            .partition(|p| highlighted.contains(&p.tooltip.name));
        prop_assert_eq!(hi.len(), highlighted.len());
        for h in &hi {
            prop_assert_eq!(h.size, HIGHLIGHT_SIZE);
            for o in &other {
                prop_assert_eq!(o.size, OTHER_SIZE);
                prop_assert_ne!(h.color, o.color);
            }
        }
    }
}
