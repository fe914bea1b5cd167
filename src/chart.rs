//! Scatter-chart construction.
//!
//! [`build`] turns a filtered table into a renderer-agnostic [`ChartSpec`]:
//! point positions, colours, marker sizes, hover payloads, legend and the
//! quadrant overlay. The egui front end only draws what it is given.

use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use thiserror::Error;

use crate::color::{self, ColorMap, HIGHLIGHT_COLOR, OTHER_COLOR};
use crate::data::filter::{FilteredTable, ScoredRecord};
use crate::data::model::PriceTier;

pub const TITLE: &str = "DC Restaurant Grid";
pub const X_AXIS_TITLE: &str = "Normalized Rating";
pub const Y_AXIS_TITLE: &str = "Popularity Score — Normalized Review Count";
pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 500.0;

pub const PLACEHOLDER_TITLE: &str = "No Restaurants Found";
pub const PLACEHOLDER_SUBTITLE: &str = "Please Try Adjusting Filters";
/// Opacity of the placeholder annotation.
pub const PLACEHOLDER_OPACITY: f32 = 0.5;

pub const OTHER_LABEL: &str = "Other";
pub const HIGHLIGHT_SIZE: f32 = 10.0;
pub const OTHER_SIZE: f32 = 2.0;
/// Marker size when highlighting is off.
pub const DEFAULT_SIZE: f32 = 6.0;

pub const SCORE_LEGEND_TITLE: &str =
    "Score: ln(rating × 10 × reviews / 100 + 1), rescaled 0–100 over the shown restaurants";

/// Quadrant lines are drawn only above this many points.
const QUADRANT_MIN_POINTS: usize = 4;
const RATING_MIDPOINT: f64 = 50.0;
/// Left label anchor when the lowest rating is 0 and the mean is above 25.
const LOW_X_FALLBACK: f64 = 20.0;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// How points are coloured when nothing is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColoringMode {
    #[default]
    Category,
    Price,
    Score,
}

impl ColoringMode {
    pub const ALL: [ColoringMode; 3] = [ColoringMode::Category, ColoringMode::Price, ColoringMode::Score];

    pub fn label(self) -> &'static str {
        match self {
            ColoringMode::Category => "Category",
            ColoringMode::Price => "Price",
            ColoringMode::Score => "Score",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// Shown instead of a chart when no restaurant passes the filters.
    Placeholder(Placeholder),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartSpec::Placeholder(_))
    }

    pub fn as_scatter(&self) -> Option<&ScatterChart> {
        match self {
            ChartSpec::Scatter(chart) => Some(chart),
            ChartSpec::Placeholder(_) => None,
        }
    }
}

/// A centred, semi-transparent message with no axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub opacity: f32,
}

impl Default for Placeholder {
    fn default() -> Self {
        Placeholder {
            title: PLACEHOLDER_TITLE,
            subtitle: PLACEHOLDER_SUBTITLE,
            opacity: PLACEHOLDER_OPACITY,
        }
    }
}

/// Hover behaviour requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverMode {
    /// Always select the nearest point, however far away the pointer is.
    Closest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub width: f32,
    pub height: f32,
    pub hover: HoverMode,
    pub points: Vec<ChartPoint>,
    pub legend: Legend,
    pub quadrants: Option<QuadrantOverlay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    /// Legend group this point belongs to.
    pub series: String,
    pub color: Color32,
    pub size: f32,
    pub tooltip: Tooltip,
}

/// Hover payload, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: String,
    /// Link target for the name.
    pub url: String,
    pub price: String,
    pub average_rating: String,
    pub normalized_rating: String,
    pub total_reviews: String,
    pub score: String,
}

impl Tooltip {
    fn from_row(row: &ScoredRecord) -> Self {
        let r = &row.record;
        Tooltip {
            name: r.name.clone(),
            url: r.url.clone(),
            price: r.price.symbol().to_string(),
            average_rating: format!("{:.2}", r.average_rating),
            normalized_rating: r.rounded_normalized_rating.to_string(),
            total_reviews: group_thousands(r.total_reviews),
            score: format!("{:.2}", row.score),
        }
    }

    /// `(label, value)` lines shown under the name.
    pub fn lines(&self) -> [(&'static str, &str); 5] {
        [
            ("Price", self.price.as_str()),
            ("Rating", self.average_rating.as_str()),
            ("Normalized Rating", self.normalized_rating.as_str()),
            ("Review Count", self.total_reviews.as_str()),
            ("Score", self.score.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    /// One swatch per series.
    Discrete {
        title: String,
        entries: Vec<(String, Color32)>,
    },
    /// A colour bar for a numeric column.
    Continuous { title: String, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantOverlay {
    /// Vertical line: mean normalized rating.
    pub x_mean: f64,
    /// Horizontal line: mean normalized review count.
    pub y_mean: f64,
    pub labels: Option<[QuadrantLabel; 4]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantLabel {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("series {0:?} labels both highlighted and other points")]
    AmbiguousSeries(String),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the chart for one refresh.
///
/// An empty table, or a failure while grouping highlighted points, yields the
/// placeholder chart.
pub fn build(
    table: &FilteredTable,
    coloring: ColoringMode,
    highlighted: &BTreeSet<String>,
    color_map: &ColorMap,
) -> ChartSpec {
    if table.is_empty() {
        return ChartSpec::Placeholder(Placeholder::default());
    }

    let encoded = if highlighted.is_empty() {
        Ok(encode_by_mode(table, coloring, color_map))
    } else {
        encode_highlight(table, highlighted)
    };

    let (points, legend) = match encoded {
        Ok(encoded) => encoded,
        Err(e) => {
            log::warn!("Highlight grouping failed, showing placeholder: {e}");
            return ChartSpec::Placeholder(Placeholder::default());
        }
    };

    ChartSpec::Scatter(ScatterChart {
        title: TITLE,
        x_title: X_AXIS_TITLE,
        y_title: Y_AXIS_TITLE,
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        hover: HoverMode::Closest,
        points,
        legend,
        quadrants: quadrant_overlay(table),
    })
}

fn point(row: &ScoredRecord, series: String, color: Color32, size: f32) -> ChartPoint {
    ChartPoint {
        x: row.record.normalized_rating,
        y: row.record.normalized_total_reviews,
        series,
        color,
        size,
        tooltip: Tooltip::from_row(row),
    }
}

/// Highlight-group membership of one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Highlighted,
    Other,
}

impl Group {
    fn style(self) -> (Color32, f32) {
        match self {
            Group::Highlighted => (HIGHLIGHT_COLOR, HIGHLIGHT_SIZE),
            Group::Other => (OTHER_COLOR, OTHER_SIZE),
        }
    }
}

/// Style comes only from group membership. Each series label must name a
/// single group, otherwise the legend could not tell the groups apart.
fn encode_highlight(
    table: &FilteredTable,
    highlighted: &BTreeSet<String>,
) -> Result<(Vec<ChartPoint>, Legend), ChartError> {
    let mut groups: BTreeMap<&str, Group> = BTreeMap::new();
    let mut entries: Vec<(String, Color32)> = Vec::new();
    let mut points = Vec::with_capacity(table.len());

    for row in &table.rows {
        let name = row.record.name.as_str();
        let (label, group) = if highlighted.contains(name) {
            (name, Group::Highlighted)
        } else {
            (OTHER_LABEL, Group::Other)
        };
        if *groups.entry(label).or_insert(group) != group {
            return Err(ChartError::AmbiguousSeries(label.to_string()));
        }

        let (color, size) = group.style();
        if !entries.iter().any(|(l, _)| l == label) {
            entries.push((label.to_string(), color));
        }
        points.push(point(row, label.to_string(), color, size));
    }

    let legend = Legend::Discrete {
        title: "Highlighted".to_string(),
        entries,
    };
    Ok((points, legend))
}

fn encode_by_mode(
    table: &FilteredTable,
    coloring: ColoringMode,
    color_map: &ColorMap,
) -> (Vec<ChartPoint>, Legend) {
    match coloring {
        ColoringMode::Category => {
            let points: Vec<ChartPoint> = table
                .rows
                .iter()
                .map(|row| {
                    let cat = &row.record.main_category;
                    point(row, cat.clone(), color_map.color_for(cat), DEFAULT_SIZE)
                })
                .collect();
            let entries = discrete_entries(&points);
            let legend = Legend::Discrete {
                title: "Category".to_string(),
                entries,
            };
            (points, legend)
        }
        ColoringMode::Price => {
            let points: Vec<ChartPoint> = table
                .rows
                .iter()
                .map(|row| {
                    let tier = row.record.price;
                    point(row, tier.symbol().to_string(), color::price_color(tier), DEFAULT_SIZE)
                })
                .collect();
            let present: BTreeSet<PriceTier> = table.records().map(|r| r.price).collect();
            let entries = present
                .into_iter()
                .map(|t| (t.symbol().to_string(), color::price_color(t)))
                .collect();
            let legend = Legend::Discrete {
                title: "Price".to_string(),
                entries,
            };
            (points, legend)
        }
        ColoringMode::Score => {
            let points = table
                .rows
                .iter()
                .map(|row| point(row, String::new(), color::score_color(row.score), DEFAULT_SIZE))
                .collect();
            let legend = Legend::Continuous {
                title: SCORE_LEGEND_TITLE.to_string(),
                min: 0.0,
                max: 100.0,
            };
            (points, legend)
        }
    }
}

/// Series in first-appearance order.
fn discrete_entries(points: &[ChartPoint]) -> Vec<(String, Color32)> {
    let mut entries: Vec<(String, Color32)> = Vec::new();
    for p in points {
        if !entries.iter().any(|(s, _)| *s == p.series) {
            entries.push((p.series.clone(), p.color));
        }
    }
    entries
}

// ---------------------------------------------------------------------------
// Quadrants
// ---------------------------------------------------------------------------

struct AxisStats {
    mean: f64,
    min: f64,
    max: f64,
}

impl AxisStats {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            n += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        AxisStats {
            mean: sum / n as f64,
            min,
            max,
        }
    }

    /// Halfway between the mean and the maximum.
    fn upper_anchor(&self) -> f64 {
        self.mean + (self.max - self.mean) / 2.0
    }
}

/// Mean lines for more than four points; labels only when ratings straddle 50.
pub fn quadrant_overlay(table: &FilteredTable) -> Option<QuadrantOverlay> {
    if table.len() <= QUADRANT_MIN_POINTS {
        return None;
    }

    let x = AxisStats::of(table.records().map(|r| r.normalized_rating));
    let y = AxisStats::of(table.records().map(|r| r.normalized_total_reviews));

    let labels = (x.min < RATING_MIDPOINT && x.max > RATING_MIDPOINT).then(|| {
        let high_x = x.upper_anchor();
        let low_x = if x.min == 0.0 && x.mean > 25.0 {
            LOW_X_FALLBACK
        } else {
            (x.mean - x.min) / 2.0
        };
        let high_y = y.upper_anchor();
        let low_y = y.min;

        [
            QuadrantLabel { text: "Deservedly Popular", x: high_x, y: high_y },
            QuadrantLabel { text: "Hidden Gems", x: high_x, y: low_y },
            QuadrantLabel { text: "Overrated", x: low_x, y: high_y },
            QuadrantLabel { text: "Not Worth It", x: low_x, y: low_y },
        ]
    });

    Some(QuadrantOverlay {
        x_mean: x.mean,
        y_mean: y.mean,
        labels,
    })
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterParams, filter};
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, Record};

    fn table(records: &[Record]) -> FilteredTable {
        let ds = Dataset::from_records(records.to_vec());
        filter(&ds.records, &FilterParams::for_dataset(&ds))
    }

    fn five() -> Vec<Record> {
        vec![
            record("a", "Pizza", PriceTier::One, 10.0, 100),
            record("b", "Pizza", PriceTier::Two, 30.0, 300),
            record("c", "Bars", PriceTier::Three, 60.0, 500),
            record("d", "Bars", PriceTier::Four, 80.0, 200),
            record("e", "French", PriceTier::Two, 70.0, 400),
        ]
    }

    fn cmap(records: &[Record]) -> ColorMap {
        ColorMap::new(&Dataset::from_records(records.to_vec()).main_categories)
    }

    #[test]
    fn empty_table_gives_placeholder() {
        let chart = build(
            &FilteredTable::default(),
            ColoringMode::Score,
            &BTreeSet::new(),
            &ColorMap::new(&[]),
        );
        match chart {
            ChartSpec::Placeholder(p) => {
                assert_eq!(p.title, "No Restaurants Found");
                assert_eq!(p.subtitle, "Please Try Adjusting Filters");
                assert!(p.opacity < 1.0);
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn category_mode_uses_session_colors() {
        let records = five();
        let map = cmap(&records);
        let chart = build(&table(&records), ColoringMode::Category, &BTreeSet::new(), &map);
        let scatter = chart.as_scatter().unwrap();
        assert_eq!(scatter.points.len(), 5);
        for p in &scatter.points {
            assert_eq!(p.color, map.color_for(&p.series));
        }
        match &scatter.legend {
            Legend::Discrete { title, entries } => {
                assert_eq!(title, "Category");
                let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, vec!["Bars", "French", "Pizza"]);
            }
            other => panic!("unexpected legend {other:?}"),
        }
    }

    #[test]
    fn price_mode_one_shade_per_tier() {
        let records = five();
        let chart = build(&table(&records), ColoringMode::Price, &BTreeSet::new(), &cmap(&records));
        let scatter = chart.as_scatter().unwrap();
        for p in &scatter.points {
            let tier: PriceTier = p.series.parse().unwrap();
            assert_eq!(p.color, color::price_color(tier));
        }
        let Legend::Discrete { entries, .. } = &scatter.legend else {
            panic!("expected discrete legend");
        };
        let tiers: Vec<&str> = entries.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tiers, vec!["$", "$$", "$$$", "$$$$"]);
    }

    #[test]
    fn score_mode_is_continuous() {
        let records = five();
        let t = table(&records);
        let chart = build(&t, ColoringMode::Score, &BTreeSet::new(), &cmap(&records));
        let scatter = chart.as_scatter().unwrap();
        for (p, row) in scatter.points.iter().zip(&t.rows) {
            assert_eq!(p.color, color::score_color(row.score));
        }
        match &scatter.legend {
            Legend::Continuous { title, min, max } => {
                assert!(title.starts_with("Score"));
                assert!(title.contains("ln(rating × 10 × reviews / 100 + 1)"));
                assert!(title.contains("rescaled 0–100"));
                assert_eq!((*min, *max), (0.0, 100.0));
            }
            other => panic!("expected colour bar legend, got {other:?}"),
        }
    }

    #[test]
    fn highlight_overrides_every_mode() {
        let records = five();
        let t = table(&records);
        let highlighted: BTreeSet<String> = ["c".to_string(), "zzz".to_string()].into_iter().collect();
        for mode in ColoringMode::ALL {
            let chart = build(&t, mode, &highlighted, &cmap(&records));
            let scatter = chart.as_scatter().unwrap();
            for p in &scatter.points {
                if p.tooltip.name == "c" {
                    assert_eq!((p.series.as_str(), p.color, p.size), ("c", HIGHLIGHT_COLOR, HIGHLIGHT_SIZE));
                } else {
                    assert_eq!((p.series.as_str(), p.color, p.size), (OTHER_LABEL, OTHER_COLOR, OTHER_SIZE));
                }
            }
        }
    }

    #[test]
    fn highlighted_restaurant_named_like_the_other_group() {
        let mut records = five();
        records.push(record(OTHER_LABEL, "Bars", PriceTier::One, 50.0, 50));
        let t = table(&records);
        let map = cmap(&records);

        let highlighted: BTreeSet<String> = [OTHER_LABEL.to_string()].into_iter().collect();
        assert_eq!(
            encode_highlight(&t, &highlighted).unwrap_err(),
            ChartError::AmbiguousSeries(OTHER_LABEL.to_string())
        );
        for mode in ColoringMode::ALL {
            assert!(build(&t, mode, &highlighted, &map).is_placeholder());
        }

        // Not highlighted, it simply joins the grey group.
        let highlighted: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        let chart = build(&t, ColoringMode::Category, &highlighted, &map);
        let scatter = chart.as_scatter().unwrap();
        let named_other = scatter.points.iter().find(|p| p.tooltip.name == OTHER_LABEL).unwrap();
        assert_eq!((named_other.color, named_other.size), (OTHER_COLOR, OTHER_SIZE));
        let a = scatter.points.iter().find(|p| p.tooltip.name == "a").unwrap();
        assert_eq!((a.color, a.size), (HIGHLIGHT_COLOR, HIGHLIGHT_SIZE));
    }

    #[test]
    fn highlight_without_collision_has_one_style_per_group() {
        let records = five();
        let t = table(&records);
        let highlighted: BTreeSet<String> = ["b".to_string(), "d".to_string()].into_iter().collect();
        let (points, legend) = encode_highlight(&t, &highlighted).unwrap();
        assert_eq!(points.iter().filter(|p| p.size == HIGHLIGHT_SIZE).count(), 2);
        let Legend::Discrete { entries, .. } = legend else {
            panic!("expected discrete legend");
        };
        let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        // Rows are sorted by main category: Bars (c, d), French (e), Pizza (a, b).
        assert_eq!(labels, vec![OTHER_LABEL, "d", "b"]);
    }

    #[test]
    fn tooltip_formatting() {
        let mut r = record("Big Place", "Bars", PriceTier::Three, 61.234, 1_234_567);
        r.average_rating = 4.2571;
        let t = table(&[r]);
        let map = ColorMap::new(&["Bars".to_string()]);
        let chart = build(&t, ColoringMode::Category, &BTreeSet::new(), &map);
        let tip = &chart.as_scatter().unwrap().points[0].tooltip;
        assert_eq!(tip.price, "$$$");
        assert_eq!(tip.average_rating, "4.26");
        assert_eq!(tip.normalized_rating, "61");
        assert_eq!(tip.total_reviews, "1,234,567");
        assert_eq!(tip.score, "0.00");
        assert_eq!(tip.url, "https://example.com/Big Place");
    }

    #[test]
    fn no_quadrants_for_four_points() {
        let records = five();
        let t = table(&records[..4]);
        assert!(quadrant_overlay(&t).is_none());
    }

    #[test]
    fn quadrant_lines_and_labels() {
        let records = five();
        let q = quadrant_overlay(&table(&records)).unwrap();
        // ratings 10,30,60,80,70 → mean 50; reviews/10 → 10,30,50,20,40 → mean 30
        assert!((q.x_mean - 50.0).abs() < 1e-9);
        assert!((q.y_mean - 30.0).abs() < 1e-9);

        let labels = q.labels.unwrap();
        let by_text = |t: &str| labels.iter().find(|l| l.text == t).unwrap().clone();
        let popular = by_text("Deservedly Popular");
        assert!((popular.x - 65.0).abs() < 1e-9);
        assert!((popular.y - 40.0).abs() < 1e-9);
        let gems = by_text("Hidden Gems");
        assert!((gems.x - 65.0).abs() < 1e-9);
        assert!((gems.y - 10.0).abs() < 1e-9);
        let overrated = by_text("Overrated");
        assert!((overrated.x - 20.0).abs() < 1e-9);
        assert!((overrated.y - 40.0).abs() < 1e-9);
        let skip = by_text("Not Worth It");
        assert!((skip.x - 20.0).abs() < 1e-9);
        assert!((skip.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn low_x_fallback_when_minimum_is_zero() {
        let mut records = five();
        records[0].normalized_rating = 0.0;
        let q = quadrant_overlay(&table(&records)).unwrap();
        // mean = 48 > 25 and min == 0
        let labels = q.labels.unwrap();
        assert_eq!(labels[2].x, 20.0);
        assert_eq!(labels[3].x, 20.0);
    }

    #[test]
    fn no_labels_when_ratings_do_not_straddle_midpoint() {
        let records: Vec<Record> = (0..6)
            .map(|i| record(&format!("r{i}"), "Pizza", PriceTier::One, 55.0 + i as f64, 10 * i))
            .collect();
        let q = quadrant_overlay(&table(&records)).unwrap();
        assert!(q.labels.is_none());
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}
