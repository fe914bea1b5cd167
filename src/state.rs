use std::collections::BTreeSet;

use food_grid::chart::ColoringMode;
use food_grid::config::Config;
use food_grid::dashboard::{DashboardView, Session};
use food_grid::data::filter::{ALL_CATEGORIES, Bounds, FilterParams};
use food_grid::data::model::PriceTier;

// ---------------------------------------------------------------------------
// Sidebar control values
// ---------------------------------------------------------------------------

/// Current widget values. Edited freely; only read when Refresh is pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub rating_lo: i64,
    pub rating_hi: i64,
    pub review_lo: u64,
    pub review_hi: u64,
    pub prices: BTreeSet<PriceTier>,
    /// May contain [`ALL_CATEGORIES`].
    pub main_categories: BTreeSet<String>,
    pub highlighted: BTreeSet<String>,
    pub coloring: ColoringMode,
    pub show_table: bool,
}

impl Controls {
    pub fn new(session: &Session, config: &Config) -> Self {
        let defaults = FilterParams::for_dataset(&session.dataset);
        Controls {
            rating_lo: defaults.rating_range.lo,
            rating_hi: defaults.rating_range.hi,
            review_lo: defaults.review_range.lo,
            review_hi: defaults.review_range.hi,
            prices: defaults.prices,
            main_categories: defaults.main_categories.into_iter().collect(),
            highlighted: defaults.highlighted,
            coloring: config.coloring(),
            show_table: config.show_table,
        }
    }

    /// Snapshot the widgets into filter parameters.
    pub fn params(&self) -> FilterParams {
        FilterParams {
            rating_range: Bounds::new(self.rating_lo, self.rating_hi),
            review_range: Bounds::new(self.review_lo, self.review_hi),
            prices: self.prices.clone(),
            main_categories: self.main_categories.iter().cloned().collect(),
            highlighted: self.highlighted.clone(),
            coloring: self.coloring,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset and colour map, fixed for the life of the window.
    pub session: Session,

    pub controls: Controls,

    /// Chart and table from the last refresh.
    pub view: DashboardView,

    /// Text typed into the highlight search box.
    pub highlight_query: String,
}

impl AppState {
    /// Build the state and render the initial chart.
    pub fn new(session: Session, config: &Config) -> Self {
        let controls = Controls::new(&session, config);
        let view = session.refresh(&controls.params(), controls.show_table);
        AppState {
            session,
            controls,
            view,
            highlight_query: String::new(),
        }
    }

    /// Recompute chart and table from the current controls.
    pub fn refresh(&mut self) {
        self.view = self
            .session
            .refresh(&self.controls.params(), self.controls.show_table);
    }

    pub fn toggle_price(&mut self, tier: PriceTier) {
        if !self.controls.prices.remove(&tier) {
            self.controls.prices.insert(tier);
        }
    }

    /// Picking a concrete category drops the "All Categories" sentinel.
    pub fn toggle_category(&mut self, category: &str) {
        let selected = &mut self.controls.main_categories;
        if category == ALL_CATEGORIES {
            selected.clear();
            selected.insert(ALL_CATEGORIES.to_string());
        } else if !selected.remove(category) {
            selected.remove(ALL_CATEGORIES);
            selected.insert(category.to_string());
        }
    }

    pub fn toggle_highlight(&mut self, name: &str) {
        if !self.controls.highlighted.remove(name) {
            self.controls.highlighted.insert(name.to_string());
        }
    }

    /// Names matching the search box, case-insensitively, at most `limit`.
    pub fn highlight_candidates(&self, limit: usize) -> Vec<&str> {
        let query = self.highlight_query.trim().to_lowercase();
        self.session
            .dataset
            .names
            .iter()
            .filter(|n| query.is_empty() || n.to_lowercase().contains(&query))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}
