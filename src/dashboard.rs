use crate::chart::{self, ChartSpec};
use crate::color::ColorMap;
use crate::data::filter::{self, FilterParams};
use crate::data::model::Dataset;
use crate::table::{self, DisplayTable};

/// Read-only state shared by every refresh: the full dataset and the colour
/// map derived from it.
#[derive(Debug, Clone)]
pub struct Session {
    pub dataset: Dataset,
    pub color_map: ColorMap,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        let color_map = ColorMap::new(&dataset.main_categories);
        Session { dataset, color_map }
    }

    /// Run the full pipeline for one snapshot of the controls.
    pub fn refresh(&self, params: &FilterParams, show_table: bool) -> DashboardView {
        let filtered = filter::filter(&self.dataset.records, params);
        let chart = chart::build(&filtered, params.coloring, &params.highlighted, &self.color_map);
        let table = show_table.then(|| table::format_table(&filtered, &params.highlighted));

        log::debug!(
            "Refresh: {} of {} restaurants shown (coloring {:?}, {} highlighted)",
            filtered.len(),
            self.dataset.len(),
            params.coloring,
            params.highlighted.len()
        );

        DashboardView {
            shown: filtered.len(),
            chart,
            table,
        }
    }
}

/// Everything the front end draws after a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Number of restaurants that passed the filters.
    pub shown: usize,
    pub chart: ChartSpec,
    pub table: Option<DisplayTable>,
}
