//! Restaurant review explorer.
//!
//! Loads a table of restaurant reviews once, then on every refresh filters
//! it, scores the surviving restaurants relative to each other, and describes
//! a rating-vs-popularity scatter chart (plus an optional row table) for the
//! egui front end to draw.
//!
//! ```no_run
//! use food_grid::dashboard::Session;
//! use food_grid::data::filter::FilterParams;
//! use food_grid::data::loader::{DataSource, load_source};
//!
//! let dataset = load_source(&DataSource::parse("reviews.csv")).expect("load reviews");
//! let session = Session::new(dataset);
//! let params = FilterParams::for_dataset(&session.dataset);
//! let view = session.refresh(&params, true);
//! println!("{} restaurants shown", view.shown);
//! ```

pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod table;
