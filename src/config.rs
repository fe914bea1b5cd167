use clap::{Parser, ValueEnum};

use crate::chart::ColoringMode;
use crate::data::loader::{DEFAULT_DATA_URL, DataSource};

/// Explore restaurant reviews on a rating / popularity grid.
#[derive(Debug, Clone, Parser)]
#[command(name = "food-grid", version, about)]
pub struct Config {
    /// CSV or JSON review table: a local path or an http(s) URL.
    #[arg(long, env = "FOOD_GRID_DATA", default_value = DEFAULT_DATA_URL)]
    pub data: String,

    /// Initial point colouring.
    #[arg(long, value_enum, default_value_t = ColoringArg::Category)]
    pub coloring: ColoringArg,

    /// Show the restaurant table under the chart on startup.
    #[arg(long)]
    pub show_table: bool,

    /// Window width in points.
    #[arg(long, default_value_t = 1300.0)]
    pub width: f32,

    /// Window height in points.
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}

/// `--coloring` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColoringArg {
    Category,
    Price,
    Score,
}

impl From<ColoringArg> for ColoringMode {
    fn from(arg: ColoringArg) -> Self {
        match arg {
            ColoringArg::Category => ColoringMode::Category,
            ColoringArg::Price => ColoringMode::Price,
            ColoringArg::Score => ColoringMode::Score,
        }
    }
}

impl Config {
    pub fn source(&self) -> DataSource {
        DataSource::parse(&self.data)
    }

    pub fn coloring(&self) -> ColoringMode {
        self.coloring.into()
    }
}
