pub mod bar;
pub mod figure;
pub mod glyph;
pub mod line;
pub mod pie;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::services::table::Table;

pub use figure::{Figure, FIGURE_HEIGHT, FIGURE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Pie,
    Bar,
}

/// Input contract for all three renderers. A spec missing the columns its
/// chart kind needs renders a placeholder figure, never an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(default)]
    pub x_col: Option<String>,
    #[serde(default)]
    pub y_col: Option<String>,
    #[serde(default)]
    pub category_col: Option<String>,
    #[serde(default)]
    pub glyph_density_cap: Option<u32>,
}

/// Render a figure for `(table, spec)`. Stateless across calls; glyph
/// placement in the pie variant is randomized, with `seed` injectable so
/// tests can pin it down.
pub fn render(table: &Table, kind: ChartKind, spec: &ChartSpec, seed: Option<u64>) -> Figure {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    match kind {
        ChartKind::Line => line::render(table, spec),
        ChartKind::Pie => pie::render(table, spec, &mut rng),
        ChartKind::Bar => bar::render(table, spec),
    }
}
