use plotters::prelude::*;

use crate::services::analytics::aggregate::{top_sums, CategoryAggregation, MAX_SUM_BUCKETS};
use crate::services::table::Table;

use super::figure::{placeholder, Figure, FIGURE_HEIGHT, FIGURE_WIDTH};
use super::glyph::{glyph_count, stack_heights, BAR_GLYPH_CAP};
use super::ChartSpec;

/// Ranked bar chart of per-category sums, largest first, with fish glyphs
/// stacked inside each bar in proportion to its height.
pub fn render(table: &Table, spec: &ChartSpec) -> Figure {
    let (Some(category_col), Some(value_col)) =
        (spec.category_col.as_deref(), spec.y_col.as_deref())
    else {
        return placeholder(&spec.title, "Pick a category and numeric column");
    };
    let sums = top_sums(table, category_col, value_col, MAX_SUM_BUCKETS);
    if sums.is_empty() {
        return placeholder(&spec.title, "No rows to chart");
    }

    let mut figure = Figure::new(FIGURE_WIDTH, FIGURE_HEIGHT);
    if let Err(e) = draw(&mut figure, spec, &sums) {
        tracing::warn!("bar chart draw failed: {}", e);
    }
    figure
}

fn draw(
    figure: &mut Figure,
    spec: &ChartSpec,
    sums: &CategoryAggregation,
) -> Result<(), Box<dyn std::error::Error>> {
    let (w, h) = (figure.width(), figure.height());
    let root = BitMapBackend::with_buffer(figure.buffer_mut(), (w, h)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = sums.entries.iter().map(|(label, _)| label.clone()).collect();
    let values: Vec<f64> = sums.entries.iter().map(|(_, value)| *value).collect();
    let n = values.len();

    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let y_top = if max_value > 0.0 { max_value * 1.15 } else { 1.0 };
    let y_bottom = values.iter().copied().fold(0.0f64, f64::min);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(60)
        .y_label_area_size(56)
        .build_cartesian_2d(0f64..n as f64, y_bottom..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| {
            let idx = x.floor() as usize;
            labels.get(idx).cloned().unwrap_or_default()
        })
        .y_desc(spec.y_col.clone().unwrap_or_default())
        .draw()?;

    let cap = spec.glyph_density_cap.unwrap_or(BAR_GLYPH_CAP).max(1);
    for (i, value) in values.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *value)],
            color.filled(),
        )))?;

        let glyphs = glyph_count(*value, max_value, cap);
        for height in stack_heights(*value, glyphs) {
            let marker = EmptyElement::at((i as f64 + 0.5, height))
                + Circle::new((0, 0), 3, WHITE.filled())
                + Polygon::new(vec![(3, 0), (8, -4), (8, 4)], WHITE.filled());
            chart.plotting_area().draw(&marker)?;
        }
    }

    root.present()?;
    Ok(())
}
