use plotters::prelude::*;

use crate::services::analytics::{classify, ColumnKind};
use crate::services::table::{coerce, Cell, Table};

use super::figure::{placeholder, Figure, FIGURE_HEIGHT, FIGURE_WIDTH};
use super::glyph::{sample_stride, LINE_GLYPH_CAP, SERIES_POINT_BUDGET};
use super::ChartSpec;

/// Line chart of a numeric column over an x column (or the row index), with
/// stride downsampling and fish markers along the displayed points.
pub fn render(table: &Table, spec: &ChartSpec) -> Figure {
    let Some(y_values) = spec.y_col.as_deref().and_then(|name| table.column(name)) else {
        return placeholder(&spec.title, "Pick a numeric Y column");
    };
    if classify(y_values) != ColumnKind::Numeric {
        return placeholder(&spec.title, "Pick a numeric Y column");
    }

    let x_values = spec.x_col.as_deref().and_then(|name| table.column(name));
    let x_numeric = x_values.map_or(false, |values| classify(values) == ColumnKind::Numeric);

    let stride = sample_stride(y_values.len(), SERIES_POINT_BUDGET);
    let points = sampled_points(x_values.filter(|_| x_numeric), y_values, stride);

    let mut figure = Figure::new(FIGURE_WIDTH, FIGURE_HEIGHT);
    if let Err(e) = draw(&mut figure, spec, &points) {
        tracing::warn!("line chart draw failed: {}", e);
    }
    figure
}

/// Every `stride`-th point; `None` marks a gap. A missing y is always a gap.
/// When a numeric x column is supplied, a missing x is a gap too rather than
/// a row-index stand-in that would land off-scale on a real-valued axis.
fn sampled_points(
    x_values: Option<&[Cell]>,
    y_values: &[Cell],
    stride: usize,
) -> Vec<Option<(f64, f64)>> {
    (0..y_values.len())
        .step_by(stride)
        .map(|idx| {
            let x = match x_values {
                Some(values) => coerce(&values[idx]).finite(),
                None => Some(idx as f64),
            };
            match (x, coerce(&y_values[idx]).finite()) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            }
        })
        .collect()
}

/// Runs of consecutive plotted points; gaps split the line into segments
/// instead of being interpolated.
fn finite_segments(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(point) => current.push(*point),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn draw(
    figure: &mut Figure,
    spec: &ChartSpec,
    points: &[Option<(f64, f64)>],
) -> Result<(), Box<dyn std::error::Error>> {
    let (w, h) = (figure.width(), figure.height());
    let root = BitMapBackend::with_buffer(figure.buffer_mut(), (w, h)).into_drawing_area();
    root.fill(&WHITE)?;

    let finite: Vec<(f64, f64)> = points.iter().flatten().copied().collect();
    if finite.is_empty() {
        root.present()?;
        return Ok(());
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &finite {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_col.clone().unwrap_or_else(|| "index".to_string()))
        .y_desc(spec.y_col.clone().unwrap_or_else(|| "value".to_string()))
        .draw()?;

    for segment in finite_segments(points) {
        chart.draw_series(LineSeries::new(segment, &BLUE))?;
    }

    let cap = spec.glyph_density_cap.unwrap_or(LINE_GLYPH_CAP).max(1);
    let glyph_stride = sample_stride(points.len(), cap as usize);
    let fin = RGBColor(230, 110, 40);
    for (i, point) in points.iter().enumerate() {
        if i % glyph_stride != 0 {
            continue;
        }
        let Some((x, y)) = *point else { continue };
        let marker = EmptyElement::at((x, y))
            + Circle::new((0, 0), 3, fin.filled())
            + Polygon::new(vec![(3, 0), (8, -4), (8, 4)], fin.filled());
        chart.plotting_area().draw(&marker)?;
    }

    root.present()?;
    Ok(())
}
