use std::f64::consts::PI;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rand::rngs::StdRng;

use crate::services::analytics::aggregate::{top_counts, CategoryAggregation, MAX_COUNT_BUCKETS};
use crate::services::table::Table;

use super::figure::{placeholder, Figure, FIGURE_HEIGHT, FIGURE_WIDTH};
use super::glyph::{glyph_count, wedge_placements, PIE_GLYPH_CAP};
use super::ChartSpec;

/// Pie of the top-8 category counts. The denominator is the top-8 total, so
/// the chart shows the leaders' internal distribution, not the whole
/// population. Fish glyphs are scattered inside each wedge in proportion to
/// its share.
pub fn render(table: &Table, spec: &ChartSpec, rng: &mut StdRng) -> Figure {
    let Some(category_col) = spec.category_col.as_deref() else {
        return placeholder(&spec.title, "Pick a category column");
    };
    let counts = top_counts(table, category_col, MAX_COUNT_BUCKETS);
    if counts.is_empty() {
        return placeholder(&spec.title, "No rows to chart");
    }

    let mut figure = Figure::new(FIGURE_WIDTH, FIGURE_HEIGHT);
    if let Err(e) = draw(&mut figure, spec, &counts, rng) {
        tracing::warn!("pie chart draw failed: {}", e);
    }
    figure
}

fn draw(
    figure: &mut Figure,
    spec: &ChartSpec,
    counts: &CategoryAggregation,
    rng: &mut StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    let (w, h) = (figure.width(), figure.height());
    let root = BitMapBackend::with_buffer(figure.buffer_mut(), (w, h)).into_drawing_area();
    root.fill(&WHITE)?;

    let title_style = ("sans-serif", 24)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(spec.title.clone(), ((w / 2) as i32, 16), title_style))?;

    let cx = w as i32 / 2;
    let cy = h as i32 / 2 + 12;
    let radius = f64::from(w.min(h)) * 0.35;

    let total: f64 = counts.entries.iter().map(|(_, value)| value).sum();
    let total = if total > 0.0 { total } else { 1.0 };
    let cap = spec.glyph_density_cap.unwrap_or(PIE_GLYPH_CAP).max(1);

    let mut start = -PI / 2.0;
    for (i, (label, value)) in counts.entries.iter().enumerate() {
        let sweep = value / total * 2.0 * PI;
        let end = start + sweep;
        let color = Palette99::pick(i).mix(0.85);

        // Wedge as a polygon fan around the center
        let steps = ((sweep / (PI / 32.0)).ceil() as usize).max(3);
        let mut outline = vec![(cx, cy)];
        for step in 0..=steps {
            let angle = start + sweep * step as f64 / steps as f64;
            outline.push((
                cx + (radius * angle.cos()) as i32,
                cy + (radius * angle.sin()) as i32,
            ));
        }
        root.draw(&Polygon::new(outline, color.filled()))?;

        let mid = (start + end) / 2.0;
        let label_style = ("sans-serif", 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            label.clone(),
            (
                cx + (radius * 1.14 * mid.cos()) as i32,
                cy + (radius * 1.14 * mid.sin()) as i32,
            ),
            label_style,
        ))?;

        let glyphs = glyph_count(*value, total, cap);
        for (angle, fraction) in wedge_placements(rng, start, end, glyphs) {
            let gx = cx + (radius * fraction * angle.cos()) as i32;
            let gy = cy + (radius * fraction * angle.sin()) as i32;
            root.draw(&Circle::new((gx, gy), 3, WHITE.filled()))?;
            root.draw(&Polygon::new(
                vec![(gx + 3, gy), (gx + 8, gy - 4), (gx + 8, gy + 4)],
                WHITE.filled(),
            ))?;
        }

        start = end;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::table::Cell;
    use rand::SeedableRng;

    fn site_table() -> Table {
        let mut rows = Vec::new();
        for _ in 0..6 {
            rows.push(vec![Cell::text("north")]);
        }
        for _ in 0..3 {
            rows.push(vec![Cell::text("south")]);
        }
        rows.push(vec![Cell::text("east")]);
        Table::from_rows(vec!["site"], rows)
    }

    #[test]
    fn missing_category_column_renders_placeholder() {
        let spec = ChartSpec {
            title: "distribution".to_string(),
            ..ChartSpec::default()
        };
        let figure = render(&site_table(), &spec, &mut StdRng::seed_from_u64(7));
        assert_eq!(figure.width(), FIGURE_WIDTH);
    }

    #[test]
    fn empty_table_renders_placeholder() {
        let table = Table::from_rows::<String>(vec![], vec![]);
        let spec = ChartSpec {
            title: "distribution".to_string(),
            category_col: Some("site".to_string()),
            ..ChartSpec::default()
        };
        let figure = render(&table, &spec, &mut StdRng::seed_from_u64(7));
        assert_eq!(figure.height(), FIGURE_HEIGHT);
    }

    #[test]
    fn seeded_render_is_reproducible() {
        let spec = ChartSpec {
            title: "distribution of site".to_string(),
            category_col: Some("site".to_string()),
            ..ChartSpec::default()
        };
        let table = site_table();
        let a = render(&table, &spec, &mut StdRng::seed_from_u64(99));
        let b = render(&table, &spec, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.rgb(), b.rgb());
    }

    #[test]
    fn wedge_glyph_counts_are_bounded() {
        let table = site_table();
        let counts = top_counts(&table, "site", MAX_COUNT_BUCKETS);
        let total: f64 = counts.entries.iter().map(|(_, v)| v).sum();
        let mut sum = 0;
        for (_, value) in &counts.entries {
            let glyphs = glyph_count(*value, total, PIE_GLYPH_CAP);
            assert!((1..=40).contains(&glyphs));
            sum += glyphs;
        }
        assert!(sum <= 8 * 40);
    }
}
