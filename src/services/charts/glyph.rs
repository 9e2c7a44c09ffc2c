use rand::Rng;
use smallvec::SmallVec;

/// Downsampling budget for line series: at most ~this many points render.
pub const SERIES_POINT_BUDGET: usize = 200;
pub const LINE_GLYPH_CAP: u32 = 25;
pub const BAR_GLYPH_CAP: u32 = 25;
pub const PIE_GLYPH_CAP: u32 = 40;

/// Stride that keeps at most `budget` evenly spaced samples out of `n`
/// (stride sampling, not averaging).
pub fn sample_stride(n: usize, budget: usize) -> usize {
    if n == 0 || budget == 0 {
        return 1;
    }
    ((n + budget - 1) / budget).max(1)
}

/// Glyph count proportional to `value / reference`, rounded half up and
/// clamped to `[1, cap]` so no mark set is visually empty. A non-positive
/// reference is treated as 1.
pub fn glyph_count(value: f64, reference: f64, cap: u32) -> u32 {
    let reference = if reference > 0.0 { reference } else { 1.0 };
    let raw = (value / reference * cap as f64).round() as i64;
    raw.clamp(1, cap as i64) as u32
}

/// Evenly spaced stack heights inside a bar of height `value`.
pub fn stack_heights(value: f64, count: u32) -> SmallVec<[f64; 25]> {
    (0..count)
        .map(|f| value * (f + 1) as f64 / (count + 1) as f64)
        .collect()
}

/// Random `(angle, radius_fraction)` placements inside a wedge spanning
/// `start..end` radians, radius fraction in `[0.2, 0.8]`.
pub fn wedge_placements<R: Rng>(
    rng: &mut R,
    start: f64,
    end: f64,
    count: u32,
) -> SmallVec<[(f64, f64); 40]> {
    let mut placements = SmallVec::new();
    for _ in 0..count {
        let angle = if end > start {
            rng.random_range(start..end)
        } else {
            start
        };
        let radius = rng.random_range(0.2..=0.8);
        placements.push((angle, radius));
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stride_downsamples_large_series_to_budget() {
        assert_eq!(sample_stride(1000, SERIES_POINT_BUDGET), 5);
        let sampled = (0..1000).step_by(5).count();
        assert_eq!(sampled, 200);
    }

    #[test]
    fn stride_keeps_small_series_intact() {
        assert_eq!(sample_stride(150, SERIES_POINT_BUDGET), 1);
        assert_eq!(sample_stride(0, SERIES_POINT_BUDGET), 1);
        assert_eq!(sample_stride(201, SERIES_POINT_BUDGET), 2);
    }

    #[test]
    fn glyph_stride_yields_the_cap_on_a_full_budget() {
        let stride = sample_stride(200, LINE_GLYPH_CAP as usize);
        assert_eq!(stride, 8);
        assert_eq!((0..200).step_by(stride).count(), 25);
    }

    #[test]
    fn bar_glyph_counts_round_half_up_and_clamp() {
        assert_eq!(glyph_count(10.0, 10.0, BAR_GLYPH_CAP), 25);
        assert_eq!(glyph_count(5.0, 10.0, BAR_GLYPH_CAP), 13);
        assert_eq!(glyph_count(0.0, 10.0, BAR_GLYPH_CAP), 1);
    }

    #[test]
    fn zero_reference_falls_back_to_one() {
        assert_eq!(glyph_count(0.0, 0.0, BAR_GLYPH_CAP), 1);
    }

    #[test]
    fn pie_glyph_counts_stay_in_range() {
        for value in [0.0, 0.5, 3.0, 100.0] {
            let count = glyph_count(value, 100.0, PIE_GLYPH_CAP);
            assert!((1..=40).contains(&count));
        }
    }

    #[test]
    fn stack_heights_are_even_and_inside_the_bar() {
        let heights = stack_heights(10.0, 4);
        assert_eq!(heights.as_slice(), &[2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn seeded_wedge_placements_stay_inside_the_wedge() {
        let mut rng = StdRng::seed_from_u64(42);
        let (start, end) = (0.4, 1.9);
        let placements = wedge_placements(&mut rng, start, end, 40);
        assert_eq!(placements.len(), 40);
        for (angle, radius) in placements {
            assert!(angle >= start && angle < end);
            assert!((0.2..=0.8).contains(&radius));
        }
    }

    #[test]
    fn degenerate_wedge_pins_the_angle() {
        let mut rng = StdRng::seed_from_u64(1);
        let placements = wedge_placements(&mut rng, 1.0, 1.0, 3);
        assert!(placements.iter().all(|(angle, _)| *angle == 1.0));
    }
}
