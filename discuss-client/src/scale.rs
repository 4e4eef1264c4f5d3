pub const MIN_SCALE: f64 = 0.85;
pub const MAX_SCALE: f64 = 1.05;

/// Presentation scale for a given viewport width.
///
/// Piecewise-linear across six bands so the scale transitions smoothly
/// between device sizes instead of jumping at breakpoints. Continuous at
/// every band boundary and always within [`MIN_SCALE`, `MAX_SCALE`].
pub fn scale_for_width(width: f64) -> f64 {
    if width < 576.0 {
        // phones
        0.85
    } else if width < 768.0 {
        // large phones and small tablets
        0.85 + (width - 576.0) / 192.0 * 0.05
    } else if width < 992.0 {
        // tablets
        0.90 + (width - 768.0) / 224.0 * 0.02
    } else if width < 1200.0 {
        // smaller desktops, ramping up to full scale
        0.92 + (width - 992.0) / 208.0 * 0.08
    } else if width < 1600.0 {
        // standard desktops
        1.0
    } else {
        // large desktops, capped so extreme widths stay proportionate
        (1.0 + (width - 1600.0) / 2000.0 * 0.05).min(MAX_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn continuous_at_every_band_boundary() {
        for boundary in [576.0, 768.0, 992.0, 1200.0, 1600.0] {
            let below = scale_for_width(boundary - 1e-6);
            let at = scale_for_width(boundary);
            assert!(
                (below - at).abs() < 1e-6,
                "discontinuity at {}: {} vs {}",
                boundary,
                below,
                at,
            );
        }
    }

    #[test]
    fn band_anchor_values() {
        assert!((scale_for_width(0.0) - 0.85).abs() < EPSILON);
        assert!((scale_for_width(576.0) - 0.85).abs() < EPSILON);
        assert!((scale_for_width(768.0) - 0.90).abs() < EPSILON);
        assert!((scale_for_width(992.0) - 0.92).abs() < EPSILON);
        assert!((scale_for_width(1200.0) - 1.0).abs() < EPSILON);
        assert!((scale_for_width(1600.0) - 1.0).abs() < EPSILON);
        assert!((scale_for_width(3600.0) - 1.05).abs() < EPSILON);
    }

    #[test]
    fn always_within_bounds_and_monotonic() {
        let mut prev = scale_for_width(0.0);
        let mut w = 0.0;
        while w < 8000.0 {
            let s = scale_for_width(w);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&s), "scale {} at {}", s, w);
            assert!(s >= prev - 1e-12, "not monotonic at {}", w);
            prev = s;
            w += 7.3;
        }
    }
}
