//! The one missing-data convention used everywhere downstream of the
//! catalog: a value is `Option<f64>`, and `None` means "do not use".
//!
//! Non-finite numbers, and sentinels in the columns that use them, are
//! turned into `None` when a table cell is built, so the predicates here
//! only have to look at signs.

use super::derived::RADIAL_VELOCITY;

/// Reserved "no measurement" value of the source catalog.
pub const SENTINEL: f64 = 999.9;

/// Columns whose documents may still carry the sentinel or a placeholder
/// pair. The importer drops placeholders everywhere else, so a 999.9 or a
/// `(99.0, 9.0)` in another column is a real measurement.
pub const SENTINEL_FIELDS: [&str; 1] = [RADIAL_VELOCITY];

/// `(value, error_upper)` pairs the source catalog uses as placeholders.
pub const PLACEHOLDER_PAIRS: [(f64, f64); 8] = [
    (99.99, 9.99),
    (999.9, 99.9),
    (99.9, 99.9),
    (99.9, 9.9),
    (9.9, 9.9),
    (99.0, 9.0),
    (999.0, 99.0),
    (9.99, 9.99),
];

const TOLERANCE: f64 = 1e-9;

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

pub fn is_sentinel(value: f64) -> bool {
    same(value, SENTINEL)
}

/// True when `(value, error_upper)` is one of the placeholder pairs.
pub fn is_placeholder(value: f64, error_upper: Option<f64>) -> bool {
    match error_upper {
        Some(err) => PLACEHOLDER_PAIRS
            .iter()
            .any(|&(v, e)| same(value, v) && same(err, e)),
        None => false,
    }
}

/// Canonicalise a raw catalog number of `field`: non-finite values become
/// `None`, and so do sentinels and placeholders in [`SENTINEL_FIELDS`].
pub fn clean(field: &str, value: Option<f64>, error_upper: Option<f64>) -> Option<f64> {
    let sentinel_column = SENTINEL_FIELDS.contains(&field);
    value.filter(|&v| {
        v.is_finite()
            && !(sentinel_column && (is_sentinel(v) || is_placeholder(v, error_upper)))
    })
}

/// Present and finite. Signed quantities (radial velocity, magnitudes,
/// declination) only need this.
pub fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Present, finite and strictly positive. Required for anything that ends
/// up under a logarithm or a square root.
pub fn usable(value: Option<f64>) -> Option<f64> {
    measured(value).filter(|&v| v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RV: &str = RADIAL_VELOCITY;

    #[test]
    fn sentinel_is_dropped() {
        assert_eq!(clean(RV, Some(999.9), None), None);
        assert_eq!(clean(RV, Some(999.9), Some(99.9)), None);
        assert_eq!(clean(RV, Some(-110.0), Some(2.0)), Some(-110.0));
    }

    #[test]
    fn placeholder_needs_both_halves() {
        assert_eq!(clean(RV, Some(99.9), Some(9.9)), None);
        assert_eq!(clean(RV, Some(99.9), Some(1.2)), Some(99.9));
        assert_eq!(clean(RV, Some(99.0), None), Some(99.0));
    }

    #[test]
    fn other_columns_keep_sentinel_like_values() {
        assert_eq!(clean("position_angle", Some(99.0), Some(9.0)), Some(99.0));
        assert_eq!(clean("distance", Some(999.9), None), Some(999.9));
        assert_eq!(clean("stellar_radial_velocity_dispersion", Some(9.9), Some(9.9)), Some(9.9));
        assert_eq!(clean("ebv", Some(f64::INFINITY), None), None);
    }

    #[test]
    fn non_finite_is_dropped() {
        assert_eq!(clean(RV, Some(f64::NAN), None), None);
        assert_eq!(measured(Some(f64::INFINITY)), None);
    }

    #[test]
    fn usable_requires_positive() {
        assert_eq!(usable(Some(0.0)), None);
        assert_eq!(usable(Some(-1.0)), None);
        assert_eq!(usable(Some(2.0)), Some(2.0));
        assert_eq!(measured(Some(-1.0)), Some(-1.0));
        assert_eq!(usable(None), None);
    }
}
