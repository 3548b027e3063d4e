use std::fmt;

// ---------------------------------------------------------------------------
// Unit – the closed set of units catalog documents use
// ---------------------------------------------------------------------------

/// Units found in the `unit` key of catalog measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Degree,
    Arcminute,
    Arcsecond,
    Magnitude,
    MagPerSqArcsec,
    KmPerSec,
    Parsec,
    Kiloparsec,
    Megaparsec,
    SolarMass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Angle,
    Length,
    Magnitude,
    SurfaceBrightness,
    Velocity,
    Mass,
}

impl Unit {
    /// Parse a catalog unit string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Unit> {
        let unit = match s.trim() {
            "deg" | "degree" | "degrees" => Unit::Degree,
            "arcmin" => Unit::Arcminute,
            "arcsec" => Unit::Arcsecond,
            "mag" => Unit::Magnitude,
            "mag/sq.arcsec" | "mag/arcsec2" | "mag / arcsec2" => Unit::MagPerSqArcsec,
            "km/s" | "km / s" => Unit::KmPerSec,
            "pc" => Unit::Parsec,
            "kpc" => Unit::Kiloparsec,
            "Mpc" => Unit::Megaparsec,
            "Msun" | "solMass" => Unit::SolarMass,
            _ => return None,
        };
        Some(unit)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Degree => "deg",
            Unit::Arcminute => "arcmin",
            Unit::Arcsecond => "arcsec",
            Unit::Magnitude => "mag",
            Unit::MagPerSqArcsec => "mag/sq.arcsec",
            Unit::KmPerSec => "km/s",
            Unit::Parsec => "pc",
            Unit::Kiloparsec => "kpc",
            Unit::Megaparsec => "Mpc",
            Unit::SolarMass => "Msun",
        }
    }

    fn dimension(self) -> Dimension {
        match self {
            Unit::Degree | Unit::Arcminute | Unit::Arcsecond => Dimension::Angle,
            Unit::Parsec | Unit::Kiloparsec | Unit::Megaparsec => Dimension::Length,
            Unit::Magnitude => Dimension::Magnitude,
            Unit::MagPerSqArcsec => Dimension::SurfaceBrightness,
            Unit::KmPerSec => Dimension::Velocity,
            Unit::SolarMass => Dimension::Mass,
        }
    }

    /// Factor to the base unit of the dimension (degrees, parsecs).
    fn scale(self) -> f64 {
        match self {
            Unit::Arcminute => 1.0 / 60.0,
            Unit::Arcsecond => 1.0 / 3600.0,
            Unit::Kiloparsec => 1.0e3,
            Unit::Megaparsec => 1.0e6,
            _ => 1.0,
        }
    }

    /// Convert `value` from `self` into `target`; `None` across dimensions.
    pub fn convert(self, value: f64, target: Unit) -> Option<f64> {
        if self.dimension() != target.dimension() {
            return None;
        }
        Some(value * self.scale() / target.scale())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Quantity – a stored value with an optional unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl Quantity {
    /// Value expressed in `target`. Unitless quantities are assumed to
    /// already be in `target`.
    pub fn value_in(&self, target: Unit) -> Option<f64> {
        match self.unit {
            Some(unit) => unit.convert(self.value, target),
            None => Some(self.value),
        }
    }
}

/// Attach a unit to a value when the unit string is one the catalog knows;
/// anything else is stored as a bare number.
pub fn store_quantity(value: f64, unit: Option<&str>) -> Quantity {
    let parsed = unit.and_then(Unit::parse);
    if parsed.is_none() {
        if let Some(raw) = unit {
            log::debug!("Unrecognised unit {raw:?}, storing bare value");
        }
    }
    Quantity {
        value,
        unit: parsed,
    }
}

// ---------------------------------------------------------------------------
// Distribution summaries
// ---------------------------------------------------------------------------

/// Central value and spread of a sampled distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    pub value: f64,
    pub error: f64,
    pub unit: Option<Unit>,
}

/// Mean and (population) standard deviation of the finite samples.
/// Returns `None` when there are no finite samples.
pub fn values_from_distribution(samples: &[f64], unit: Option<Unit>) -> Option<DistributionSummary> {
    let finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(DistributionSummary {
        value: mean,
        error: var.sqrt(),
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_units_are_attached() {
        let q = store_quantity(5.0, Some("kpc"));
        assert_eq!(q.unit, Some(Unit::Kiloparsec));
        assert_eq!(q.value, 5.0);
    }

    #[test]
    fn unknown_units_give_bare_values() {
        let q = store_quantity(5.0, Some("penguin"));
        assert_eq!(q, Quantity { value: 5.0, unit: None });
        assert_eq!(store_quantity(2.0, None).unit, None);
    }

    #[test]
    fn conversion_stays_within_dimension() {
        assert!((Unit::Degree.convert(1.0, Unit::Arcminute).unwrap() - 60.0).abs() < 1e-12);
        assert!((Unit::Kiloparsec.convert(2.5, Unit::Parsec).unwrap() - 2500.0).abs() < 1e-9);
        assert_eq!(Unit::Degree.convert(1.0, Unit::Parsec), None);
    }

    #[test]
    fn distribution_summary() {
        let s = values_from_distribution(&[0.8, 1.0, 1.2], Some(Unit::Kiloparsec)).unwrap();
        assert!((s.value - 1.0).abs() < 1e-12);
        assert!((s.error - (0.08f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.unit, Some(Unit::Kiloparsec));
        assert!(values_from_distribution(&[], None).is_none());
        assert!(values_from_distribution(&[f64::NAN], None).is_none());
    }

    #[test]
    fn symbols_parse_back() {
        for unit in [Unit::Degree, Unit::MagPerSqArcsec, Unit::KmPerSec, Unit::SolarMass] {
            assert_eq!(Unit::parse(unit.symbol()), Some(unit));
        }
    }
}
