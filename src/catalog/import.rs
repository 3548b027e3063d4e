//! Ingest of the fixed-width nearby-galaxies table into catalog documents.

use std::ops::Range;

use anyhow::{Context, Result};

use super::model::{GalaxyDoc, Measurement};
use crate::analysis::validity;

/// Lines before the first data row.
pub const HEADER_LINES: usize = 37;

/// A value with upper/lower errors occupying three column ranges.
struct Column {
    field: &'static str,
    value: Range<usize>,
    upper: Range<usize>,
    lower: Range<usize>,
    unit: Option<&'static str>,
}

const COLUMNS: [Column; 8] = [
    Column { field: "distance_modulus", value: 46..51, upper: 53..56, lower: 58..61, unit: None },
    Column { field: "radial_velocity", value: 62..68, upper: 69..73, lower: 74..78, unit: Some("km/s") },
    Column { field: "v_mag", value: 79..83, upper: 84..87, lower: 88..91, unit: Some("mag") },
    Column { field: "position_angle", value: 92..97, upper: 98..102, lower: 103..107, unit: Some("deg") },
    Column { field: "ellipticity", value: 108..112, upper: 113..117, lower: 118..122, unit: None },
    Column { field: "surface_brightness", value: 123..127, upper: 128..131, lower: 132..135, unit: Some("mag/sq.arcsec") },
    Column { field: "half-light_radius", value: 136..142, upper: 143..148, lower: 149..154, unit: Some("arcmin") },
    Column { field: "stellar_radial_velocity_dispersion", value: 155..159, upper: 160..164, lower: 165..169, unit: Some("km/s") },
];

fn number(line: &str, range: Range<usize>, what: &str) -> Result<f64> {
    let raw = line
        .get(range.clone())
        .with_context(|| format!("line too short for {what} (columns {range:?})"))?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("{what}: '{}' is not a number", raw.trim()))
}

fn round5(x: f64) -> f64 {
    (x * 1e5).round() / 1e5
}

/// Parse one data row into a document. Placeholder values drop the field.
pub fn parse_line(line: &str) -> Result<GalaxyDoc> {
    let name = line.get(..19).context("line too short for name")?.trim();
    let name = name.strip_prefix('*').unwrap_or(name).trim();

    let rah = number(line, 19..21, "RA hours")?;
    let ram = number(line, 22..24, "RA minutes")?;
    let ras = number(line, 25..29, "RA seconds")?;
    let ra = round5(15.0 * (rah + ram / 60.0 + ras / 3600.0));

    let decd = number(line, 31..33, "Dec degrees")?;
    let decm = number(line, 34..36, "Dec minutes")?;
    let decs = number(line, 37..39, "Dec seconds")?;
    let negative = decd < 0.0 || line.get(30..31) == Some("-");
    let sign = if negative { -1.0 } else { 1.0 };
    let dec = round5(sign * (decd.abs() + decm / 60.0 + decs / 3600.0));

    let ebv = number(line, 41..45, "E(B-V)")?;

    let mut doc = GalaxyDoc::new(name)
        .with_field("ra", vec![Measurement::new(ra, "").with_unit("deg")])
        .with_field("dec", vec![Measurement::new(dec, "").with_unit("deg")])
        .with_field("ebv", vec![Measurement::new(ebv, "")]);

    for col in &COLUMNS {
        let value = number(line, col.value.clone(), col.field)?;
        let upper = number(line, col.upper.clone(), col.field)?;
        let lower = number(line, col.lower.clone(), col.field)?;
        if validity::is_placeholder(value, Some(upper)) {
            continue;
        }
        let mut m = Measurement::new(value, "").with_errors(upper, lower);
        if let Some(unit) = col.unit {
            m = m.with_unit(unit);
        }
        doc.fields.insert(col.field.to_string(), vec![m]);
    }
    Ok(doc)
}

/// Parse the whole table, skipping the header and blank lines.
pub fn parse_catalog(text: &str) -> Result<Vec<GalaxyDoc>> {
    text.lines()
        .enumerate()
        .skip(HEADER_LINES)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(line).with_context(|| format!("line {}", i + 1)))
        .collect()
}
