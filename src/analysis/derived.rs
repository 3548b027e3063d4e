use crate::catalog::table::{CatalogRow, CatalogTable};
use crate::catalog::units::Unit;

use super::physics;
use super::validity::{measured, usable};

// Catalog column names the derived quantities read.
pub const RA: &str = "ra";
pub const DEC: &str = "dec";
pub const V_MAG: &str = "v_mag";
pub const DISTANCE_MODULUS: &str = "distance_modulus";
pub const RADIAL_VELOCITY: &str = "radial_velocity";
pub const VELOCITY_DISPERSION: &str = "stellar_radial_velocity_dispersion";
pub const HALF_LIGHT_RADIUS: &str = "half-light_radius";

// ---------------------------------------------------------------------------
// DerivedRow – physical quantities for one galaxy
// ---------------------------------------------------------------------------

/// Physical quantities of one galaxy. A quantity is `None` whenever any of
/// its inputs is missing or unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub name: String,
    /// Degrees.
    pub ra: Option<f64>,
    /// Degrees.
    pub dec: Option<f64>,
    pub distance_kpc: Option<f64>,
    pub abs_mag: Option<f64>,
    /// M☉.
    pub stellar_mass: Option<f64>,
    pub r_half_pc: Option<f64>,
    /// km/s.
    pub sigma: Option<f64>,
    /// km/s; may be negative.
    pub radial_velocity: Option<f64>,
    /// M☉.
    pub wolf_mass: Option<f64>,
}

impl DerivedRow {
    pub fn from_row(row: &CatalogRow) -> Self {
        let dm = measured(row.value(DISTANCE_MODULUS));
        let distance_pc = dm.map(physics::distance_pc);
        let abs_mag = measured(row.value(V_MAG))
            .zip(dm)
            .map(|(m, dm)| physics::absolute_magnitude(m, dm));

        let theta = usable(row.value_in(HALF_LIGHT_RADIUS, Unit::Arcminute));
        let r_half_pc = theta
            .zip(usable(distance_pc))
            .map(|(theta, d)| physics::physical_radius_pc(theta, d));

        let sigma = usable(row.value_in(VELOCITY_DISPERSION, Unit::KmPerSec));
        let wolf_mass = sigma
            .zip(usable(r_half_pc))
            .map(|(s, r)| physics::wolf_mass(s, r));

        Self {
            name: row.name.clone(),
            ra: measured(row.value_in(RA, Unit::Degree)),
            dec: measured(row.value_in(DEC, Unit::Degree)),
            distance_kpc: distance_pc.map(|d| d / 1.0e3),
            abs_mag,
            stellar_mass: abs_mag.map(physics::stellar_mass),
            r_half_pc,
            sigma,
            radial_velocity: measured(row.value_in(RADIAL_VELOCITY, Unit::KmPerSec)),
            wolf_mass,
        }
    }
}

/// Derived quantities for every row; the table itself is left untouched.
pub fn derive(table: &CatalogTable) -> Vec<DerivedRow> {
    table.rows.iter().map(DerivedRow::from_row).collect()
}

// ---------------------------------------------------------------------------
// Plot series
// ---------------------------------------------------------------------------

/// `[ra, dec]` in degrees for every galaxy with a position.
pub fn sky_points(rows: &[DerivedRow]) -> Vec<[f64; 2]> {
    rows.iter()
        .filter_map(|r| Some([r.ra?, r.dec?]))
        .collect()
}

/// `[distance_kpc, radial_velocity]` for galaxies with a measured velocity.
pub fn velocity_points(rows: &[DerivedRow]) -> Vec<[f64; 2]> {
    rows.iter()
        .filter_map(|r| Some([usable(r.distance_kpc)?, r.radial_velocity?]))
        .collect()
}

/// Log-log radius vs dynamical mass, with one galaxy picked out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadiusMassSeries {
    /// `[log10 r_half/pc, log10 M_dyn/M☉]` for every usable galaxy.
    pub base: Vec<[f64; 2]>,
    /// The highlighted galaxy, if it is present and usable.
    pub highlighted: Vec<[f64; 2]>,
}

fn log_radius_mass(row: &DerivedRow) -> Option<[f64; 2]> {
    Some([
        usable(row.r_half_pc)?.log10(),
        usable(row.wolf_mass)?.log10(),
    ])
}

/// Build the radius/mass series. A highlight name that matches nothing
/// leaves `highlighted` empty and `base` unchanged.
pub fn radius_mass_series(rows: &[DerivedRow], highlight: Option<&str>) -> RadiusMassSeries {
    let base = rows.iter().filter_map(log_radius_mass).collect();
    let highlighted = match highlight {
        Some(name) => rows
            .iter()
            .filter(|r| r.name == name)
            .filter_map(log_radius_mass)
            .collect(),
        None => Vec::new(),
    };
    RadiusMassSeries { base, highlighted }
}

/// A galaxy placed in (log r_half, log M_dyn, log M_*) space.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingPoint {
    pub name: String,
    pub xyz: [f64; 3],
    pub abs_mag: f64,
}

/// Points for the 3D scaling-relation view.
pub fn scaling_points(rows: &[DerivedRow]) -> Vec<ScalingPoint> {
    rows.iter()
        .filter_map(|r| {
            let [log_r, log_m] = log_radius_mass(r)?;
            let log_star = usable(r.stellar_mass)?.log10();
            Some(ScalingPoint {
                name: r.name.clone(),
                xyz: [log_r, log_m, log_star],
                abs_mag: r.abs_mag?,
            })
        })
        .collect()
}
