//! Conversions from catalog measurements to physical quantities.

/// Absolute V magnitude of the Sun.
pub const SUN_ABS_MAG_V: f64 = 4.83;

/// Stellar mass-to-light ratio (solar units) used for stellar masses.
pub const MASS_TO_LIGHT: f64 = 1.0;

/// Gravitational constant in pc (km/s)² / M☉.
pub const G_PC_KMS2_PER_MSUN: f64 = 4.300_91e-3;

const ARCMIN_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 60.0);

/// Distance in parsecs from a distance modulus: `10^(μ/5 + 1)`.
pub fn distance_pc(distance_modulus: f64) -> f64 {
    10f64.powf(distance_modulus / 5.0 + 1.0)
}

pub fn distance_kpc(distance_modulus: f64) -> f64 {
    distance_pc(distance_modulus) / 1.0e3
}

/// `M = m − μ`.
pub fn absolute_magnitude(apparent: f64, distance_modulus: f64) -> f64 {
    apparent - distance_modulus
}

/// Stellar mass in M☉ for the fixed mass-to-light ratio.
pub fn stellar_mass(abs_mag_v: f64) -> f64 {
    MASS_TO_LIGHT * 10f64.powf(-0.4 * (abs_mag_v - SUN_ABS_MAG_V))
}

/// Physical radius in pc of an angular radius at a distance (small angle).
pub fn physical_radius_pc(angular_arcmin: f64, distance_pc: f64) -> f64 {
    distance_pc * angular_arcmin * ARCMIN_TO_RAD
}

/// Wolf et al. mass within the half-light radius, in M☉:
/// `4 σ² r / G` with σ in km/s and r in pc.
pub fn wolf_mass(sigma_kms: f64, r_half_pc: f64) -> f64 {
    4.0 * sigma_kms.powi(2) * r_half_pc / G_PC_KMS2_PER_MSUN
}
