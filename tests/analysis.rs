use std::path::Path;

use galcat::analysis::derived::{radius_mass_series, scaling_points, sky_points, velocity_points};
use galcat::analysis::physics::{distance_pc, physical_radius_pc, wolf_mass};
use galcat::analysis::{derive, DerivedRow};
use galcat::catalog::{Database, Query, Selection};
use galcat::config::CatalogConfig;

fn derived() -> Vec<DerivedRow> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests");
    let db = Database::open(&CatalogConfig::new(root.join("data"), root.join("references.json")))
        .unwrap();
    derive(&db.query_table(&Query::all(), &Selection::new()))
}

fn by_name<'a>(rows: &'a [DerivedRow], name: &str) -> &'a DerivedRow {
    rows.iter().find(|r| r.name == name).unwrap()
}

#[test]
fn wolf_mass_from_catalog_values() {
    let rows = derived();
    let gal1 = by_name(&rows, "Gal 1");
    let expected = wolf_mass(9.0, physical_radius_pc(5.0, distance_pc(19.0)));
    assert!((gal1.wolf_mass.unwrap() - expected).abs() / expected < 1e-9);
    assert!(gal1.wolf_mass.unwrap() > 1e6 && gal1.wolf_mass.unwrap() < 1e7);

    // No dispersion measured.
    assert_eq!(by_name(&rows, "Gal 2").wolf_mass, None);
}

#[test]
fn brighter_galaxy_is_more_massive() {
    let rows = derived();
    let gal1 = by_name(&rows, "Gal 1");
    let gal2 = by_name(&rows, "Gal 2");
    assert!((gal1.abs_mag.unwrap() + 2.8).abs() < 1e-9);
    assert!((gal2.abs_mag.unwrap() + 0.3).abs() < 1e-9);
    assert!(gal1.stellar_mass.unwrap() > gal2.stellar_mass.unwrap());
}

#[test]
fn sentinel_velocity_is_left_out_of_plots() {
    let rows = derived();
    assert_eq!(sky_points(&rows).len(), 2);

    let velocities = velocity_points(&rows);
    assert_eq!(velocities.len(), 1);
    assert!((velocities[0][1] + 110.0).abs() < 1e-9);
}

#[test]
fn highlight_picks_one_galaxy() {
    let rows = derived();
    let series = radius_mass_series(&rows, Some("Gal 1"));
    assert_eq!(series.base.len(), 1);
    assert_eq!(series.highlighted, series.base);

    let missing = radius_mass_series(&rows, Some("Nope"));
    assert!(missing.highlighted.is_empty());
    assert_eq!(missing.base, series.base);
}

#[test]
fn scaling_points_need_every_axis() {
    let rows = derived();
    let points = scaling_points(&rows);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].name, "Gal 1");
}
