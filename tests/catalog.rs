use std::path::{Path, PathBuf};

use galcat::catalog::units::{values_from_distribution, Unit};
use galcat::catalog::{Database, DatabaseError, GalaxyDoc, Measurement, Query, Selection};
use galcat::config::CatalogConfig;
use serde_json::json;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

fn open() -> Database {
    let root = fixtures();
    Database::open(&CatalogConfig::new(root.join("data"), root.join("references.json"))).unwrap()
}

fn count(db: &Database, q: serde_json::Value) -> usize {
    db.query_db(&Query::parse(&q).unwrap()).len()
}

const SAMPLES: [f64; 29] = [
    1.20881063, 0.93766121, 1.20136033, 1.11122468, 0.88140548, 0.98529047, 0.83750181,
    0.95603778, 0.90262727, 0.76719971, 0.96954131, 0.83957612, 1.05208742, 0.9203976,
    0.5388856, 0.82028187, 0.99002746, 0.99821842, 1.08264829, 0.88236597, 1.07393172,
    0.68800062, 0.95087714, 0.95349601, 1.20331926, 1.1427941, 1.13346843, 1.12862014,
    1.32770298,
];

#[test]
fn loads_fixture_catalog() {
    let db = open();
    assert_eq!(db.len(), 2);
    assert_eq!(db.references().count(), 2);
    assert_eq!(
        db.reference("Bellazzini_2006_1").unwrap().bibcode,
        "2006MNRAS.366..865B"
    );
}

#[test]
fn query_by_name() {
    let db = open();
    let docs = db.query_db(&Query::by_name("Gal 2"));
    assert_eq!(docs[0].field("ra").unwrap()[0].value, Some(10.4));

    assert_eq!(count(&db, json!({"name": "I DONT EXIST"})), 0);
    assert_eq!(count(&db, json!({"fake_column": 5})), 0);
    // ebv carries no error_upper anywhere.
    assert_eq!(count(&db, json!({"ebv.error_upper": 0.5})), 0);
}

#[test]
fn query_with_embedded_references() {
    let db = open();
    let q = Query::by_name("Gal 1");
    let docs = db.query(&q, true).unwrap();
    assert_eq!(docs[0]["ebv"][0]["reference"]["bibcode"], "2006MNRAS.366..865B");
    // Unknown keys are left as strings.
    assert_eq!(docs[0]["ra"][1]["reference"], "FakeRef2019");

    let docs = db.query(&q, false).unwrap();
    assert_eq!(docs[0]["ebv"][0]["reference"], "Bellazzini_2006_1");
}

#[test]
fn operator_math() {
    let db = open();
    assert_eq!(count(&db, json!({"v_mag.value": {"$lt": 21}})), 2);
    assert_eq!(count(&db, json!({"v_mag.value": {"$lte": 16.2}})), 1);
    assert_eq!(count(&db, json!({"v_mag.value": {"$gt": 10}})), 2);
    assert_eq!(count(&db, json!({"v_mag.value": {"$gte": 20.2}})), 1);
    assert_eq!(count(&db, json!({"v_mag.value": {"$gte": 999}})), 0);
}

#[test]
fn operator_exists() {
    let db = open();
    assert_eq!(count(&db, json!({"radial_velocity.value": {"$exists": true}})), 2);
    let docs = db.query_db(
        &Query::parse(&json!({"stellar_radial_velocity_dispersion": {"$exists": false}})).unwrap(),
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "Gal 2");
}

#[test]
fn operator_and_or() {
    let db = open();
    let docs = db.query_db(
        &Query::parse(&json!({"v_mag.value": {"$gt": 10}, "radial_velocity.value": {"$lte": -100}}))
            .unwrap(),
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "Gal 1");

    assert_eq!(count(&db, json!({"$or": [{"v_mag.value": 16.2}, {"dec.value": -32.4}]})), 2);
    assert_eq!(
        count(
            &db,
            json!({"ra.value": {"$gt": 10}, "$or": [{"v_mag.value": {"$lte": 21}}, {"v_mag.value": {"$gte": 16}}]})
        ),
        2
    );
    assert_eq!(
        count(
            &db,
            json!({"ra.value": {"$gt": 10}, "$or": [{"v_mag.error_upper": {"$lte": 0.4}}, {"v_mag.error_upper": {"$gte": 0.2}}]})
        ),
        2
    );
    assert_eq!(
        count(&db, json!({"$or": [{"v_mag.value": 16.2}, {"half-light_radius.error_upper": 0.12}]})),
        1
    );
}

#[test]
fn query_table_selects_values() {
    let db = open();
    let empty = db.query_table(&Query::by_name("I DONT EXIST"), &Selection::new());
    assert!(empty.is_empty());

    let table = db.query_table(&Query::by_name("Gal 1"), &Selection::new());
    let ra = table.rows[0].get("ra").unwrap();
    assert_eq!(ra.value, Some(9.14542));
    assert_eq!(ra.unit, Some(Unit::Degree));

    let mut selection = Selection::new();
    selection.insert("ra".into(), "FakeRef2019".into());
    let table = db.query_table(&Query::by_name("Gal 1"), &selection);
    assert_eq!(table.rows[0].value("ra"), Some(999.14542));

    let q = Query::parse(&json!({"$or": [{"v_mag.value": 16.2}, {"half-light_radius.error_upper": 0.12}]}))
        .unwrap();
    assert_eq!(db.query_table(&q, &Selection::new()).len(), 1);
}

#[test]
fn sentinel_velocity_is_missing_in_table() {
    let db = open();
    let table = db.query_table(&Query::all(), &Selection::new());
    assert_eq!(table.row("Gal 2").unwrap().value("radial_velocity"), None);
    assert_eq!(table.row("Gal 1").unwrap().value("radial_velocity"), Some(-110.0));
}

#[test]
fn load_doc_adds_and_resets() {
    let mut db = open();
    let doc = GalaxyDoc::new("Gal 3")
        .with_field("ra", vec![Measurement::new(5.0, "").with_unit("deg")])
        .with_field("dec", vec![Measurement::new(-1.0, "").with_unit("deg")])
        .with_field("ebv", vec![Measurement::new(0.2, "Bellazzini_2006_1")]);
    db.load_doc(doc);
    let docs = db.query_db(&Query::by_name("Gal 3"));
    assert_eq!(docs[0].field("ra").unwrap()[0].value, Some(5.0));

    db.add_data(
        GalaxyDoc::new("Gal 1").with_field("fake_quantity", vec![Measurement::new(1.0, "X")]),
        false,
        false,
    )
    .unwrap();
    assert_eq!(count(&db, json!({"name": "Gal 1", "fake_quantity.value": 1})), 1);

    db.load_doc_file(&fixtures().join("data/Gal_1.json")).unwrap();
    assert_eq!(count(&db, json!({"name": "Gal 1", "fake_quantity.value": 1})), 0);
}

#[test]
fn add_data_requires_name() {
    let mut db = open();
    let doc = GalaxyDoc::default().with_field("fake_quantity", vec![Measurement::new(1.0, "")]);
    assert!(matches!(db.add_data(doc, false, false), Err(DatabaseError::MissingName)));
}

#[test]
fn requery_reflects_new_reference() {
    let mut db = open();
    let before = db.query_table(&Query::by_name("Gal 1"), &Selection::new());
    assert_eq!(before.rows[0].value("v_mag"), Some(16.2));

    let correction = GalaxyDoc::new("Gal 1").with_field(
        "v_mag",
        vec![Measurement::new(15.9, "Martin_2005_1").with_unit("mag")],
    );
    db.add_data(correction, true, true).unwrap();

    let after = db.query_table(&Query::by_name("Gal 1"), &Selection::new());
    assert_eq!(after.rows[0].value("v_mag"), Some(15.9));
    assert_eq!(db.get("Gal 1").unwrap().field("v_mag").unwrap().len(), 2);
}

#[test]
fn save_from_db() {
    let db = open();
    let dir = tempfile::tempdir().unwrap();
    let path = db.save_doc("Gal 1", dir.path()).unwrap();
    assert!(dir.path().join("Gal_1.json").is_file());

    let mut copy = Database::default();
    copy.load_doc_file(&path).unwrap();
    assert_eq!(copy.get("Gal 1"), db.get("Gal 1"));
}

#[test]
fn distribution_only_measurement() {
    let mut db = open();
    let doc = GalaxyDoc::new("Gal 9").with_field(
        "ebv",
        vec![Measurement {
            distribution: Some(SAMPLES.to_vec()),
            reference: "Fake".into(),
            ..Default::default()
        }],
    );
    db.load_doc(doc);

    let table = db.query_table(&Query::by_name("Gal 9"), &Selection::new());
    let ebv = table.rows[0].value("ebv").unwrap();
    assert!((ebv - 1.0).abs() < 5e-2);

    assert_eq!(count(&db, json!({"ebv.distribution": {"$lte": 0.6}})), 1);
    assert_eq!(count(&db, json!({"ebv.distribution": {"$gte": 10}})), 0);

    let summary = values_from_distribution(&SAMPLES, Some(Unit::Kiloparsec)).unwrap();
    assert!((summary.value - 1.0).abs() < 5e-2);
    assert!((summary.error - 0.2).abs() < 5e-2);
    assert_eq!(summary.unit, Some(Unit::Kiloparsec));
}

#[test]
fn reopening_picks_up_edited_files() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    for name in ["Gal_1.json", "Gal_2.json"] {
        std::fs::copy(fixtures().join("data").join(name), data.join(name)).unwrap();
    }
    let refs = dir.path().join("references.json");
    std::fs::copy(fixtures().join("references.json"), &refs).unwrap();
    let config = CatalogConfig::new(&data, &refs);

    let before = Database::open(&config).unwrap();
    let table = before.query_table(&Query::by_name("Gal 1"), &Selection::new());
    assert_eq!(table.rows[0].value("v_mag"), Some(16.2));

    // A curated correction: a new best v_mag from another reference.
    let path = data.join("Gal_1.json");
    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    doc["v_mag"][0]["best"] = json!(0);
    doc["v_mag"]
        .as_array_mut()
        .unwrap()
        .push(json!({"value": 15.9, "best": 1, "reference": "Bellazzini_2006_1", "unit": "mag"}));
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    let after = Database::open(&config).unwrap();
    assert_eq!(after.len(), 2);
    let table = after.query_table(&Query::by_name("Gal 1"), &Selection::new());
    assert_eq!(table.rows[0].value("v_mag"), Some(15.9));
    assert_eq!(table.rows[0].get("v_mag").unwrap().reference, "Bellazzini_2006_1");

    let mut selection = Selection::new();
    selection.insert("v_mag".into(), "Martin_2005_1".into());
    let table = after.query_table(&Query::by_name("Gal 1"), &selection);
    assert_eq!(table.rows[0].value("v_mag"), Some(16.2));
}

#[test]
fn ne_and_padded_names_against_fixtures() {
    let mut db = open();
    // Gal 1 has ra measurements 9.14542 and 999.14542.
    assert_eq!(count(&db, json!({"ra.value": {"$ne": 9.14542}})), 1);
    assert_eq!(count(&db, json!({"stellar_radial_velocity_dispersion.value": {"$ne": 9.0}})), 1);

    let fix = GalaxyDoc::new(" Gal 2 ")
        .with_field("ebv", vec![Measurement::new(0.07, "Martin_2005_1")]);
    db.add_data(fix, true, true).unwrap();
    assert_eq!(db.len(), 2);
    let table = db.query_table(&Query::by_name("Gal 2"), &Selection::new());
    assert_eq!(table.rows[0].value("ebv"), Some(0.07));
}
