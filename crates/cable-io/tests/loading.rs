use std::fs;

use cable_core::{Amperes, CableType, Construction, Installation, Material, SquareMillimetres};
use cable_io::{load_parameters, load_tables, validate_tables, DEFAULT_TABLES_JSON};
use tempfile::tempdir;

#[test]
fn load_tables_from_file_matches_bundled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(&path, DEFAULT_TABLES_JSON).unwrap();

    let loaded = load_tables(&path).unwrap();
    assert_eq!(loaded, cable_io::default_tables().unwrap());
    assert!(!validate_tables(&loaded).has_issues());
}

#[test]
fn load_tables_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_tables(dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), "Io");
}

#[test]
fn load_tables_reports_path_on_parse_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "conductorSizes": { "singleCore": "many" } }"#).unwrap();
    let err = load_tables(&path).unwrap_err();
    assert_eq!(err.kind(), "Parse");
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn partial_tables_load_and_validate_with_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{
            "conductorSizes": { "singleCore": [25, 35], "threeCore": [25, 35] },
            "ampacity": { "threeCoreCopper": { "0.6/1kV": { "inAir": [120, 150] } } }
        }"#,
    )
    .unwrap();
    let tables = load_tables(&path).unwrap();
    let col = tables
        .rating_column(CableType::ThreeCoreCopper, "0.6/1kV", Installation::InAir, None)
        .unwrap();
    assert_eq!(col.rating_at(1), Some(Amperes(150.0)));

    let diag = validate_tables(&tables);
    assert!(!diag.has_errors());
    assert!(diag.warning_count() > 0);
}

#[test]
fn load_parameters_toml_and_json() {
    let dir = tempdir().unwrap();

    let toml_path = dir.path().join("feeder.toml");
    fs::write(
        &toml_path,
        r#"
material = "copper"
construction = "threeCore"
voltageRating = "0.6/1kV"
conductorSize = 95
installation = "buriedDirect"
requiredCurrent = 250
"#,
    )
    .unwrap();
    let from_toml = load_parameters(&toml_path).unwrap();
    assert_eq!(from_toml.material, Material::Copper);
    assert_eq!(from_toml.construction, Construction::ThreeCore);
    assert_eq!(from_toml.conductor_size, SquareMillimetres(95.0));

    let json_path = dir.path().join("feeder.json");
    fs::write(&json_path, serde_json::to_string(&from_toml).unwrap()).unwrap();
    let from_json = load_parameters(&json_path).unwrap();
    assert_eq!(from_json, from_toml);
}

#[test]
fn load_parameters_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("feeder.yaml");
    fs::write(&path, "material: copper").unwrap();
    let err = load_parameters(&path).unwrap_err();
    assert!(err.to_string().contains(".json or .toml"));
}
