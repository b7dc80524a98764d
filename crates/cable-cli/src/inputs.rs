//! Resolution of command inputs: tables and the parameter record.
//!
//! Parameters are layered as a camelCase JSON map: config defaults first,
//! then the `--params` file, then individual flags. The merged map is
//! deserialized once, so parameter files and flags share the record's own
//! defaults and validation.

use anyhow::{Context, Result};
use cable_core::{CableParameters, CableTables};
use cable_io::DocumentFormat;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::CableArgs;
use crate::config::CableConfig;

/// Where the loaded tables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Bundled,
    File(PathBuf),
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Bundled => f.write_str("bundled tables"),
            TableSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load tables from `--tables`, else the configured path, else the bundled set.
pub fn load_tables(
    explicit: Option<&Path>,
    config: &CableConfig,
) -> Result<(CableTables, TableSource)> {
    let path = explicit.map(Path::to_path_buf).or_else(|| config.tables_path());
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading tables");
            let tables = cable_io::load_tables(&path)
                .with_context(|| format!("loading tables from '{}'", path.display()))?;
            Ok((tables, TableSource::File(path)))
        }
        None => {
            let tables = cable_io::default_tables().context("loading bundled tables")?;
            Ok((tables, TableSource::Bundled))
        }
    }
}

/// Build the parameter record from config defaults, an optional file and flags.
pub fn build_parameters(args: &CableArgs, config: &CableConfig) -> Result<CableParameters> {
    let mut merged = Map::new();
    merged.insert(
        "maxVoltageDropPercent".into(),
        Value::from(config.defaults.max_voltage_drop_percent),
    );
    merged.insert(
        "faultDuration".into(),
        Value::from(config.defaults.fault_duration_s),
    );
    merged.insert(
        "cableLength".into(),
        Value::from(config.defaults.cable_length_m),
    );

    if let Some(path) = &args.params {
        let file = read_parameter_file(path)?;
        debug!(path = %path.display(), keys = file.len(), "read parameter file");
        merged.extend(file);
    }

    merged.extend(flag_values(args)?);

    let params: CableParameters = serde_json::from_value(Value::Object(merged))
        .context("incomplete cable parameters (use --params or the cable flags)")?;
    Ok(params)
}

fn read_parameter_file(path: &Path) -> Result<Map<String, Value>> {
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading parameters from '{}'", path.display()))?;
    let value: Value = format
        .parse(&text)
        .with_context(|| format!("parsing parameters from '{}'", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!(
            "parameter file '{}' must contain a table of named values",
            path.display()
        ),
    }
}

fn flag_values(args: &CableArgs) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    put(&mut map, "material", args.material)?;
    put(&mut map, "construction", args.construction)?;
    put(&mut map, "voltageRating", args.voltage.as_ref())?;
    put(&mut map, "conductorSize", args.size)?;
    put(&mut map, "installation", args.installation)?;
    put(&mut map, "arrangement", args.arrangement)?;
    put(&mut map, "ambientTemperature", args.ambient_temp)?;
    put(&mut map, "depthOfLaying", args.depth)?;
    put(&mut map, "soilThermalResistivity", args.soil_resistivity)?;
    put(&mut map, "numberOfCircuits", args.circuits)?;
    put(&mut map, "requiredCurrent", args.required_current)?;
    put(&mut map, "cableLength", args.length)?;
    put(&mut map, "supplyVoltage", args.supply_voltage)?;
    put(&mut map, "maxVoltageDropPercent", args.max_drop)?;
    put(&mut map, "shortCircuitCurrent", args.sc_current)?;
    put(&mut map, "faultDuration", args.fault_duration)?;
    put(&mut map, "airInstallationMethod", args.air_method)?;
    put(&mut map, "cableSpacing", args.spacing.as_ref())?;
    put(&mut map, "numberOfTrays", args.trays)?;
    Ok(map)
}

fn put<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: Option<T>) -> Result<()> {
    if let Some(value) = value {
        let value = serde_json::to_value(value).with_context(|| format!("encoding {key}"))?;
        map.insert(key.to_string(), value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cable_core::{
        Arrangement, Construction, Installation, Material, Metres, Seconds, SquareMillimetres,
    };
    use tempfile::tempdir;

    fn flags() -> CableArgs {
        CableArgs {
            material: Some(Material::Copper),
            construction: Some(Construction::SingleCore),
            voltage: Some("0.6/1kV".to_string()),
            size: Some(95.0),
            installation: Some(Installation::InAir),
            arrangement: Some(Arrangement::Trefoil),
            ..CableArgs::default()
        }
    }

    #[test]
    fn test_flags_only() {
        let params = build_parameters(&flags(), &CableConfig::default()).unwrap();
        assert_eq!(params.material, Material::Copper);
        assert_eq!(params.conductor_size, SquareMillimetres(95.0));
        assert_eq!(params.arrangement, Some(Arrangement::Trefoil));
        assert_eq!(params.cable_length, Metres(100.0));
    }

    #[test]
    fn test_config_defaults_sit_beneath_flags() {
        let mut config = CableConfig::default();
        config.defaults.fault_duration_s = 0.5;
        config.defaults.cable_length_m = 40.0;
        let mut args = flags();
        args.length = Some(250.0);
        let params = build_parameters(&args, &config).unwrap();
        assert_eq!(params.fault_duration, Seconds(0.5));
        assert_eq!(params.cable_length, Metres(250.0));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cable.toml");
        fs::write(
            &path,
            r#"
material = "aluminum"
construction = "threeCore"
voltageRating = "0.6/1kV"
conductorSize = 120
installation = "buriedDirect"
numberOfCircuits = 2
"#,
        )
        .unwrap();
        let args = CableArgs {
            params: Some(path),
            size: Some(150.0),
            ..CableArgs::default()
        };
        let params = build_parameters(&args, &CableConfig::default()).unwrap();
        assert_eq!(params.material, Material::Aluminum);
        assert_eq!(params.number_of_circuits, 2);
        assert_eq!(params.conductor_size, SquareMillimetres(150.0));
    }

    #[test]
    fn test_missing_required_field() {
        let mut args = flags();
        args.material = None;
        let err = build_parameters(&args, &CableConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("material"));
    }

    #[test]
    fn test_non_table_parameter_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cable.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let args = CableArgs {
            params: Some(path),
            ..CableArgs::default()
        };
        assert!(build_parameters(&args, &CableConfig::default()).is_err());
    }

    #[test]
    fn test_bundled_tables_when_nothing_configured() {
        let (tables, source) = load_tables(None, &CableConfig::default()).unwrap();
        assert_eq!(source, TableSource::Bundled);
        assert!(!tables.ampacity.is_empty());
    }

    #[test]
    fn test_configured_table_path_missing() {
        let mut config = CableConfig::default();
        config.tables.path = "/nonexistent/tables.json".to_string();
        let err = load_tables(None, &config).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tables.json"));
    }
}
