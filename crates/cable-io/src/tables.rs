//! Loading [`CableTables`] from JSON.

use std::fs;
use std::path::Path;

use cable_core::{CableError, CableResult, CableTables};

/// Table data compiled into the crate: 0.6/1kV and 6.35/11kV classes for
/// copper and aluminum, single- and three-core, all installation methods.
pub const DEFAULT_TABLES_JSON: &str = include_str!("../data/default_tables.json");

/// The bundled table set.
pub fn default_tables() -> CableResult<CableTables> {
    parse_tables(DEFAULT_TABLES_JSON)
}

pub fn parse_tables(json: &str) -> CableResult<CableTables> {
    serde_json::from_str(json).map_err(|e| CableError::Parse(format!("invalid table data: {e}")))
}

/// Read a table file. Only JSON is accepted; the document shape is
/// described on [`cable_core::tables`].
pub fn load_tables(path: impl AsRef<Path>) -> CableResult<CableTables> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        CableError::Parse(format!("invalid table data in '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cable_core::{Arrangement, CableType, Construction, Installation, SquareMillimetres};

    #[test]
    fn test_default_tables_cover_all_cable_types() {
        let t = default_tables().unwrap();
        for cable_type in CableType::ALL {
            let voltages = t.voltage_classes(*cable_type);
            assert_eq!(voltages, vec!["0.6/1kV", "6.35/11kV"], "{cable_type}");
            for voltage in voltages {
                assert_eq!(t.installations(*cable_type, voltage).len(), 3);
            }
        }
    }

    #[test]
    fn test_default_size_lists() {
        let t = default_tables().unwrap();
        assert_eq!(t.sizes(Construction::SingleCore).unwrap().len(), 15);
        assert_eq!(t.sizes(Construction::ThreeCore).unwrap().len(), 12);
        assert_eq!(
            t.size_index(Construction::ThreeCore, SquareMillimetres(500.0))
                .unwrap(),
            11
        );
    }

    #[test]
    fn test_default_single_core_has_both_arrangements() {
        let t = default_tables().unwrap();
        for arrangement in Arrangement::ALL {
            let col = t
                .rating_column(
                    CableType::SingleCoreAluminum,
                    "6.35/11kV",
                    Installation::InDucts,
                    Some(*arrangement),
                )
                .unwrap();
            assert_eq!(col.ratings.len(), 15);
        }
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_tables("{ not json").unwrap_err();
        assert_eq!(err.kind(), "Parse");
    }
}
