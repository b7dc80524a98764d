//! Static lookup tables consumed by the rating engine.
//!
//! The JSON shape mirrors how cable manufacturers publish rating data:
//!
//! ```json
//! {
//!   "conductorSizes": { "singleCore": [25, 35, ...], "threeCore": [25, 35, ...] },
//!   "ampacity": {
//!     "singleCoreCopper": {
//!       "0.6/1kV": {
//!         "inAir": { "trefoil": [...], "flatTouching": [...] },
//!         "buriedDirect": { "trefoil": [...], "flatTouching": [...] }
//!       }
//!     },
//!     "threeCoreCopper": { "0.6/1kV": { "inAir": [...], "inDucts": [...] } }
//!   },
//!   "temperatureFactors": { "air": { "temperatures": [...], "factors": [...] } },
//!   "resistance": { "copper": { "25": 0.727, ... } }
//! }
//! ```
//!
//! Rating arrays are aligned positionally with the size list of the
//! construction. Every accessor that can miss returns a
//! [`CableError::MissingTableData`] naming the absent key path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::units::{Amperes, OhmsPerKm, SquareMillimetres};
use crate::{
    Arrangement, CableError, CableResult, CableType, Construction, Environment, Installation,
    Material,
};

/// Ratings for one installation method.
///
/// Three-core cables have a single array; single-core cables have one array
/// per arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstallationRatings {
    Ratings(Vec<f64>),
    ByArrangement(BTreeMap<Arrangement, Vec<f64>>),
}

/// Ambient-temperature correction curve for one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureCurve {
    pub temperatures: Vec<f64>,
    pub factors: Vec<f64>,
}

type VoltagePartition = BTreeMap<Installation, InstallationRatings>;

/// All table data the engine reads. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableTables {
    /// Ascending size list per construction (mm²)
    #[serde(default)]
    pub conductor_sizes: BTreeMap<Construction, Vec<f64>>,
    /// Base ratings (A) by cable type → voltage class → installation
    #[serde(default)]
    pub ampacity: BTreeMap<CableType, BTreeMap<String, VoltagePartition>>,
    #[serde(default)]
    pub temperature_factors: BTreeMap<Environment, TemperatureCurve>,
    /// Conductor resistance (Ω/km) by material → size
    #[serde(default)]
    pub resistance: BTreeMap<Material, BTreeMap<u32, f64>>,
}

/// A resolved rating array together with the key path that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingColumn<'a> {
    pub ratings: &'a [f64],
    pub cable_type: CableType,
    pub voltage: &'a str,
    pub installation: Installation,
    pub arrangement: Option<Arrangement>,
}

impl RatingColumn<'_> {
    /// Rating at a size index, if the array reaches that far.
    pub fn rating_at(&self, index: usize) -> Option<Amperes> {
        self.ratings.get(index).copied().map(Amperes)
    }

    /// Human-readable key path, e.g. `ampacity > singleCoreCopper > 0.6/1kV > inAir > trefoil`.
    pub fn key(&self) -> String {
        let mut key = ampacity_key(self.cable_type, Some(self.voltage), Some(self.installation));
        if let Some(arrangement) = self.arrangement {
            key.push_str(" > ");
            key.push_str(arrangement.as_str());
        }
        key
    }
}

fn ampacity_key(
    cable_type: CableType,
    voltage: Option<&str>,
    installation: Option<Installation>,
) -> String {
    let mut parts = vec!["ampacity".to_string(), cable_type.as_str().to_string()];
    if let Some(v) = voltage {
        parts.push(v.to_string());
    }
    if let Some(i) = installation {
        parts.push(i.as_str().to_string());
    }
    parts.join(" > ")
}

impl CableTables {
    /// Ordered size list for a construction.
    pub fn sizes(&self, construction: Construction) -> CableResult<&[f64]> {
        self.conductor_sizes
            .get(&construction)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                CableError::missing(format!("conductorSizes > {}", construction.as_str()))
            })
    }

    /// Position of a size in the construction's list. Exact match only.
    pub fn size_index(
        &self,
        construction: Construction,
        size: SquareMillimetres,
    ) -> CableResult<usize> {
        self.sizes(construction)?
            .iter()
            .position(|s| *s == size.value())
            .ok_or_else(|| CableError::UnsupportedSize {
                size: size.value(),
                construction: construction.as_str().to_string(),
            })
    }

    /// Walk cable type → voltage → installation (→ arrangement) to a rating array.
    ///
    /// Single-core cables need an arrangement; three-core cables ignore it.
    pub fn rating_column<'a>(
        &'a self,
        cable_type: CableType,
        voltage: &'a str,
        installation: Installation,
        arrangement: Option<Arrangement>,
    ) -> CableResult<RatingColumn<'a>> {
        let arrangement = match cable_type.construction() {
            Construction::SingleCore => Some(arrangement.ok_or_else(|| {
                CableError::invalid("arrangement", "is required for singleCore cables")
            })?),
            Construction::ThreeCore => None,
        };
        let by_voltage = self
            .ampacity
            .get(&cable_type)
            .ok_or_else(|| CableError::missing(ampacity_key(cable_type, None, None)))?;
        let by_installation = by_voltage
            .get(voltage)
            .ok_or_else(|| CableError::missing(ampacity_key(cable_type, Some(voltage), None)))?;
        let ratings = by_installation.get(&installation).ok_or_else(|| {
            CableError::missing(ampacity_key(cable_type, Some(voltage), Some(installation)))
        })?;

        let column_key = |a: Option<Arrangement>| RatingColumn {
            ratings: &[],
            cable_type,
            voltage,
            installation,
            arrangement: a,
        };

        let ratings: &[f64] = match (cable_type.construction(), ratings) {
            (Construction::ThreeCore, InstallationRatings::Ratings(values)) => values.as_slice(),
            (Construction::SingleCore, InstallationRatings::ByArrangement(map)) => arrangement
                .and_then(|a| map.get(&a))
                .map(Vec::as_slice)
                .ok_or_else(|| CableError::missing(column_key(arrangement).key()))?,
            (Construction::ThreeCore, InstallationRatings::ByArrangement(_)) => {
                return Err(CableError::missing(format!(
                    "{} (expected a rating array, found arrangements)",
                    column_key(None).key()
                )));
            }
            (Construction::SingleCore, InstallationRatings::Ratings(_)) => {
                return Err(CableError::missing(column_key(arrangement).key()));
            }
        };

        Ok(RatingColumn {
            ratings,
            cable_type,
            voltage,
            installation,
            arrangement,
        })
    }

    pub fn temperature_curve(&self, environment: Environment) -> Option<&TemperatureCurve> {
        self.temperature_factors.get(&environment)
    }

    /// Tabulated resistance for a material and whole-mm² size.
    pub fn resistance_per_km(
        &self,
        material: Material,
        size: SquareMillimetres,
    ) -> Option<OhmsPerKm> {
        let key = size.table_key()?;
        self.resistance
            .get(&material)?
            .get(&key)
            .copied()
            .filter(|r| *r > 0.0)
            .map(OhmsPerKm)
    }

    /// Voltage classes available for a cable type, in key order.
    pub fn voltage_classes(&self, cable_type: CableType) -> Vec<&str> {
        self.ampacity
            .get(&cable_type)
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Installation methods available for a cable type and voltage class.
    pub fn installations(&self, cable_type: CableType, voltage: &str) -> Vec<Installation> {
        self.ampacity
            .get(&cable_type)
            .and_then(|m| m.get(voltage))
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default()
    }
}
