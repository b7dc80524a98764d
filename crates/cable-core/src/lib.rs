//! # cable-core: Cable Rating Data Model
//!
//! Provides the data structures shared by the rating engine, the table
//! loaders and the command line: the input parameter record, the result
//! record, the static lookup tables, unit newtypes and the error type.
//!
//! ## Design Philosophy
//!
//! The rating calculation is a pure function over two immutable inputs:
//!
//! - **[`CableTables`]**: ampacity, temperature-factor and resistance data,
//!   loaded once and passed by reference
//! - **[`CableParameters`]**: one cable specification plus its installation
//!   and load conditions
//!
//! and one output, [`CableRatingResult`]. Nothing in this crate reads files,
//! logs or holds global state, so the same inputs always yield the same
//! result.
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_core::*;
//!
//! let params = CableParameters::new(
//!     Material::Copper,
//!     Construction::ThreeCore,
//!     "0.6/1kV",
//!     SquareMillimetres(95.0),
//!     Installation::BuriedDirect,
//! )
//! .with_required_current(Amperes(180.0))
//! .with_supply_voltage(Volts(400.0));
//!
//! assert!(params.validate().is_ok());
//! assert_eq!(CableType::of(params.material, params.construction).as_str(), "threeCoreCopper");
//! ```
//!
//! ## Keys
//!
//! Table partitions are keyed by the camelCase identifiers the enums
//! serialize to (`singleCoreCopper`, `inAir`, `flatTouching`, ...). The
//! voltage class is free text (`"0.6/1kV"`) because the set of classes is
//! defined by the table data rather than by the code.
//!
//! ## Modules
//!
//! - [`units`] - Unit newtypes (A, kA, V, Ω/km, mm², ...)
//! - [`parameters`] - Input record and its validation
//! - [`result`] - Output record and per-check sub-records
//! - [`tables`] - Static lookup tables and keyed access
//! - [`diagnostics`] - Warnings collected during a calculation
//! - [`error`] - Unified error type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod diagnostics;
pub mod error;
pub mod parameters;
pub mod result;
pub mod tables;
pub mod units;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{CableError, CableResult};
pub use parameters::CableParameters;
pub use result::{
    CableRatingResult, CheckStatus, ConductorResistance, DeratingFactors, PowerLossSummary,
    ResistanceSource, ShortCircuitCheck, SizeRecommendation, SizeSweep, SizeSweepRow,
    VoltageDropCheck,
};
pub use tables::{CableTables, InstallationRatings, TemperatureCurve};
pub use units::{
    Amperes, Celsius, KelvinMetresPerWatt, Kiloamperes, KilovoltAmperes, Kilowatts, Metres,
    Millimetres, Ohms, OhmsPerKm, Seconds, SquareMillimetres, Volts, Watts,
};

/// Implements `as_str`, `Display` and `FromStr` for a keyword enum.
///
/// The first string is the canonical key; any further strings are accepted
/// when parsing.
macro_rules! keyword_enum {
    ($type:ident { $($variant:ident => $key:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $type {
            /// All variants in declaration order.
            pub const ALL: &'static [$type] = &[$($type::$variant),+];

            /// Canonical table key.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($type::$variant => $key),+
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $type {
            type Err = CableError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key $(| $alias)* => Ok($type::$variant),)+
                    other => Err(CableError::invalid(
                        stringify!($type),
                        format!(
                            "'{}' is not one of: {}",
                            other,
                            [$($key),+].join(", ")
                        ),
                    )),
                }
            }
        }
    };
}

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    Copper,
    #[serde(alias = "aluminium")]
    Aluminum,
}

keyword_enum!(Material {
    Copper => "copper",
    Aluminum => "aluminum" | "aluminium",
});

impl Material {
    /// Adiabatic short-circuit constant k in A/mm² for a 1 s fault.
    pub fn short_circuit_constant(&self) -> f64 {
        match self {
            Material::Copper => 143.0,
            Material::Aluminum => 94.0,
        }
    }

    /// Electrical resistivity in Ω·m, used when no tabulated resistance exists.
    pub fn resistivity_ohm_m(&self) -> f64 {
        match self {
            Material::Copper => 1.72e-8,
            Material::Aluminum => 2.82e-8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Material::Copper => "Copper",
            Material::Aluminum => "Aluminum",
        }
    }
}

/// Number of cores in one cable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Construction {
    SingleCore,
    ThreeCore,
}

keyword_enum!(Construction {
    SingleCore => "singleCore",
    ThreeCore => "threeCore",
});

impl Construction {
    pub fn label(&self) -> &'static str {
        match self {
            Construction::SingleCore => "Single-Core",
            Construction::ThreeCore => "Three-Core",
        }
    }

    /// Whether a circuit of this construction is treated as three-phase.
    ///
    /// Three-core cables always are; single-core runs are when there are
    /// at least three of them.
    pub fn is_three_phase(&self, number_of_circuits: u32) -> bool {
        match self {
            Construction::ThreeCore => true,
            Construction::SingleCore => number_of_circuits >= 3,
        }
    }
}

/// Installation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Installation {
    InAir,
    BuriedDirect,
    InDucts,
}

keyword_enum!(Installation {
    InAir => "inAir",
    BuriedDirect => "buriedDirect",
    InDucts => "inDucts",
});

impl Installation {
    /// Ambient environment whose temperature-factor curve applies.
    pub fn environment(&self) -> Environment {
        match self {
            Installation::InAir => Environment::Air,
            Installation::InDucts => Environment::Ducts,
            Installation::BuriedDirect => Environment::Ground,
        }
    }

    /// Depth and soil resistivity only matter below ground.
    pub fn is_underground(&self) -> bool {
        !matches!(self, Installation::InAir)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Installation::InAir => "In Air",
            Installation::BuriedDirect => "Buried Direct in Ground",
            Installation::InDucts => "In Ducts",
        }
    }
}

/// Ambient environment for temperature correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Environment {
    Air,
    Ducts,
    Ground,
}

keyword_enum!(Environment {
    Air => "air",
    Ducts => "ducts",
    Ground => "ground",
});

/// Bundling of single-core cables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrangement {
    Trefoil,
    #[serde(alias = "flat")]
    FlatTouching,
}

keyword_enum!(Arrangement {
    Trefoil => "trefoil",
    FlatTouching => "flatTouching" | "flat",
});

impl Arrangement {
    pub fn label(&self) -> &'static str {
        match self {
            Arrangement::Trefoil => "Trefoil",
            Arrangement::FlatTouching => "Flat Touching",
        }
    }
}

/// Support system for cables installed in air. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AirInstallationMethod {
    PerforatedTrays,
    LadderSupports,
    VerticalTrays,
}

keyword_enum!(AirInstallationMethod {
    PerforatedTrays => "perforatedTrays",
    LadderSupports => "ladderSupports",
    VerticalTrays => "verticalTrays",
});

impl AirInstallationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AirInstallationMethod::PerforatedTrays => "On Perforated Trays",
            AirInstallationMethod::LadderSupports => "On Ladder Supports",
            AirInstallationMethod::VerticalTrays => "On Vertical Trays",
        }
    }
}

/// Top-level ampacity table partition: material and construction combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CableType {
    SingleCoreCopper,
    ThreeCoreCopper,
    SingleCoreAluminum,
    ThreeCoreAluminum,
}

keyword_enum!(CableType {
    SingleCoreCopper => "singleCoreCopper",
    ThreeCoreCopper => "threeCoreCopper",
    SingleCoreAluminum => "singleCoreAluminum",
    ThreeCoreAluminum => "threeCoreAluminum",
});

impl CableType {
    pub fn of(material: Material, construction: Construction) -> Self {
        match (material, construction) {
            (Material::Copper, Construction::SingleCore) => CableType::SingleCoreCopper,
            (Material::Copper, Construction::ThreeCore) => CableType::ThreeCoreCopper,
            (Material::Aluminum, Construction::SingleCore) => CableType::SingleCoreAluminum,
            (Material::Aluminum, Construction::ThreeCore) => CableType::ThreeCoreAluminum,
        }
    }

    pub fn construction(&self) -> Construction {
        match self {
            CableType::SingleCoreCopper | CableType::SingleCoreAluminum => Construction::SingleCore,
            CableType::ThreeCoreCopper | CableType::ThreeCoreAluminum => Construction::ThreeCore,
        }
    }

    pub fn material(&self) -> Material {
        match self {
            CableType::SingleCoreCopper | CableType::ThreeCoreCopper => Material::Copper,
            CableType::SingleCoreAluminum | CableType::ThreeCoreAluminum => Material::Aluminum,
        }
    }
}
