//! Loading [`CableParameters`] from TOML or JSON parameter files.
//!
//! ```toml
//! material = "copper"
//! construction = "singleCore"
//! voltageRating = "0.6/1kV"
//! conductorSize = 95
//! installation = "buriedDirect"
//! arrangement = "trefoil"
//! requiredCurrent = 250
//! supplyVoltage = 400
//! ```

use std::fs;
use std::path::Path;

use cable_core::{CableParameters, CableResult};

use crate::format::DocumentFormat;

/// Read a parameter file, choosing the format from its extension.
///
/// Absent optional fields take their defaults. The record is not validated
/// here; the engine does that before rating.
pub fn load_parameters(path: impl AsRef<Path>) -> CableResult<CableParameters> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    parse_parameters(&text, format)
}

pub fn parse_parameters(text: &str, format: DocumentFormat) -> CableResult<CableParameters> {
    format.parse(text)
}
