//! The input record for one rating calculation.

use serde::{Deserialize, Serialize};

use crate::units::{
    Amperes, Celsius, KelvinMetresPerWatt, Kiloamperes, Metres, Millimetres, Seconds,
    SquareMillimetres, Volts,
};
use crate::{
    AirInstallationMethod, Arrangement, CableError, CableResult, Construction, Installation,
    Material,
};

/// Soil thermal resistivity the ampacity tables are tabulated at.
pub const REFERENCE_SOIL_RESISTIVITY: f64 = 1.5;

/// Cable specification, installation and load conditions.
///
/// Optional fields take the defaults below when absent from a parameter
/// file; builder methods set them in code.
///
/// | Field | Default |
/// |-------|---------|
/// | `ambientTemperature` | 25 °C |
/// | `depthOfLaying` | 900 mm |
/// | `soilThermalResistivity` | 1.5 K·m/W |
/// | `numberOfCircuits` | 1 |
/// | `requiredCurrent` | 0 A |
/// | `cableLength` | 100 m |
/// | `supplyVoltage` | 0 V |
/// | `maxVoltageDropPercent` | 5 % |
/// | `shortCircuitCurrent` | 0 kA |
/// | `faultDuration` | 1 s |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableParameters {
    pub material: Material,
    pub construction: Construction,
    /// Voltage class key, e.g. "0.6/1kV"
    pub voltage_rating: String,
    pub conductor_size: SquareMillimetres,
    pub installation: Installation,
    /// Required for single-core cables, ignored for three-core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<Arrangement>,
    #[serde(default = "default_ambient_temperature")]
    pub ambient_temperature: Celsius,
    #[serde(default = "default_depth_of_laying")]
    pub depth_of_laying: Millimetres,
    #[serde(default = "default_soil_resistivity")]
    pub soil_thermal_resistivity: KelvinMetresPerWatt,
    #[serde(default = "default_number_of_circuits")]
    pub number_of_circuits: u32,
    /// Total across all circuits
    #[serde(default)]
    pub required_current: Amperes,
    #[serde(default = "default_cable_length")]
    pub cable_length: Metres,
    #[serde(default)]
    pub supply_voltage: Volts,
    #[serde(default = "default_max_voltage_drop")]
    pub max_voltage_drop_percent: f64,
    #[serde(default)]
    pub short_circuit_current: Kiloamperes,
    #[serde(default = "default_fault_duration")]
    pub fault_duration: Seconds,

    // Descriptive fields, carried into reports only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_installation_method: Option<AirInstallationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_trays: Option<u32>,
}

fn default_ambient_temperature() -> Celsius {
    Celsius(25.0)
}

fn default_depth_of_laying() -> Millimetres {
    Millimetres(900.0)
}

fn default_soil_resistivity() -> KelvinMetresPerWatt {
    KelvinMetresPerWatt(REFERENCE_SOIL_RESISTIVITY)
}

fn default_number_of_circuits() -> u32 {
    1
}

fn default_cable_length() -> Metres {
    Metres(100.0)
}

fn default_max_voltage_drop() -> f64 {
    5.0
}

fn default_fault_duration() -> Seconds {
    Seconds(1.0)
}

impl CableParameters {
    /// Create parameters for a cable with every optional field defaulted.
    pub fn new(
        material: Material,
        construction: Construction,
        voltage_rating: impl Into<String>,
        conductor_size: SquareMillimetres,
        installation: Installation,
    ) -> Self {
        Self {
            material,
            construction,
            voltage_rating: voltage_rating.into(),
            conductor_size,
            installation,
            arrangement: None,
            ambient_temperature: default_ambient_temperature(),
            depth_of_laying: default_depth_of_laying(),
            soil_thermal_resistivity: default_soil_resistivity(),
            number_of_circuits: default_number_of_circuits(),
            required_current: Amperes(0.0),
            cable_length: default_cable_length(),
            supply_voltage: Volts(0.0),
            max_voltage_drop_percent: default_max_voltage_drop(),
            short_circuit_current: Kiloamperes(0.0),
            fault_duration: default_fault_duration(),
            air_installation_method: None,
            cable_spacing: None,
            number_of_trays: None,
        }
    }

    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = Some(arrangement);
        self
    }

    pub fn with_ambient_temperature(mut self, temperature: Celsius) -> Self {
        self.ambient_temperature = temperature;
        self
    }

    pub fn with_depth_of_laying(mut self, depth: Millimetres) -> Self {
        self.depth_of_laying = depth;
        self
    }

    pub fn with_soil_thermal_resistivity(mut self, resistivity: KelvinMetresPerWatt) -> Self {
        self.soil_thermal_resistivity = resistivity;
        self
    }

    pub fn with_circuits(mut self, circuits: u32) -> Self {
        self.number_of_circuits = circuits;
        self
    }

    pub fn with_required_current(mut self, current: Amperes) -> Self {
        self.required_current = current;
        self
    }

    pub fn with_cable_length(mut self, length: Metres) -> Self {
        self.cable_length = length;
        self
    }

    pub fn with_supply_voltage(mut self, voltage: Volts) -> Self {
        self.supply_voltage = voltage;
        self
    }

    pub fn with_max_voltage_drop_percent(mut self, percent: f64) -> Self {
        self.max_voltage_drop_percent = percent;
        self
    }

    pub fn with_short_circuit(mut self, current: Kiloamperes, duration: Seconds) -> Self {
        self.short_circuit_current = current;
        self.fault_duration = duration;
        self
    }

    /// Current each circuit has to carry.
    pub fn required_current_per_circuit(&self) -> Amperes {
        self.required_current / f64::from(self.number_of_circuits.max(1))
    }

    /// Whether the circuit is treated as three-phase for drop and loss.
    pub fn is_three_phase(&self) -> bool {
        self.construction.is_three_phase(self.number_of_circuits)
    }

    /// Arrangement key used for the ampacity lookup, if the construction
    /// needs one.
    pub fn lookup_arrangement(&self) -> CableResult<Option<Arrangement>> {
        match self.construction {
            Construction::ThreeCore => Ok(None),
            Construction::SingleCore => self
                .arrangement
                .map(Some)
                .ok_or_else(|| CableError::invalid("arrangement", "is required for singleCore cables")),
        }
    }

    /// Check the fields the base rating and derating steps depend on.
    ///
    /// Inputs used only by the short-circuit, voltage drop and power loss
    /// checks are not validated here; those checks are skipped with a
    /// diagnostic when their inputs are unusable. Soil resistivity is only
    /// checked for underground installations.
    pub fn validate(&self) -> CableResult<()> {
        if self.voltage_rating.trim().is_empty() {
            return Err(CableError::invalid("voltageRating", "must not be empty"));
        }
        require_finite("conductorSize", self.conductor_size.value())?;
        if self.conductor_size.value() <= 0.0 {
            return Err(CableError::invalid("conductorSize", "must be greater than zero"));
        }
        require_finite("ambientTemperature", self.ambient_temperature.value())?;
        require_finite("depthOfLaying", self.depth_of_laying.value())?;
        require_finite("soilThermalResistivity", self.soil_thermal_resistivity.value())?;
        if self.installation.is_underground() && self.soil_thermal_resistivity.value() <= 0.0 {
            return Err(CableError::invalid(
                "soilThermalResistivity",
                "must be greater than zero for underground installations",
            ));
        }
        if self.number_of_circuits == 0 {
            return Err(CableError::invalid("numberOfCircuits", "must be at least 1"));
        }
        require_non_negative("requiredCurrent", self.required_current.value())?;
        Ok(())
    }
}

fn require_finite(field: &str, value: f64) -> CableResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CableError::invalid(field, "must be a finite number"))
    }
}

fn require_non_negative(field: &str, value: f64) -> CableResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CableError::invalid(field, "must not be negative"));
    }
    Ok(())
}
