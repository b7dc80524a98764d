//! The output record of a rating calculation.
//!
//! Each derived check carries its own [`CheckStatus`]. A check whose inputs
//! were incomplete reports `NotApplicable` with zeroed values rather than
//! failing the whole calculation.

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::units::{
    Amperes, Kiloamperes, KilovoltAmperes, Kilowatts, Ohms, OhmsPerKm, SquareMillimetres, Volts,
    Watts,
};

/// Outcome of a pass/fail check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckStatus {
    Pass,
    Fail,
    NotApplicable,
}

impl CheckStatus {
    pub fn from_pass(pass: bool) -> Self {
        if pass {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, CheckStatus::NotApplicable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The four derating multipliers and their product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeratingFactors {
    pub temperature: f64,
    pub depth: f64,
    pub resistivity: f64,
    pub grouping: f64,
    pub total: f64,
    /// False for cables in air, where depth and resistivity are fixed at 1.0
    pub ground_factors_applicable: bool,
}

impl DeratingFactors {
    /// Combine four factors; `total` is always their product.
    pub fn new(temperature: f64, depth: f64, resistivity: f64, grouping: f64) -> Self {
        Self {
            temperature,
            depth,
            resistivity,
            grouping,
            total: temperature * depth * resistivity * grouping,
            ground_factors_applicable: true,
        }
    }

    pub fn in_air(mut self) -> Self {
        self.ground_factors_applicable = false;
        self
    }
}

/// Smallest conductor meeting the required current under the same derating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecommendation {
    pub recommended_size: SquareMillimetres,
    pub required_current_per_circuit: Amperes,
    /// ((final total rating / required current) − 1) × 100; 0 without a requirement
    pub safety_margin_percent: f64,
    /// Pass when the selected size carries the requirement with a positive margin
    pub status: CheckStatus,
}

/// Thermal short-circuit withstand of the selected conductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortCircuitCheck {
    pub fault_current: Kiloamperes,
    /// Rounded to the nearest whole kA
    pub withstand: Kiloamperes,
    /// Smallest cross-section that would withstand the fault
    pub minimum_cross_section: SquareMillimetres,
    pub k_constant: f64,
    pub status: CheckStatus,
}

impl ShortCircuitCheck {
    pub fn not_applicable(fault_current: Kiloamperes, k_constant: f64) -> Self {
        Self {
            fault_current,
            withstand: Kiloamperes(0.0),
            minimum_cross_section: SquareMillimetres(0.0),
            k_constant,
            status: CheckStatus::NotApplicable,
        }
    }
}

/// Where the per-km resistance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResistanceSource {
    Table,
    /// ρ / A from the material resistivity
    Approximation,
}

/// Conductor resistance used for drop and loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConductorResistance {
    pub per_km: OhmsPerKm,
    pub total: Ohms,
    pub source: ResistanceSource,
}

/// Voltage drop along the run at the required current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageDropCheck {
    pub drop: Volts,
    pub percent: f64,
    pub limit_percent: f64,
    pub three_phase: bool,
    pub status: CheckStatus,
}

impl VoltageDropCheck {
    pub fn not_applicable(limit_percent: f64, three_phase: bool) -> Self {
        Self {
            drop: Volts(0.0),
            percent: 0.0,
            limit_percent,
            three_phase,
            status: CheckStatus::NotApplicable,
        }
    }
}

/// Conductor I²R losses and the resulting transmission efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerLossSummary {
    /// Total across all circuits
    pub loss: Watts,
    pub loss_kw: Kilowatts,
    pub apparent_power: KilovoltAmperes,
    /// 100 − loss_W / (S_kVA × 10); 0 when apparent power is 0
    pub efficiency_percent: f64,
    pub three_phase: bool,
    pub applicable: bool,
}

impl PowerLossSummary {
    pub fn not_applicable(three_phase: bool) -> Self {
        Self {
            loss: Watts(0.0),
            loss_kw: Kilowatts(0.0),
            apparent_power: KilovoltAmperes(0.0),
            efficiency_percent: 0.0,
            three_phase,
            applicable: false,
        }
    }
}

/// Complete result of one rating calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CableRatingResult {
    pub base_rating: Amperes,
    pub derating: DeratingFactors,
    /// round(base × total factor)
    pub final_rating_per_circuit: Amperes,
    /// Per-circuit rating × number of circuits
    pub final_rating_total: Amperes,
    pub number_of_circuits: u32,
    pub recommendation: SizeRecommendation,
    pub short_circuit: ShortCircuitCheck,
    /// Present when voltage drop or power loss was computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<ConductorResistance>,
    pub voltage_drop: VoltageDropCheck,
    pub power_loss: PowerLossSummary,
    #[serde(skip_serializing_if = "diagnostics_empty")]
    pub diagnostics: Diagnostics,
}

fn diagnostics_empty(diag: &Diagnostics) -> bool {
    !diag.has_issues()
}

/// One line of a size sweep: a candidate size under the same derating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSweepRow {
    pub size: SquareMillimetres,
    pub base_rating: Amperes,
    pub final_rating_per_circuit: Amperes,
    pub final_rating_total: Amperes,
    /// Rating × factor meets the per-circuit requirement
    pub meets_requirement: bool,
    pub voltage_drop_percent: Option<f64>,
    pub selected: bool,
    pub recommended: bool,
}

/// Result of a size sweep: the rows plus the warnings raised while deriving
/// the shared derating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSweep {
    pub rows: Vec<SizeSweepRow>,
    pub diagnostics: Diagnostics,
}
