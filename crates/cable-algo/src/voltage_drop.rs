//! Voltage drop along the cable run.
//!
//! `ΔV = I × R` per circuit, multiplied by √3 for three-phase circuits.

use cable_core::{
    Amperes, CableParameters, CheckStatus, ConductorResistance, Diagnostics, Ohms,
    VoltageDropCheck, Volts,
};

pub fn drop_volts(current_per_circuit: Amperes, total_resistance: Ohms, three_phase: bool) -> Volts {
    let drop = current_per_circuit * total_resistance;
    if three_phase {
        drop * 3f64.sqrt()
    } else {
        drop
    }
}

/// The input that prevents a voltage drop calculation, if any.
pub fn missing_precondition(params: &CableParameters) -> Option<&'static str> {
    if !params.supply_voltage.is_positive() {
        Some("supply voltage is zero")
    } else if !params.conductor_size.is_positive() {
        Some("conductor size is zero")
    } else if !params.required_current.is_positive() {
        Some("required current is zero")
    } else if !params.cable_length.is_positive() {
        Some("cable length is not positive")
    } else if !params.max_voltage_drop_percent.is_finite() {
        Some("voltage drop limit is not a finite number")
    } else {
        None
    }
}

/// Voltage drop at the per-circuit current, checked against the limit.
pub fn voltage_drop_check(
    params: &CableParameters,
    resistance: &ConductorResistance,
) -> VoltageDropCheck {
    let three_phase = params.is_three_phase();
    let limit_percent = params.max_voltage_drop_percent;
    if missing_precondition(params).is_some() {
        return VoltageDropCheck::not_applicable(limit_percent, three_phase);
    }

    let drop = drop_volts(
        params.required_current_per_circuit(),
        resistance.total,
        three_phase,
    );
    let percent = drop / params.supply_voltage * 100.0;

    VoltageDropCheck {
        drop,
        percent,
        limit_percent,
        three_phase,
        status: CheckStatus::from_pass(percent <= limit_percent),
    }
}

pub(crate) fn check_with_diagnostics(
    params: &CableParameters,
    resistance: Option<&ConductorResistance>,
    diag: &mut Diagnostics,
) -> VoltageDropCheck {
    match (missing_precondition(params), resistance) {
        (None, Some(r)) => voltage_drop_check(params, r),
        (reason, _) => {
            let reason = reason.unwrap_or("no conductor resistance");
            diag.add_warning("voltage_drop", &format!("skipped: {reason}"));
            VoltageDropCheck::not_applicable(params.max_voltage_drop_percent, params.is_three_phase())
        }
    }
}
