//! I²R conductor losses and transmission efficiency.

use cable_core::{
    Amperes, CableParameters, ConductorResistance, Diagnostics, KilovoltAmperes, Ohms,
    PowerLossSummary, Watts,
};

/// Loss of one circuit: 3·I²R for three-phase, I²R otherwise.
pub fn circuit_loss(current: Amperes, total_resistance: Ohms, three_phase: bool) -> Watts {
    let loss = current.value().powi(2) * total_resistance.value();
    if three_phase {
        Watts(3.0 * loss)
    } else {
        Watts(loss)
    }
}

/// Apparent power delivered at the supply voltage and total current.
pub fn apparent_power(params: &CableParameters) -> KilovoltAmperes {
    let phase = if params.is_three_phase() {
        3f64.sqrt()
    } else {
        1.0
    };
    if !params.supply_voltage.is_positive() {
        return KilovoltAmperes(0.0);
    }
    KilovoltAmperes(params.supply_voltage.value() * params.required_current.value() * phase / 1000.0)
}

/// Efficiency as `100 − loss_W / (S_kVA × 10)`, i.e. the loss as a
/// percentage of apparent power taken away from 100. Zero without apparent
/// power.
pub fn efficiency_percent(loss: Watts, apparent: KilovoltAmperes) -> f64 {
    if apparent.value() > 0.0 {
        100.0 - loss.value() / (apparent.value() * 10.0)
    } else {
        0.0
    }
}

/// The input that prevents a loss calculation, if any.
pub fn missing_precondition(params: &CableParameters) -> Option<&'static str> {
    if !params.required_current.is_positive() {
        Some("required current is zero")
    } else if !params.conductor_size.is_positive() {
        Some("conductor size is zero")
    } else if !params.cable_length.is_positive() {
        Some("cable length is not positive")
    } else {
        None
    }
}

/// Total losses across all circuits. Not applicable without a load current,
/// a positive size or a positive cable length.
pub fn power_loss_summary(
    params: &CableParameters,
    resistance: &ConductorResistance,
) -> PowerLossSummary {
    let three_phase = params.is_three_phase();
    if missing_precondition(params).is_some() {
        return PowerLossSummary::not_applicable(three_phase);
    }

    let per_circuit = circuit_loss(
        params.required_current_per_circuit(),
        resistance.total,
        three_phase,
    );
    let loss = per_circuit * f64::from(params.number_of_circuits);
    let apparent = apparent_power(params);

    PowerLossSummary {
        loss,
        loss_kw: loss.to_kilowatts(),
        apparent_power: apparent,
        efficiency_percent: efficiency_percent(loss, apparent),
        three_phase,
        applicable: true,
    }
}

pub(crate) fn summary_with_diagnostics(
    params: &CableParameters,
    resistance: Option<&ConductorResistance>,
    diag: &mut Diagnostics,
) -> PowerLossSummary {
    let summary = match (missing_precondition(params), resistance) {
        (None, Some(r)) => power_loss_summary(params, r),
        (reason, _) => {
            let reason = reason.unwrap_or("no conductor resistance");
            diag.add_warning("power_loss", &format!("skipped: {reason}"));
            return PowerLossSummary::not_applicable(params.is_three_phase());
        }
    };
    if summary.apparent_power.value() <= 0.0 {
        diag.add_warning(
            "power_loss",
            "supply voltage is zero, efficiency not computed",
        );
    }
    summary
}
