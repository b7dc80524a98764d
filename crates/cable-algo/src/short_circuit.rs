//! Adiabatic short-circuit withstand, I = k·A/√t.

use cable_core::{
    Amperes, CheckStatus, Diagnostics, Kiloamperes, Material, Seconds, ShortCircuitCheck,
    SquareMillimetres,
};

/// Withstand current of a conductor for a fault of the given duration,
/// in amperes and unrounded.
pub fn withstand_current(material: Material, size: SquareMillimetres, duration: Seconds) -> Amperes {
    Amperes(material.short_circuit_constant() * size.value() / duration.value().sqrt())
}

/// Smallest cross-section that withstands `fault` for `duration`, rounded to
/// a whole mm².
pub fn minimum_cross_section(
    material: Material,
    fault: Kiloamperes,
    duration: Seconds,
) -> SquareMillimetres {
    let area = fault.to_amperes().value() * duration.value().sqrt() / material.short_circuit_constant();
    SquareMillimetres(area.round())
}

/// The input that prevents a short-circuit check, if any.
pub fn missing_precondition(
    size: SquareMillimetres,
    fault: Kiloamperes,
    duration: Seconds,
) -> Option<&'static str> {
    if !fault.is_positive() {
        Some("short-circuit current is zero")
    } else if !duration.is_positive() {
        Some("fault duration is not positive")
    } else if !size.is_positive() {
        Some("conductor size is zero")
    } else {
        None
    }
}

/// Compare the rounded withstand (kA) against the prospective fault current.
///
/// Not applicable without a fault current, a positive fault duration or a
/// positive size.
pub fn short_circuit_check(
    material: Material,
    size: SquareMillimetres,
    fault: Kiloamperes,
    duration: Seconds,
) -> ShortCircuitCheck {
    let k = material.short_circuit_constant();
    if missing_precondition(size, fault, duration).is_some() {
        return ShortCircuitCheck::not_applicable(fault, k);
    }

    let withstand = Kiloamperes(
        withstand_current(material, size, duration)
            .to_kiloamperes()
            .value()
            .round(),
    );

    ShortCircuitCheck {
        fault_current: fault,
        withstand,
        minimum_cross_section: minimum_cross_section(material, fault, duration),
        k_constant: k,
        status: CheckStatus::from_pass(withstand >= fault),
    }
}

/// [`short_circuit_check`] that records why the check was skipped.
pub(crate) fn check_with_diagnostics(
    material: Material,
    size: SquareMillimetres,
    fault: Kiloamperes,
    duration: Seconds,
    diag: &mut Diagnostics,
) -> ShortCircuitCheck {
    if let Some(reason) = missing_precondition(size, fault, duration) {
        diag.add_warning("short_circuit", &format!("skipped: {reason}"));
    }
    short_circuit_check(material, size, fault, duration)
}
