//! Top-level rating calculation.
//!
//! Runs the sub-computations in order and packages their results. Only
//! parameter validation and the base-rating lookup can fail the call; every
//! later step degrades to a `NotApplicable` result with a warning.

use cable_core::{
    Amperes, CableParameters, CableRatingResult, CableResult, CableTables, Construction,
    Diagnostics, SizeSweep,
};

use crate::base_rating::lookup_base_rating;
use crate::derating::derating_factors;
use crate::resistance::conductor_resistance;
use crate::sizing::recommend_size;
use crate::sweep::sweep_sizes;
use crate::{power_loss, short_circuit, voltage_drop};

/// Rating engine bound to one immutable set of tables.
#[derive(Debug, Clone, Copy)]
pub struct RatingEngine<'t> {
    tables: &'t CableTables,
}

impl<'t> RatingEngine<'t> {
    pub fn new(tables: &'t CableTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t CableTables {
        self.tables
    }

    /// Rate one cable. See [`compute_rating`].
    pub fn rate(&self, params: &CableParameters) -> CableResult<CableRatingResult> {
        compute_rating(self.tables, params)
    }

    /// Rate every listed size of the construction. See [`sweep_sizes`].
    pub fn sweep(&self, params: &CableParameters) -> CableResult<SizeSweep> {
        sweep_sizes(self.tables, params)
    }
}

/// Compute the full rating result for one parameter set.
///
/// Fails with `InvalidInput` for out-of-range parameters and with
/// `MissingTableData` / `UnsupportedSize` when no base rating exists.
pub fn compute_rating(
    tables: &CableTables,
    params: &CableParameters,
) -> CableResult<CableRatingResult> {
    params.validate()?;
    let mut diag = Diagnostics::new();

    if params.construction == Construction::ThreeCore {
        if let Some(arrangement) = params.arrangement {
            diag.add_warning_with_entity(
                "input",
                "arrangement only applies to singleCore cables, ignored",
                arrangement.as_str(),
            );
        }
    }

    let base = lookup_base_rating(tables, params)?;
    let derating = derating_factors(tables, params, &mut diag);

    let final_rating_per_circuit = Amperes((base.rating.value() * derating.total).round());
    let final_rating_total = final_rating_per_circuit * f64::from(params.number_of_circuits);

    let recommendation = recommend_size(
        &base.column,
        base.sizes,
        derating.total,
        params,
        final_rating_total,
    );

    let short_circuit = short_circuit::check_with_diagnostics(
        params.material,
        params.conductor_size,
        params.short_circuit_current,
        params.fault_duration,
        &mut diag,
    );

    // Drop and loss both need a load current over a positive length.
    let carries_load = params.required_current.is_positive() && params.cable_length.is_positive();
    let resistance = carries_load.then(|| {
        conductor_resistance(
            tables,
            params.material,
            params.conductor_size,
            params.cable_length,
        )
    });
    let voltage_drop = voltage_drop::check_with_diagnostics(params, resistance.as_ref(), &mut diag);
    let power_loss = power_loss::summary_with_diagnostics(params, resistance.as_ref(), &mut diag);

    Ok(CableRatingResult {
        base_rating: base.rating,
        derating,
        final_rating_per_circuit,
        final_rating_total,
        number_of_circuits: params.number_of_circuits,
        recommendation,
        short_circuit,
        resistance,
        voltage_drop,
        power_loss,
        diagnostics: diag,
    })
}
