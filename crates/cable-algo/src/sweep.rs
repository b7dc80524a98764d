//! Size sweep: every listed size rated under the selected cable's derating.

use cable_core::{
    Amperes, CableParameters, CableResult, CableTables, Diagnostics, SizeSweep, SizeSweepRow,
    SquareMillimetres,
};

use crate::base_rating::lookup_base_rating;
use crate::derating::derating_factors;
use crate::resistance::conductor_resistance;
use crate::sizing::smallest_adequate_size;
use crate::voltage_drop::{drop_volts, missing_precondition};

/// One row per size that has a base rating, in ascending size order.
///
/// The selected size must itself resolve, since the sweep reuses its
/// derating; sizes beyond the end of the rating array are skipped. Derating
/// warnings and the reason a voltage drop column is missing are returned
/// alongside the rows.
pub fn sweep_sizes(tables: &CableTables, params: &CableParameters) -> CableResult<SizeSweep> {
    params.validate()?;
    let base = lookup_base_rating(tables, params)?;
    let mut diag = Diagnostics::new();
    let total_factor = derating_factors(tables, params, &mut diag).total;

    let required_per_circuit = params.required_current_per_circuit();
    let has_requirement = params.required_current.value() > 0.0;
    let recommended = has_requirement
        .then(|| {
            smallest_adequate_size(&base.column, base.sizes, total_factor, required_per_circuit)
        })
        .flatten()
        .unwrap_or(params.conductor_size);
    let drop_skipped = missing_precondition(params);
    if let Some(reason) = drop_skipped {
        diag.add_warning("voltage_drop", &format!("column omitted: {reason}"));
    }
    let computes_drop = drop_skipped.is_none();
    let three_phase = params.is_three_phase();
    let circuits = f64::from(params.number_of_circuits);

    let rows: Vec<SizeSweepRow> = base
        .sizes
        .iter()
        .enumerate()
        .filter_map(|(idx, size)| {
            let rating = base.column.rating_at(idx)?;
            let size = SquareMillimetres(*size);
            let per_circuit = Amperes((rating.value() * total_factor).round());

            let voltage_drop_percent = computes_drop.then(|| {
                let r = conductor_resistance(tables, params.material, size, params.cable_length);
                let drop = drop_volts(required_per_circuit, r.total, three_phase);
                drop / params.supply_voltage * 100.0
            });

            Some(SizeSweepRow {
                size,
                base_rating: rating,
                final_rating_per_circuit: per_circuit,
                final_rating_total: per_circuit * circuits,
                meets_requirement: rating.value() * total_factor >= required_per_circuit.value(),
                voltage_drop_percent,
                selected: size == params.conductor_size,
                recommended: size == recommended,
            })
        })
        .collect();

    Ok(SizeSweep {
        rows,
        diagnostics: diag,
    })
}
