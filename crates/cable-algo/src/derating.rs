//! Derating factors for non-reference installation conditions.
//!
//! | Factor | Applies to | Rule |
//! |--------|------------|------|
//! | Temperature | all | Tabulated per environment, closest listed temperature |
//! | Depth | underground | 0.95 beyond 1200 mm, 0.90 beyond 2000 mm |
//! | Soil resistivity | underground | 1.5/ρ above 1.5 K·m/W, 1 + (1.5 − ρ)/5 below, clamped to [0.7, 1.2] |
//! | Grouping | all | 1.0, 0.9, 0.8, 0.75, 0.7 by circuit count |

use cable_core::parameters::REFERENCE_SOIL_RESISTIVITY;
use cable_core::tables::TemperatureCurve;
use cable_core::{
    CableParameters, CableTables, Celsius, DeratingFactors, Diagnostics, Installation,
    KelvinMetresPerWatt, Millimetres,
};

const RESISTIVITY_FACTOR_MIN: f64 = 0.7;
const RESISTIVITY_FACTOR_MAX: f64 = 1.2;

/// Index of the listed value closest to `target`.
///
/// Linear scan keeping the first minimum, so under equal distance the lower
/// index wins. `None` for an empty list or when every entry is NaN.
pub fn closest_index(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values.iter().enumerate() {
        let diff = (value - target).abs();
        if diff.is_nan() {
            continue;
        }
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((idx, diff)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Ambient temperature correction from a curve.
///
/// Returns the factor and the temperature it was read at. An exact match
/// wins; otherwise the closest listed temperature is used.
pub fn temperature_factor(curve: &TemperatureCurve, ambient: Celsius) -> Option<(f64, Celsius)> {
    let idx = curve
        .temperatures
        .iter()
        .position(|t| *t == ambient.value())
        .or_else(|| closest_index(&curve.temperatures, ambient.value()))?;
    let factor = curve.factors.get(idx).copied()?;
    Some((factor, Celsius(curve.temperatures[idx])))
}

/// Burial depth correction. Thresholds are checked in ascending order and
/// the deeper one overrides.
pub fn depth_factor(installation: Installation, depth: Millimetres) -> f64 {
    if !installation.is_underground() {
        return 1.0;
    }
    let mut factor = 1.0;
    if depth.value() > 1200.0 {
        factor = 0.95;
    }
    if depth.value() > 2000.0 {
        factor = 0.90;
    }
    factor
}

/// Soil thermal resistivity correction relative to 1.5 K·m/W.
pub fn resistivity_factor(installation: Installation, resistivity: KelvinMetresPerWatt) -> f64 {
    let rho = resistivity.value();
    if !installation.is_underground() || rho == REFERENCE_SOIL_RESISTIVITY {
        return 1.0;
    }
    let factor = if rho > REFERENCE_SOIL_RESISTIVITY {
        REFERENCE_SOIL_RESISTIVITY / rho
    } else {
        1.0 + (REFERENCE_SOIL_RESISTIVITY - rho) / 5.0
    };
    factor.clamp(RESISTIVITY_FACTOR_MIN, RESISTIVITY_FACTOR_MAX)
}

/// Mutual heating of grouped circuits.
pub fn grouping_factor(number_of_circuits: u32) -> f64 {
    match number_of_circuits {
        0 | 1 => 1.0,
        2 => 0.9,
        3 | 4 => 0.8,
        5 | 6 => 0.75,
        _ => 0.7,
    }
}

/// Compute all four factors for a parameter set.
///
/// A missing or unusable temperature curve falls back to 1.0 and records a
/// warning; the other factors cannot fail.
pub fn derating_factors(
    tables: &CableTables,
    params: &CableParameters,
    diag: &mut Diagnostics,
) -> DeratingFactors {
    let environment = params.installation.environment();
    let ambient = params.ambient_temperature;

    let temperature = match tables.temperature_curve(environment) {
        None => {
            diag.add_warning_with_entity(
                "derating",
                "no temperature factor table, using 1.0",
                environment.as_str(),
            );
            1.0
        }
        Some(curve) => match temperature_factor(curve, ambient) {
            Some((factor, used)) => {
                if used != ambient {
                    diag.add_warning_with_entity(
                        "derating",
                        &format!("{ambient} is not tabulated, using closest {used}"),
                        environment.as_str(),
                    );
                }
                factor
            }
            None => {
                diag.add_warning_with_entity(
                    "derating",
                    "temperature factor table is empty or incomplete, using 1.0",
                    environment.as_str(),
                );
                1.0
            }
        },
    };

    let factors = DeratingFactors::new(
        temperature,
        depth_factor(params.installation, params.depth_of_laying),
        resistivity_factor(params.installation, params.soil_thermal_resistivity),
        grouping_factor(params.number_of_circuits),
    );

    if params.installation.is_underground() {
        factors
    } else {
        factors.in_air()
    }
}
