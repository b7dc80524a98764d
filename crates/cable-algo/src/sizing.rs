//! Recommended-size search and safety margin.

use cable_core::tables::RatingColumn;
use cable_core::{Amperes, CableParameters, CheckStatus, SizeRecommendation, SquareMillimetres};

/// Smallest listed size whose derated rating carries `required_per_circuit`.
///
/// Sizes without a rating in the column are skipped. `None` when no size
/// qualifies.
pub fn smallest_adequate_size(
    column: &RatingColumn<'_>,
    sizes: &[f64],
    total_factor: f64,
    required_per_circuit: Amperes,
) -> Option<SquareMillimetres> {
    sizes.iter().enumerate().find_map(|(idx, size)| {
        let rating = column.rating_at(idx)?;
        (rating.value() * total_factor >= required_per_circuit.value())
            .then_some(SquareMillimetres(*size))
    })
}

/// Recommend a size for the required current and report the margin of the
/// selected size.
///
/// Without a requirement the selected size is echoed back with a zero
/// margin and `NotApplicable` status.
pub fn recommend_size(
    column: &RatingColumn<'_>,
    sizes: &[f64],
    total_factor: f64,
    params: &CableParameters,
    final_rating_total: Amperes,
) -> SizeRecommendation {
    let required = params.required_current;
    let required_per_circuit = params.required_current_per_circuit();

    if required.value() <= 0.0 {
        return SizeRecommendation {
            recommended_size: params.conductor_size,
            required_current_per_circuit: required_per_circuit,
            safety_margin_percent: 0.0,
            status: CheckStatus::NotApplicable,
        };
    }

    let recommended_size =
        smallest_adequate_size(column, sizes, total_factor, required_per_circuit)
            .unwrap_or(params.conductor_size);
    let safety_margin_percent = (final_rating_total / required - 1.0) * 100.0;

    SizeRecommendation {
        recommended_size,
        required_current_per_circuit: required_per_circuit,
        safety_margin_percent,
        status: CheckStatus::from_pass(safety_margin_percent > 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cable_core::{CableType, Construction, Installation, Material};

    static SIZES: [f64; 4] = [25.0, 35.0, 50.0, 70.0];
    static RATINGS: [f64; 4] = [110.0, 135.0, 160.0, 200.0];

    fn column() -> RatingColumn<'static> {
        RatingColumn {
            ratings: &RATINGS,
            cable_type: CableType::ThreeCoreCopper,
            voltage: "0.6/1kV",
            installation: Installation::InAir,
            arrangement: None,
        }
    }

    fn params(required: f64) -> CableParameters {
        CableParameters::new(
            Material::Copper,
            Construction::ThreeCore,
            "0.6/1kV",
            SquareMillimetres(35.0),
            Installation::InAir,
        )
        .with_required_current(Amperes(required))
    }

    #[test]
    fn test_smallest_adequate() {
        let col = column();
        assert_eq!(
            smallest_adequate_size(&col, &SIZES, 1.0, Amperes(120.0)),
            Some(SquareMillimetres(35.0))
        );
        assert_eq!(
            smallest_adequate_size(&col, &SIZES, 0.8, Amperes(120.0)),
            Some(SquareMillimetres(50.0))
        );
        assert_eq!(smallest_adequate_size(&col, &SIZES, 1.0, Amperes(500.0)), None);
    }

    #[test]
    fn test_short_rating_array_is_skipped() {
        let col = RatingColumn {
            ratings: &RATINGS[..2],
            ..column()
        };
        assert_eq!(smallest_adequate_size(&col, &SIZES, 1.0, Amperes(150.0)), None);
    }

    #[test]
    fn test_no_requirement_echoes_selection() {
        let rec = recommend_size(&column(), &SIZES, 1.0, &params(0.0), Amperes(135.0));
        assert_eq!(rec.recommended_size, SquareMillimetres(35.0));
        assert_eq!(rec.safety_margin_percent, 0.0);
        assert_eq!(rec.status, CheckStatus::NotApplicable);
    }

    #[test]
    fn test_margin_and_status() {
        let rec = recommend_size(&column(), &SIZES, 1.0, &params(100.0), Amperes(135.0));
        assert_eq!(rec.recommended_size, SquareMillimetres(25.0));
        assert!((rec.safety_margin_percent - 35.0).abs() < 1e-9);
        assert_eq!(rec.status, CheckStatus::Pass);

        let rec = recommend_size(&column(), &SIZES, 1.0, &params(150.0), Amperes(135.0));
        assert_eq!(rec.recommended_size, SquareMillimetres(50.0));
        assert!(rec.safety_margin_percent < 0.0);
        assert_eq!(rec.status, CheckStatus::Fail);
    }

    #[test]
    fn test_unreachable_requirement_keeps_selection() {
        let rec = recommend_size(&column(), &SIZES, 1.0, &params(1000.0), Amperes(135.0));
        assert_eq!(rec.recommended_size, SquareMillimetres(35.0));
    }

    #[test]
    fn test_requirement_is_split_across_circuits() {
        let p = params(300.0).with_circuits(2);
        let rec = recommend_size(&column(), &SIZES, 1.0, &p, Amperes(270.0));
        assert_eq!(rec.required_current_per_circuit, Amperes(150.0));
        assert_eq!(rec.recommended_size, SquareMillimetres(50.0));
    }
}
