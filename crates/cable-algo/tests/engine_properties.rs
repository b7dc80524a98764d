use cable_algo::{compute_rating, grouping_factor, lookup_base_rating, RatingEngine};
use cable_core::{
    Amperes, Arrangement, CableParameters, CableTables, CableType, Celsius, CheckStatus,
    Construction, Installation, InstallationRatings, KelvinMetresPerWatt, Kiloamperes, Material,
    Metres, Millimetres, Seconds, SquareMillimetres, Volts,
};

fn tables() -> CableTables {
    cable_io::default_tables().unwrap()
}

fn three_core_copper(size: f64) -> CableParameters {
    CableParameters::new(
        Material::Copper,
        Construction::ThreeCore,
        "0.6/1kV",
        SquareMillimetres(size),
        Installation::BuriedDirect,
    )
}

#[test]
fn lookup_returns_tabulated_value_for_every_combination() {
    let t = tables();
    let mut checked = 0;
    for (cable_type, by_voltage) in &t.ampacity {
        let construction = cable_type.construction();
        let sizes = t.sizes(construction).unwrap().to_vec();
        for (voltage, by_installation) in by_voltage {
            for (installation, ratings) in by_installation {
                let columns: Vec<(Option<Arrangement>, &Vec<f64>)> = match ratings {
                    InstallationRatings::Ratings(values) => vec![(None, values)],
                    InstallationRatings::ByArrangement(map) => {
                        map.iter().map(|(a, v)| (Some(*a), v)).collect()
                    }
                };
                for (arrangement, values) in columns {
                    for (idx, expected) in values.iter().enumerate() {
                        let mut params = CableParameters::new(
                            cable_type.material(),
                            construction,
                            voltage.as_str(),
                            SquareMillimetres(sizes[idx]),
                            *installation,
                        );
                        params.arrangement = arrangement;
                        let base = lookup_base_rating(&t, &params).unwrap();
                        assert_eq!(base.rating, Amperes(*expected));
                        checked += 1;
                    }
                }
            }
        }
    }
    // 4 types × 2 voltages × 3 installations, single-core with 2 arrangements
    assert_eq!(checked, 2 * 2 * 3 * (2 * 15 + 12));
}

#[test]
fn total_factor_is_product_of_components() {
    let t = tables();
    let params = three_core_copper(95.0)
        .with_ambient_temperature(Celsius(35.0))
        .with_depth_of_laying(Millimetres(1500.0))
        .with_soil_thermal_resistivity(KelvinMetresPerWatt(2.5))
        .with_circuits(5);
    let r = compute_rating(&t, &params).unwrap();
    let f = r.derating;
    assert_eq!(f.temperature, 0.89);
    assert_eq!(f.depth, 0.95);
    // 1.5 / 2.5 = 0.6, clamped
    assert_eq!(f.resistivity, 0.7);
    assert_eq!(f.grouping, 0.75);
    assert!((f.total - f.temperature * f.depth * f.resistivity * f.grouping).abs() < 1e-15);
    assert_eq!(
        r.final_rating_per_circuit,
        Amperes((r.base_rating.value() * f.total).round())
    );
    assert_eq!(r.final_rating_total, r.final_rating_per_circuit * 5.0);
}

#[test]
fn grouping_factor_reference_points() {
    assert_eq!(grouping_factor(1), 1.0);
    assert_eq!(grouping_factor(2), 0.9);
    assert_eq!(grouping_factor(4), 0.8);
    assert_eq!(grouping_factor(6), 0.75);
    assert_eq!(grouping_factor(10), 0.7);
}

#[test]
fn recommended_size_is_monotonic_in_required_current() {
    let t = tables();
    let mut last = 0.0;
    // Up to the largest size's derated rating (685 A × 0.96)
    for required in (0..=640).step_by(20) {
        let params = three_core_copper(95.0).with_required_current(Amperes(f64::from(required)));
        let r = compute_rating(&t, &params).unwrap();
        let size = r.recommendation.recommended_size.value();
        if required > 0 {
            assert!(size >= last, "required {required}: {size} < {last}");
            last = size;
        }
    }
}

#[test]
fn copper_95_withstands_14_ka_for_one_second() {
    let t = tables();
    let params = three_core_copper(95.0).with_short_circuit(Kiloamperes(14.0), Seconds(1.0));
    let r = compute_rating(&t, &params).unwrap();
    assert_eq!(r.short_circuit.withstand, Kiloamperes(14.0));
    assert_eq!(r.short_circuit.status, CheckStatus::Pass);

    let params = params.with_short_circuit(Kiloamperes(15.0), Seconds(1.0));
    let r = compute_rating(&t, &params).unwrap();
    assert_eq!(r.short_circuit.status, CheckStatus::Fail);
}

#[test]
fn voltage_drop_matches_formula() {
    let t = tables();
    let params = three_core_copper(95.0)
        .with_required_current(Amperes(240.0))
        .with_circuits(2)
        .with_cable_length(Metres(350.0))
        .with_supply_voltage(Volts(400.0));
    let r = compute_rating(&t, &params).unwrap();

    let r_total = 0.193 * 350.0 / 1000.0;
    let expected = 120.0 * r_total * 3f64.sqrt() / 400.0 * 100.0;
    assert!((r.voltage_drop.percent - expected).abs() < 1e-9);
    assert!(r.voltage_drop.three_phase);

    let resistance = r.resistance.unwrap();
    assert!((resistance.total.value() - r_total).abs() < 1e-12);
}

#[test]
fn single_phase_drop_has_no_root_three() {
    let t = tables();
    let params = CableParameters::new(
        Material::Aluminum,
        Construction::SingleCore,
        "0.6/1kV",
        SquareMillimetres(150.0),
        Installation::InAir,
    )
    .with_arrangement(Arrangement::FlatTouching)
    .with_required_current(Amperes(200.0))
    .with_supply_voltage(Volts(230.0));
    let r = compute_rating(&t, &params).unwrap();
    let expected = 200.0 * 0.206 * 100.0 / 1000.0 / 230.0 * 100.0;
    assert!(!r.voltage_drop.three_phase);
    assert!((r.voltage_drop.percent - expected).abs() < 1e-9);
    // 200² × 0.0206 Ω, single phase
    assert!((r.power_loss.loss.value() - 824.0).abs() < 1e-9);
}

#[test]
fn repeated_calls_are_identical() {
    let t = tables();
    let engine = RatingEngine::new(&t);
    let params = three_core_copper(120.0)
        .with_ambient_temperature(Celsius(27.0))
        .with_required_current(Amperes(300.0))
        .with_supply_voltage(Volts(400.0))
        .with_short_circuit(Kiloamperes(12.0), Seconds(0.5));
    let first = engine.rate(&params).unwrap();
    let second = engine.rate(&params).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn zero_required_current_boundary() {
    let t = tables();
    let params = three_core_copper(70.0).with_supply_voltage(Volts(400.0));
    let r = compute_rating(&t, &params).unwrap();
    assert_eq!(r.recommendation.recommended_size, SquareMillimetres(70.0));
    assert_eq!(r.recommendation.safety_margin_percent, 0.0);
    assert_eq!(r.voltage_drop.status, CheckStatus::NotApplicable);
    assert_eq!(r.voltage_drop.drop, Volts(0.0));
    assert!(!r.power_loss.applicable);
    assert_eq!(r.power_loss.loss_kw.value(), 0.0);
}

#[test]
fn lookup_failures_are_structured() {
    let t = tables();
    let err = compute_rating(&t, &three_core_copper(630.0)).unwrap_err();
    assert_eq!(err.kind(), "UnsupportedSize");

    let mut params = three_core_copper(95.0);
    params.voltage_rating = "33kV".to_string();
    let err = compute_rating(&t, &params).unwrap_err();
    assert_eq!(err.kind(), "MissingTableData");
    assert!(err.to_string().contains("threeCoreCopper > 33kV"));
}

#[test]
fn untabulated_temperature_uses_closest_and_warns() {
    let t = tables();
    let params = three_core_copper(95.0).with_ambient_temperature(Celsius(22.5));
    let r = compute_rating(&t, &params).unwrap();
    // 22.5 is equidistant from 20 and 25: the first listed wins
    assert_eq!(r.derating.temperature, 1.0);
    assert_eq!(r.diagnostics.issues_by_category("derating").count(), 1);
}

#[test]
fn sweep_marks_selected_and_recommended() {
    let t = tables();
    let params = three_core_copper(95.0)
        .with_required_current(Amperes(400.0))
        .with_supply_voltage(Volts(400.0));
    let rows = RatingEngine::new(&t).sweep(&params).unwrap().rows;
    assert_eq!(rows.len(), 12);
    let selected: Vec<_> = rows.iter().filter(|r| r.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].size, SquareMillimetres(95.0));

    let rate = compute_rating(&t, &params).unwrap();
    let recommended: Vec<_> = rows.iter().filter(|r| r.recommended).collect();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0].size, rate.recommendation.recommended_size);
    assert!(recommended[0].meets_requirement);
    assert_eq!(
        CableType::of(params.material, params.construction),
        CableType::ThreeCoreCopper
    );
}

#[test]
fn flat_arrangement_in_parameter_file_selects_flat_touching_column() {
    let t = tables();
    let text = r#"
material = "copper"
construction = "singleCore"
voltageRating = "0.6/1kV"
conductorSize = 240
installation = "inAir"
arrangement = "flat"
ambientTemperature = 30
"#;
    let params = cable_io::parse_parameters(text, cable_io::DocumentFormat::Toml).unwrap();
    assert_eq!(params.arrangement, Some(Arrangement::FlatTouching));

    let idx = t.size_index(Construction::SingleCore, SquareMillimetres(240.0)).unwrap();
    let column = |arrangement| {
        t.rating_column(
            CableType::SingleCoreCopper,
            "0.6/1kV",
            Installation::InAir,
            Some(arrangement),
        )
        .unwrap()
        .rating_at(idx)
        .unwrap()
    };
    let flat = column(Arrangement::FlatTouching);
    let trefoil = column(Arrangement::Trefoil);
    assert_ne!(flat, trefoil);

    let result = compute_rating(&t, &params).unwrap();
    assert_eq!(result.base_rating, flat);
}
