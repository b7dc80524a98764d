//! Consistency checks for table data.
//!
//! Runs independently of any rating so a table file can be checked before
//! use. Results are reported through [`Diagnostics`]:
//!
//! - **Errors** make some lookups fail or return wrong values (rating arrays
//!   longer than the size list, wrong shape for the construction,
//!   non-positive values, unsorted size lists)
//! - **Warnings** only reduce coverage (missing partitions, short arrays,
//!   missing resistance entries that fall back to the resistivity estimate)

use cable_core::{
    CableTables, CableType, Construction, Diagnostics, Environment, InstallationRatings, Material,
    SquareMillimetres,
};

/// Validate a table set and collect every issue found.
pub fn validate_tables(tables: &CableTables) -> Diagnostics {
    let mut diag = Diagnostics::new();
    validate_sizes(tables, &mut diag);
    validate_ampacity(tables, &mut diag);
    validate_temperature_factors(tables, &mut diag);
    validate_resistance(tables, &mut diag);
    diag
}

fn validate_sizes(tables: &CableTables, diag: &mut Diagnostics) {
    for construction in Construction::ALL {
        let Some(sizes) = tables.conductor_sizes.get(construction) else {
            diag.add_error_with_entity(
                "sizes",
                "no conductor size list",
                construction.as_str(),
            );
            continue;
        };
        if sizes.is_empty() {
            diag.add_error_with_entity("sizes", "size list is empty", construction.as_str());
        }
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            diag.add_error_with_entity(
                "sizes",
                "sizes must be positive numbers",
                construction.as_str(),
            );
        }
        if sizes.windows(2).any(|w| w[1] <= w[0]) {
            diag.add_error_with_entity(
                "sizes",
                "sizes must be strictly ascending",
                construction.as_str(),
            );
        }
    }
}

fn validate_ampacity(tables: &CableTables, diag: &mut Diagnostics) {
    for cable_type in CableType::ALL {
        let Some(by_voltage) = tables.ampacity.get(cable_type) else {
            diag.add_warning_with_entity("ampacity", "no ratings for cable type", cable_type.as_str());
            continue;
        };
        let construction = cable_type.construction();
        let size_count = tables
            .conductor_sizes
            .get(&construction)
            .map(Vec::len)
            .unwrap_or(0);

        for (voltage, by_installation) in by_voltage {
            for (installation, ratings) in by_installation {
                let entity = format!("{} > {} > {}", cable_type.as_str(), voltage, installation.as_str());
                match (construction, ratings) {
                    (Construction::ThreeCore, InstallationRatings::Ratings(values)) => {
                        check_rating_array(values, size_count, &entity, diag);
                    }
                    (Construction::SingleCore, InstallationRatings::ByArrangement(map)) => {
                        for (arrangement, values) in map {
                            let entity = format!("{entity} > {}", arrangement.as_str());
                            check_rating_array(values, size_count, &entity, diag);
                        }
                    }
                    (Construction::ThreeCore, InstallationRatings::ByArrangement(_)) => {
                        diag.add_error_with_entity(
                            "ampacity",
                            "three-core ratings must be a single array",
                            &entity,
                        );
                    }
                    (Construction::SingleCore, InstallationRatings::Ratings(_)) => {
                        diag.add_error_with_entity(
                            "ampacity",
                            "single-core ratings must be keyed by arrangement",
                            &entity,
                        );
                    }
                }
            }
        }
    }
}

fn check_rating_array(values: &[f64], size_count: usize, entity: &str, diag: &mut Diagnostics) {
    if values.len() > size_count {
        diag.add_error_with_entity(
            "ampacity",
            &format!(
                "{} ratings for {} sizes, ratings cannot be aligned",
                values.len(),
                size_count
            ),
            entity,
        );
    } else if values.len() < size_count {
        diag.add_warning_with_entity(
            "ampacity",
            &format!(
                "{} ratings for {} sizes, larger sizes are unrated",
                values.len(),
                size_count
            ),
            entity,
        );
    }
    if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        diag.add_error_with_entity("ampacity", "ratings must be positive numbers", entity);
    }
    if values.windows(2).any(|w| w[1] < w[0]) {
        diag.add_warning_with_entity("ampacity", "ratings decrease with size", entity);
    }
}

fn validate_temperature_factors(tables: &CableTables, diag: &mut Diagnostics) {
    for environment in Environment::ALL {
        let Some(curve) = tables.temperature_curve(*environment) else {
            diag.add_warning_with_entity(
                "temperature",
                "no temperature factors, factor 1.0 will be used",
                environment.as_str(),
            );
            continue;
        };
        if curve.temperatures.is_empty() {
            diag.add_warning_with_entity(
                "temperature",
                "temperature list is empty, factor 1.0 will be used",
                environment.as_str(),
            );
        }
        if curve.temperatures.len() != curve.factors.len() {
            diag.add_error_with_entity(
                "temperature",
                &format!(
                    "{} temperatures but {} factors",
                    curve.temperatures.len(),
                    curve.factors.len()
                ),
                environment.as_str(),
            );
        }
        if curve
            .factors
            .iter()
            .any(|f| !f.is_finite() || *f <= 0.0 || *f > 1.5)
        {
            diag.add_error_with_entity(
                "temperature",
                "factors must lie in (0, 1.5]",
                environment.as_str(),
            );
        }
    }
}

fn validate_resistance(tables: &CableTables, diag: &mut Diagnostics) {
    let all_sizes: Vec<f64> = {
        let mut sizes: Vec<f64> = tables.conductor_sizes.values().flatten().copied().collect();
        sizes.sort_by(f64::total_cmp);
        sizes.dedup();
        sizes
    };

    for material in Material::ALL {
        let Some(by_size) = tables.resistance.get(material) else {
            diag.add_warning_with_entity(
                "resistance",
                "no resistance table, resistivity estimate will be used",
                material.as_str(),
            );
            continue;
        };
        if by_size.values().any(|r| !r.is_finite() || *r <= 0.0) {
            diag.add_error_with_entity(
                "resistance",
                "resistances must be positive numbers",
                material.as_str(),
            );
        }
        let missing: Vec<String> = all_sizes
            .iter()
            .filter(|s| tables.resistance_per_km(*material, SquareMillimetres(**s)).is_none())
            .map(|s| s.to_string())
            .collect();
        if !missing.is_empty() {
            diag.add_warning_with_entity(
                "resistance",
                &format!(
                    "no tabulated resistance for {} mm², resistivity estimate will be used",
                    missing.join(", ")
                ),
                material.as_str(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{default_tables, parse_tables};

    #[test]
    fn test_default_tables_are_clean() {
        let diag = validate_tables(&default_tables().unwrap());
        assert!(!diag.has_issues(), "{:?}", diag.issues);
    }

    #[test]
    fn test_empty_tables() {
        let diag = validate_tables(&CableTables::default());
        assert_eq!(diag.issues_by_category("sizes").count(), 2);
        assert!(diag.has_errors());
        assert_eq!(diag.issues_by_category("ampacity").count(), 4);
        assert_eq!(diag.issues_by_category("temperature").count(), 3);
        assert_eq!(diag.issues_by_category("resistance").count(), 2);
    }

    #[test]
    fn test_misaligned_arrays() {
        let t = parse_tables(
            r#"{
                "conductorSizes": { "singleCore": [25, 35], "threeCore": [25, 35] },
                "ampacity": {
                    "threeCoreCopper": { "0.6/1kV": { "inAir": [100, 120, 140], "inDucts": [90] } },
                    "singleCoreCopper": { "0.6/1kV": { "inAir": [100, 120] } }
                }
            }"#,
        )
        .unwrap();
        let diag = validate_tables(&t);
        let ampacity: Vec<_> = diag.issues_by_category("ampacity").collect();
        assert!(ampacity
            .iter()
            .any(|i| i.message.contains("cannot be aligned")
                && i.entity.as_deref() == Some("threeCoreCopper > 0.6/1kV > inAir")));
        assert!(ampacity
            .iter()
            .any(|i| i.message.contains("larger sizes are unrated")));
        assert!(ampacity
            .iter()
            .any(|i| i.message.contains("keyed by arrangement")));
    }

    #[test]
    fn test_unsorted_sizes_and_bad_factors() {
        let t = parse_tables(
            r#"{
                "conductorSizes": { "singleCore": [35, 25], "threeCore": [25] },
                "temperatureFactors": {
                    "air": { "temperatures": [25, 30], "factors": [1.0] }
                }
            }"#,
        )
        .unwrap();
        let diag = validate_tables(&t);
        assert!(diag
            .errors()
            .any(|i| i.message.contains("ascending")));
        assert!(diag
            .errors()
            .any(|i| i.message.contains("2 temperatures but 1 factors")));
    }
}
