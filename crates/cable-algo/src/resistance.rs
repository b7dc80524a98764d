//! Conductor resistance for drop and loss calculations.

use cable_core::{
    CableTables, ConductorResistance, Material, Metres, OhmsPerKm, ResistanceSource,
    SquareMillimetres,
};

/// Approximate DC resistance from bulk resistivity: ρ / A, in Ω/km.
pub fn approximate_resistance(material: Material, size: SquareMillimetres) -> OhmsPerKm {
    OhmsPerKm(material.resistivity_ohm_m() * 1000.0 / (size.value() * 1e-6))
}

/// Resistance of the run, from the table when the size is listed there and
/// from resistivity otherwise.
pub fn conductor_resistance(
    tables: &CableTables,
    material: Material,
    size: SquareMillimetres,
    length: Metres,
) -> ConductorResistance {
    let (per_km, source) = match tables.resistance_per_km(material, size) {
        Some(r) => (r, ResistanceSource::Table),
        None => (
            approximate_resistance(material, size),
            ResistanceSource::Approximation,
        ),
    };
    ConductorResistance {
        per_km,
        total: per_km.over_length(length),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn tables() -> CableTables {
        let mut copper = BTreeMap::new();
        copper.insert(95, 0.193);
        let mut resistance = BTreeMap::new();
        resistance.insert(Material::Copper, copper);
        CableTables {
            resistance,
            ..CableTables::default()
        }
    }

    #[test]
    fn test_table_value_preferred() {
        let r = conductor_resistance(
            &tables(),
            Material::Copper,
            SquareMillimetres(95.0),
            Metres(250.0),
        );
        assert_eq!(r.source, ResistanceSource::Table);
        assert_eq!(r.per_km, OhmsPerKm(0.193));
        assert!((r.total.value() - 0.04825).abs() < 1e-12);
    }

    #[test]
    fn test_approximation_fallback() {
        let r = conductor_resistance(
            &tables(),
            Material::Aluminum,
            SquareMillimetres(95.0),
            Metres(1000.0),
        );
        assert_eq!(r.source, ResistanceSource::Approximation);
        // 2.82e-8 Ω·m over 95 mm² = 0.2968 Ω/km
        assert!((r.per_km.value() - 0.296_842_105_263).abs() < 1e-9);
        assert!((r.total.value() - r.per_km.value()).abs() < 1e-12);
    }
}
