//! Base current rating lookup.
//!
//! Selects the table partition by material and construction, then voltage
//! class, installation and (single-core only) arrangement, and reads the
//! rating aligned with the conductor size. No interpolation: a size that is
//! not listed is an error.

use cable_core::tables::RatingColumn;
use cable_core::{Amperes, CableError, CableParameters, CableResult, CableTables, CableType};

/// The tabulated rating of the selected size plus the column it came from,
/// so later steps can scan neighbouring sizes.
#[derive(Debug, Clone, Copy)]
pub struct BaseRating<'a> {
    pub rating: Amperes,
    pub size_index: usize,
    pub sizes: &'a [f64],
    pub column: RatingColumn<'a>,
}

pub fn lookup_base_rating<'a>(
    tables: &'a CableTables,
    params: &'a CableParameters,
) -> CableResult<BaseRating<'a>> {
    let arrangement = params.lookup_arrangement()?;
    let cable_type = CableType::of(params.material, params.construction);

    let column = tables.rating_column(
        cable_type,
        params.voltage_rating.as_str(),
        params.installation,
        arrangement,
    )?;
    let sizes = tables.sizes(params.construction)?;
    let size_index = tables.size_index(params.construction, params.conductor_size)?;

    let rating = column
        .rating_at(size_index)
        .filter(|r| r.is_finite())
        .ok_or_else(|| CableError::missing(format!("{}[{}]", column.key(), size_index)))?;

    Ok(BaseRating {
        rating,
        size_index,
        sizes,
        column,
    })
}
