//! # cable-algo: Cable Current Rating Engine
//!
//! Maps a [`CableParameters`](cable_core::CableParameters) record and a set of
//! [`CableTables`](cable_core::CableTables) to a
//! [`CableRatingResult`](cable_core::CableRatingResult).
//!
//! ## Pipeline
//!
//! | Step | Module | Fails the calculation? |
//! |------|--------|------------------------|
//! | Base rating lookup | [`base_rating`] | Yes, every later step depends on it |
//! | Derating factors | [`derating`] | No, missing curves default to 1.0 |
//! | Recommended size | [`sizing`] | No |
//! | Short-circuit withstand | [`short_circuit`] | No, `NotApplicable` without fault data |
//! | Voltage drop | [`voltage_drop`] | No, `NotApplicable` without load or supply |
//! | Power loss and efficiency | [`power_loss`] | No, `NotApplicable` without load |
//!
//! [`engine`] runs the steps in order; [`sweep`] repeats the sizing
//! arithmetic for every listed size.
//!
//! ## Example
//!
//! ```ignore
//! use cable_algo::RatingEngine;
//!
//! let tables = cable_io::default_tables()?;
//! let engine = RatingEngine::new(&tables);
//! let result = engine.rate(&params)?;
//! println!("Final rating: {} per circuit", result.final_rating_per_circuit);
//! ```

pub mod base_rating;
pub mod derating;
pub mod engine;
pub mod power_loss;
pub mod resistance;
pub mod short_circuit;
pub mod sizing;
pub mod sweep;
pub mod voltage_drop;

pub use base_rating::{lookup_base_rating, BaseRating};
pub use derating::{
    depth_factor, derating_factors, grouping_factor, resistivity_factor, temperature_factor,
};
pub use engine::{compute_rating, RatingEngine};
pub use resistance::conductor_resistance;
pub use short_circuit::short_circuit_check;
pub use sizing::recommend_size;
pub use sweep::sweep_sizes;
