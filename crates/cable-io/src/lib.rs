//! # cable-io: Table and Parameter Loading
//!
//! The data boundary of the rating engine. Tables and parameter records are
//! plain serde documents; this crate reads them from disk, ships a default
//! table set and checks table data for internal consistency.
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_io::{default_tables, validate_tables};
//!
//! let tables = default_tables().unwrap();
//! let diag = validate_tables(&tables);
//! assert!(!diag.has_errors());
//! ```
//!
//! ## Formats
//!
//! | Document | Extensions | Notes |
//! |----------|------------|-------|
//! | Tables | `.json` | Layout documented on [`cable_core::tables`] |
//! | Parameters | `.toml`, `.json` | camelCase keys; optional fields default |

pub mod format;
pub mod params;
pub mod tables;
pub mod validate;

pub use format::DocumentFormat;
pub use params::{load_parameters, parse_parameters};
pub use tables::{default_tables, load_tables, parse_tables, DEFAULT_TABLES_JSON};
pub use validate::validate_tables;
