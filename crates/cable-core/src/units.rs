//! Compile-time unit safety for cable rating quantities.
//!
//! Prevents mixing incompatible units like amperes and kiloamperes, or
//! ohms per kilometre and total ohms.
//!
//! # Design Philosophy
//!
//! A cable rating touches many physical quantities with specific units:
//! - Currents (A for ratings, kA for fault levels)
//! - Voltages (V) and apparent power (kVA)
//! - Conductor resistance (Ω/km from tables, Ω over a run)
//! - Geometry (mm² cross-section, m run length, mm laying depth)
//!
//! Using raw `f64` values throughout makes it easy to feed a fault level in
//! kA into a formula that expects amperes, or to forget the metre-to-km
//! conversion on a resistance. Newtype wrappers catch those at compile time.
//!
//! # Zero Runtime Overhead
//!
//! All types use `#[repr(transparent)]` ensuring they have the same memory
//! layout as `f64`, and serialize as a bare number.
//!
//! # Usage
//!
//! ```
//! use cable_core::units::{Amperes, Metres, OhmsPerKm};
//!
//! let r = OhmsPerKm(0.193).over_length(Metres(250.0));
//! let drop = Amperes(120.0) * r;
//!
//! assert!((drop.value() - 5.79).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $unit_name),
                    None => write!(f, "{} {}", self.0, $unit_name),
                }
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Strictly positive and finite
            #[inline]
            pub fn is_positive(self) -> bool {
                self.0.is_finite() && self.0 > 0.0
            }

            /// Minimum of two values
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

// =============================================================================
// Current Units
// =============================================================================

/// Current in amperes (A)
///
/// Used for ampacity ratings and load currents.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Amperes(pub f64);

impl_unit_ops!(Amperes, "A");

/// Current in kiloamperes (kA)
///
/// Used for prospective fault levels and short-circuit withstand.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kiloamperes(pub f64);

impl_unit_ops!(Kiloamperes, "kA");

impl Amperes {
    #[inline]
    pub fn to_kiloamperes(self) -> Kiloamperes {
        Kiloamperes(self.0 / 1000.0)
    }
}

impl Kiloamperes {
    #[inline]
    pub fn to_amperes(self) -> Amperes {
        Amperes(self.0 * 1000.0)
    }
}

// =============================================================================
// Voltage and Power Units
// =============================================================================

/// Voltage in volts (V)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit_ops!(Volts, "V");

/// Active power in watts (W)
///
/// Conductor I²R losses are computed in watts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(pub f64);

impl_unit_ops!(Watts, "W");

/// Active power in kilowatts (kW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilowatts(pub f64);

impl_unit_ops!(Kilowatts, "kW");

/// Apparent power in kilovolt-amperes (kVA)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilovoltAmperes(pub f64);

impl_unit_ops!(KilovoltAmperes, "kVA");

impl Watts {
    #[inline]
    pub fn to_kilowatts(self) -> Kilowatts {
        Kilowatts(self.0 / 1000.0)
    }
}

// =============================================================================
// Resistance Units
// =============================================================================

/// Total resistance over a cable run in ohms (Ω)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Ohms(pub f64);

impl_unit_ops!(Ohms, "Ω");

/// Conductor resistance per kilometre (Ω/km), as tabulated by manufacturers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct OhmsPerKm(pub f64);

impl_unit_ops!(OhmsPerKm, "Ω/km");

impl OhmsPerKm {
    /// Total resistance of a run: R = r × L / 1000
    #[inline]
    pub fn over_length(self, length: Metres) -> Ohms {
        Ohms(self.0 * length.0 / 1000.0)
    }
}

/// Ohm's law: V = I × R
impl Mul<Ohms> for Amperes {
    type Output = Volts;
    fn mul(self, rhs: Ohms) -> Volts {
        Volts(self.0 * rhs.0)
    }
}

// =============================================================================
// Geometry, Time and Environment Units
// =============================================================================

/// Conductor cross-section in square millimetres (mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SquareMillimetres(pub f64);

impl_unit_ops!(SquareMillimetres, "mm²");

impl SquareMillimetres {
    /// Integral table key for this size, if it is a whole positive number
    /// of mm² (all standard sizes are).
    pub fn table_key(self) -> Option<u32> {
        if self.0.is_finite() && self.0 > 0.0 && self.0.fract() == 0.0 && self.0 <= u32::MAX as f64
        {
            Some(self.0 as u32)
        } else {
            None
        }
    }
}

/// Length in metres (m)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Metres(pub f64);

impl_unit_ops!(Metres, "m");

/// Length in millimetres (mm); laying depths are quoted in mm
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millimetres(pub f64);

impl_unit_ops!(Millimetres, "mm");

/// Duration in seconds (s)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(pub f64);

impl_unit_ops!(Seconds, "s");

/// Temperature in degrees Celsius (°C)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(pub f64);

impl_unit_ops!(Celsius, "°C");

/// Soil thermal resistivity in kelvin-metres per watt (K·m/W)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KelvinMetresPerWatt(pub f64);

impl_unit_ops!(KelvinMetresPerWatt, "K·m/W");

// =============================================================================
// Tests
// =============================================================================
