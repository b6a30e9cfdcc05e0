//! Unit newtypes for short-circuit study quantities.
//!
//! Keeps bus voltages, fault currents, clearing times and fault impedances
//! from being mixed up as bare `f64`s. All wrappers are `#[repr(transparent)]`.
//!
//! ```
//! use sca_core::units::{Amperes, Seconds};
//!
//! let threshold = Amperes(1.0);
//! assert!(Amperes(0.8) <= threshold);
//! assert_eq!((Seconds(0.1) + Seconds(0.2)).value(), 0.1 + 0.2);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

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

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.2} {}", self.0, $unit_name)
            }
        }

        impl From<f64> for $type {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }
    };
}

/// Nominal bus voltage (kV)
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilovolts(pub f64);
impl_unit_ops!(Kilovolts, "kV");

/// Current magnitude (A)
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Amperes(pub f64);
impl_unit_ops!(Amperes, "A");

/// Elapsed simulation time (s)
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Seconds(pub f64);
impl_unit_ops!(Seconds, "s");

/// Fault resistance or reactance (Ω)
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Ohms(pub f64);
impl_unit_ops!(Ohms, "Ohm");

/// Phasor angle (degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(pub f64);
impl_unit_ops!(Degrees, "deg");

impl Degrees {
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    #[inline]
    pub fn from_radians(rad: f64) -> Self {
        Degrees(rad.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_unit_suffix() {
        assert_eq!(Kilovolts(132.0).to_string(), "132.00 kV");
        assert_eq!(Amperes(0.5).to_string(), "0.50 A");
    }

    #[test]
    fn test_ordering() {
        assert!(Seconds(3.0) >= Seconds(3.0));
        assert!(Ohms(0.0) < Ohms(0.1));
    }

    #[test]
    fn test_degree_conversion_round_trips() {
        let angle = Degrees(-120.0);
        let back = Degrees::from_radians(angle.to_radians());
        assert!((back.value() - angle.value()).abs() < 1e-12);
    }
}
