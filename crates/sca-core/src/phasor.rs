//! Phasor quantities reported by the simulation engine.
//!
//! A [`PhasorTriple`] is either per-phase (A, B, C) or symmetrical
//! components (zero, positive, negative). Conversion between the two uses the
//! usual Fortescue transform with `a = 1∠120°`:
//!
//! ```text
//! X0 = (Xa +    Xb +    Xc) / 3
//! X1 = (Xa +  a·Xb + a²·Xc) / 3
//! X2 = (Xa + a²·Xb +  a·Xc) / 3
//! ```

use crate::units::Degrees;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Magnitude plus angle in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Phasor {
    pub magnitude: f64,
    pub angle: Degrees,
}

impl Phasor {
    pub fn new(magnitude: f64, angle_deg: f64) -> Self {
        Self {
            magnitude,
            angle: Degrees(angle_deg),
        }
    }

    pub fn to_complex(self) -> Complex64 {
        Complex64::from_polar(self.magnitude, self.angle.to_radians())
    }

    pub fn from_complex(value: Complex64) -> Self {
        let (magnitude, theta) = value.to_polar();
        Self {
            magnitude,
            angle: Degrees::from_radians(theta),
        }
    }
}

/// Which quantities a [`PhasorTriple`] holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Va, Vb, Vc / Ia, Ib, Ic
    #[default]
    Phase,
    /// V0, V1, V2 / I0, I1, I2
    Sequence,
}

/// Three phasors tagged with their representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasorTriple {
    pub representation: Representation,
    pub values: [Phasor; 3],
}

fn rotation() -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * PI / 3.0)
}

impl PhasorTriple {
    pub fn phase(a: Phasor, b: Phasor, c: Phasor) -> Self {
        Self {
            representation: Representation::Phase,
            values: [a, b, c],
        }
    }

    pub fn sequence(zero: Phasor, positive: Phasor, negative: Phasor) -> Self {
        Self {
            representation: Representation::Sequence,
            values: [zero, positive, negative],
        }
    }

    /// Symmetrical components of this triple. Identity if already sequence.
    pub fn to_sequence(&self) -> Self {
        if self.representation == Representation::Sequence {
            return *self;
        }
        let a = rotation();
        let a2 = a * a;
        let [xa, xb, xc] = self.values.map(Phasor::to_complex);
        let third = 1.0 / 3.0;
        Self::sequence(
            Phasor::from_complex((xa + xb + xc) * third),
            Phasor::from_complex((xa + a * xb + a2 * xc) * third),
            Phasor::from_complex((xa + a2 * xb + a * xc) * third),
        )
    }

    /// Per-phase quantities. Identity if already phase.
    pub fn to_phase(&self) -> Self {
        if self.representation == Representation::Phase {
            return *self;
        }
        let a = rotation();
        let a2 = a * a;
        let [x0, x1, x2] = self.values.map(Phasor::to_complex);
        Self::phase(
            Phasor::from_complex(x0 + x1 + x2),
            Phasor::from_complex(x0 + a2 * x1 + a * x2),
            Phasor::from_complex(x0 + a * x1 + a2 * x2),
        )
    }

    pub fn to_representation(&self, representation: Representation) -> Self {
        match representation {
            Representation::Phase => self.to_phase(),
            Representation::Sequence => self.to_sequence(),
        }
    }
}
