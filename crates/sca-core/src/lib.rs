//! # sca-core: Short-Circuit Study Data Model
//!
//! Shared types for driving fault studies through an external short-circuit
//! engine and classifying what it reports.
//!
//! ## Core Data Structures
//!
//! - [`Bus`] - Identity, nominal voltage, area and zone of a network node
//! - [`EquipmentHandle`] - Opaque engine handle for a bus or branch
//! - [`FaultConnection`] - Canonical fault connection (ABC, AG, BCG, ...)
//! - [`FaultConfig`] / [`SteppedEventConfig`] - Simulation request parameters
//! - [`PhasorTriple`] - Phase or sequence voltages/currents
//! - [`BusFaultResult`] / [`SteppedEventResult`] - Rows handed to reporting
//!
//! ## Engine Boundary
//!
//! [`SimulationEngine`] is the capability interface the study orchestrators
//! in `sca-algo` are written against. `sca-io` provides the case-file
//! implementation used by the CLI; tests use an in-memory fake.
//!
//! ```rust
//! use sca_core::{canonicalize, FaultConfig, FaultConnection};
//!
//! let conns = vec![canonicalize("acg").unwrap(), canonicalize("ABC").unwrap()];
//! assert_eq!(conns[0], FaultConnection::Cag);
//!
//! let cfg = FaultConfig::new(conns).with_clear_previous(true).with_close_in();
//! assert!(!cfg.has_impedance());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod phasor;
pub mod results;
pub mod units;

pub use config::{validate_impedance, FaultConfig, SteppedEventConfig};
pub use connection::{canonicalize, canonicalize_all, ConnectionKind, FaultConnection};
pub use engine::{CaseSession, EquipmentKind, FaultIndex, SimulationEngine};
pub use error::{ErrorCategory, ScaError, ScaResult};
pub use phasor::{Phasor, PhasorTriple, Representation};
pub use results::{BusFaultResult, ClearingNote, SteppedEventResult, SteppedEventStep};
pub use units::{Amperes, Degrees, Kilovolts, Ohms, Seconds};

/// Bus number, unique within a loaded case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusId(usize);

impl BusId {
    #[inline]
    pub fn new(value: usize) -> Self {
        BusId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque engine handle. Only meaningful to the engine that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentHandle(u64);

impl EquipmentHandle {
    /// The fault location itself; used to read total fault current.
    pub const FAULT_POINT: EquipmentHandle = EquipmentHandle(u64::MAX);

    #[inline]
    pub fn new(value: u64) -> Self {
        EquipmentHandle(value)
    }
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EquipmentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == EquipmentHandle::FAULT_POINT {
            f.write_str("fault point")
        } else {
            write!(f, "handle {}", self.0)
        }
    }
}

/// A network node as loaded from the engine. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub nominal_kv: Kilovolts,
    pub area: u32,
    pub zone: u32,
}

impl Default for Bus {
    fn default() -> Self {
        Self {
            id: BusId(0),
            name: String::new(),
            nominal_kv: Kilovolts(0.0),
            area: 0,
            zone: 0,
        }
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:.1} kV", self.id, self.name, self.nominal_kv.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        assert_eq!(EquipmentHandle::new(4).to_string(), "handle 4");
        assert_eq!(EquipmentHandle::FAULT_POINT.to_string(), "fault point");
    }

    #[test]
    fn test_bus_display() {
        let bus = Bus {
            id: BusId::new(10),
            name: "NEVADA".into(),
            nominal_kv: Kilovolts(132.0),
            area: 1,
            zone: 2,
        };
        assert_eq!(bus.to_string(), "10 NEVADA 132.0 kV");
    }
}
