//! JSON case files replayed by [`crate::CaseEngine`].
//!
//! A case lists the network's buses and branches together with pre-computed
//! study data: phase-domain fault responses per bus and connection, and
//! stepped-event sequences per bus or branch and connection.
//!
//! ```json
//! {
//!   "name": "sample",
//!   "buses": [{ "number": 1, "name": "NEVADA", "kv": 132.0, "area": 1, "zone": 1 }],
//!   "branches": [{ "id": 1, "name": "NEVADA-OHIO", "from_bus": 1, "to_bus": 2 }],
//!   "faults": [{
//!     "bus": 1, "connection": "ABC",
//!     "voltages": [[0.0, 0.0], [0.0, -120.0], [0.0, 120.0]],
//!     "currents": [[5000.0, -85.0], [5000.0, 155.0], [5000.0, 35.0]]
//!   }],
//!   "stepped_events": [{
//!     "anchor": { "bus": 1 }, "connection": "AG",
//!     "steps": [{ "time": 0.0, "current": 4200.0 }, { "time": 0.35, "current": 0.0 }]
//!   }]
//! }
//! ```

use sca_core::{FaultConnection, Phasor, PhasorTriple, ScaError, ScaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(default)]
    pub name: String,
    pub buses: Vec<CaseBus>,
    #[serde(default)]
    pub branches: Vec<CaseBranch>,
    #[serde(default)]
    pub faults: Vec<CaseFault>,
    #[serde(default)]
    pub stepped_events: Vec<CaseSteppedEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseBus {
    pub number: usize,
    pub name: String,
    pub kv: f64,
    #[serde(default)]
    pub area: u32,
    #[serde(default)]
    pub zone: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseBranch {
    pub id: usize,
    pub name: String,
    pub from_bus: usize,
    pub to_bus: usize,
}

/// Phase-domain response of one bus to one connection: `[magnitude, angle_deg]` per phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFault {
    pub bus: usize,
    pub connection: FaultConnection,
    pub voltages: [[f64; 2]; 3],
    pub currents: [[f64; 2]; 3],
}

impl CaseFault {
    pub fn voltage_triple(&self) -> PhasorTriple {
        to_triple(&self.voltages)
    }

    pub fn current_triple(&self) -> PhasorTriple {
        to_triple(&self.currents)
    }
}

fn to_triple(raw: &[[f64; 2]; 3]) -> PhasorTriple {
    let [a, b, c] = raw.map(|[mag, ang]| Phasor::new(mag, ang));
    PhasorTriple::phase(a, b, c)
}

/// Where a stepped event is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Bus(usize),
    Branch(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSteppedEvent {
    pub anchor: Anchor,
    pub connection: FaultConnection,
    pub steps: Vec<CaseStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStep {
    pub time: f64,
    pub current: f64,
    #[serde(default)]
    pub description: String,
}

impl CaseFile {
    /// Read and validate a case file.
    pub fn from_path(path: &Path) -> ScaResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|err| match err {
            ScaError::Parse(message) => ScaError::Parse(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    pub fn from_json(text: &str) -> ScaResult<Self> {
        let case: CaseFile = serde_json::from_str(text)?;
        case.validate()?;
        Ok(case)
    }

    /// Check cross references: unique numbers, and every fault, branch and
    /// stepped event refers to equipment that exists.
    pub fn validate(&self) -> ScaResult<()> {
        let mut bus_numbers = HashSet::new();
        for bus in &self.buses {
            if !bus_numbers.insert(bus.number) {
                return Err(invalid(format!("duplicate bus number {}", bus.number)));
            }
            if !bus.kv.is_finite() || bus.kv < 0.0 {
                return Err(invalid(format!("bus {} has invalid kV {}", bus.number, bus.kv)));
            }
        }

        let mut branch_ids = HashSet::new();
        for branch in &self.branches {
            if !branch_ids.insert(branch.id) {
                return Err(invalid(format!("duplicate branch id {}", branch.id)));
            }
            for end in [branch.from_bus, branch.to_bus] {
                if !bus_numbers.contains(&end) {
                    return Err(invalid(format!(
                        "branch {} refers to unknown bus {end}",
                        branch.id
                    )));
                }
            }
        }

        for fault in &self.faults {
            if !bus_numbers.contains(&fault.bus) {
                return Err(invalid(format!("fault data for unknown bus {}", fault.bus)));
            }
        }

        for event in &self.stepped_events {
            let known = match event.anchor {
                Anchor::Bus(n) => bus_numbers.contains(&n),
                Anchor::Branch(id) => branch_ids.contains(&id),
            };
            if !known {
                return Err(invalid(format!(
                    "stepped event anchored at unknown {:?}",
                    event.anchor
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ScaError {
    ScaError::Parse(format!("invalid case: {message}"))
}
