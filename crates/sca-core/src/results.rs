//! Result records produced by the study orchestrators.

use crate::config::SteppedEventConfig;
use crate::connection::FaultConnection;
use crate::phasor::{PhasorTriple, Representation};
use crate::units::{Amperes, Seconds};
use crate::Bus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One fault event reported by the engine for a faulted bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusFaultResult {
    pub bus: Bus,
    pub description: String,
    pub representation: Representation,
    pub voltages: PhasorTriple,
    pub currents: PhasorTriple,
}

/// One observation of a stepped-event simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteppedEventStep {
    pub time: Seconds,
    pub current: Amperes,
    pub description: String,
}

impl SteppedEventStep {
    pub fn new(time: f64, current: f64, description: impl Into<String>) -> Self {
        Self {
            time: Seconds(time),
            current: Amperes(current),
            description: description.into(),
        }
    }
}

/// Outcome of the clearing classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearingNote {
    NotCleared,
    SlowClearing,
    Okay,
}

impl ClearingNote {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearingNote::NotCleared => "not cleared",
            ClearingNote::SlowClearing => "slow clearing",
            ClearingNote::Okay => "okay",
        }
    }
}

impl fmt::Display for ClearingNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stepped-event run attributed to the bus it was launched from.
///
/// The derived fields (`cleared` through `note`) start at their zero values
/// and are filled in by the clearing analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteppedEventResult {
    pub bus: Bus,
    pub connection: FaultConnection,
    pub config: SteppedEventConfig,
    /// Ordered steps; the last one is the engine's terminal marker.
    pub steps: Vec<SteppedEventStep>,
    pub cleared: bool,
    pub current_init: Amperes,
    pub current_final: Amperes,
    /// Time of the last scanned step, not a true maximum.
    pub max_time: Seconds,
    pub note: Option<ClearingNote>,
}

impl SteppedEventResult {
    pub fn new(bus: Bus, config: SteppedEventConfig, steps: Vec<SteppedEventStep>) -> Self {
        Self {
            bus,
            connection: config.connection,
            config,
            steps,
            cleared: false,
            current_init: Amperes(0.0),
            current_final: Amperes(0.0),
            max_time: Seconds(0.0),
            note: None,
        }
    }

    /// Description of the first step, or empty when the engine returned none.
    pub fn fault_description(&self) -> &str {
        self.steps
            .first()
            .map(|step| step.description.as_str())
            .unwrap_or("")
    }
}
