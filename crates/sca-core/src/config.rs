//! Simulation request parameters.

use crate::connection::FaultConnection;
use crate::error::{ScaError, ScaResult};
use crate::units::Ohms;
use serde::{Deserialize, Serialize};

/// Parameters for one bus fault application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultConfig {
    pub connections: Vec<FaultConnection>,
    pub resistance: Ohms,
    pub reactance: Ohms,
    /// Drop previously applied faults before applying these.
    pub clear_previous: bool,
    /// Fault sits at the selected node, not along a branch.
    pub close_in: bool,
}

impl FaultConfig {
    pub fn new(connections: Vec<FaultConnection>) -> Self {
        Self {
            connections,
            resistance: Ohms(0.0),
            reactance: Ohms(0.0),
            clear_previous: false,
            close_in: false,
        }
    }

    pub fn with_clear_previous(mut self, clear: bool) -> Self {
        self.clear_previous = clear;
        self
    }

    pub fn with_close_in(mut self) -> Self {
        self.close_in = true;
        self
    }

    pub fn with_impedance(mut self, resistance: Ohms, reactance: Ohms) -> Self {
        self.resistance = resistance;
        self.reactance = reactance;
        self
    }

    pub fn has_impedance(&self) -> bool {
        has_impedance(self.resistance, self.reactance)
    }
}

/// Parameters for one stepped-event run. One connection per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteppedEventConfig {
    pub connection: FaultConnection,
    pub resistance: Ohms,
    pub reactance: Ohms,
    pub close_in: bool,
    /// Keep simulating until every protection event has been captured.
    pub all_events: bool,
}

impl SteppedEventConfig {
    pub fn new(connection: FaultConnection) -> Self {
        Self {
            connection,
            resistance: Ohms(0.0),
            reactance: Ohms(0.0),
            close_in: false,
            all_events: false,
        }
    }

    pub fn with_close_in(mut self) -> Self {
        self.close_in = true;
        self
    }

    pub fn with_all_events(mut self) -> Self {
        self.all_events = true;
        self
    }

    pub fn with_impedance(mut self, resistance: Ohms, reactance: Ohms) -> Self {
        self.resistance = resistance;
        self.reactance = reactance;
        self
    }

    pub fn has_impedance(&self) -> bool {
        has_impedance(self.resistance, self.reactance)
    }
}

fn has_impedance(resistance: Ohms, reactance: Ohms) -> bool {
    resistance.value() > 0.0 || reactance.value() > 0.0
}

/// Reject negative or non-finite fault impedance.
pub fn validate_impedance(resistance: Ohms, reactance: Ohms) -> ScaResult<()> {
    for (name, value) in [("resistance", resistance), ("reactance", reactance)] {
        if !value.is_finite() || value.value() < 0.0 {
            return Err(ScaError::Config(format!(
                "fault {name} must be a non-negative number of ohms, got {}",
                value.value()
            )));
        }
    }
    Ok(())
}
