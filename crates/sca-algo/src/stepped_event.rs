//! Close-in stepped-event study.
//!
//! For every selected bus and every requested connection the engine runs a
//! stepped event that captures all protection operations. With branches
//! enabled, the same run is repeated anchored at each branch attached to the
//! bus; those results are attributed to the originating bus.

use crate::selector::{load_buses, BusEntry, BusSelector};
use sca_core::{
    validate_impedance, EquipmentHandle, EquipmentKind, FaultConnection, Ohms, ScaError,
    ScaResult, SimulationEngine, SteppedEventConfig, SteppedEventResult,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SteppedEventStudy {
    selector: BusSelector,
    connections: Vec<FaultConnection>,
    resistance: Ohms,
    reactance: Ohms,
    include_branches: bool,
}

impl SteppedEventStudy {
    pub fn new(selector: BusSelector, connections: Vec<FaultConnection>) -> ScaResult<Self> {
        if connections.is_empty() {
            return Err(ScaError::Config(
                "at least one fault connection is required".into(),
            ));
        }
        Ok(Self {
            selector,
            connections,
            resistance: Ohms(0.0),
            reactance: Ohms(0.0),
            include_branches: false,
        })
    }

    pub fn with_impedance(mut self, resistance: Ohms, reactance: Ohms) -> ScaResult<Self> {
        validate_impedance(resistance, reactance)?;
        self.resistance = resistance;
        self.reactance = reactance;
        Ok(self)
    }

    /// Also run at every branch attached to each selected bus.
    pub fn with_branches(mut self, include: bool) -> Self {
        self.include_branches = include;
        self
    }

    pub fn connections(&self) -> &[FaultConnection] {
        &self.connections
    }

    /// Configuration for one run. Rebuilt per connection.
    pub fn config_for(&self, connection: FaultConnection) -> SteppedEventConfig {
        let config = SteppedEventConfig::new(connection)
            .with_close_in()
            .with_all_events();
        if self.resistance.value() > 0.0 || self.reactance.value() > 0.0 {
            config.with_impedance(self.resistance, self.reactance)
        } else {
            config
        }
    }

    /// Run the study. Only failing to enumerate the case's buses is fatal.
    pub fn run<E: SimulationEngine>(&self, engine: &mut E) -> ScaResult<Vec<SteppedEventResult>> {
        let population = load_buses(engine)?;
        let mut results = Vec::new();

        for entry in self.selector.select(population) {
            for &connection in &self.connections {
                let config = self.config_for(connection);

                match run_one(engine, entry.handle, &entry, &config) {
                    Ok(result) => results.push(result),
                    Err(err) => {
                        warn!(bus = %entry.bus, %connection, error = %err, "stepped event failed")
                    }
                }

                if !self.include_branches {
                    continue;
                }

                let branches = match engine.bus_equipment(entry.handle, EquipmentKind::Branch) {
                    Ok(branches) => branches,
                    Err(err) => {
                        warn!(bus = %entry.bus, error = %err, "cannot enumerate branches");
                        continue;
                    }
                };
                for branch in branches {
                    let config = self.config_for(connection);
                    match run_one(engine, branch, &entry, &config) {
                        Ok(result) => results.push(result),
                        Err(err) => warn!(
                            bus = %entry.bus,
                            %branch,
                            %connection,
                            error = %err,
                            "branch stepped event failed"
                        ),
                    }
                }
            }
        }

        info!(runs = results.len(), "stepped event study complete");
        Ok(results)
    }
}

fn run_one<E: SimulationEngine>(
    engine: &mut E,
    anchor: EquipmentHandle,
    entry: &BusEntry,
    config: &SteppedEventConfig,
) -> ScaResult<SteppedEventResult> {
    engine.apply_stepped_event(anchor, config)?;
    let steps = engine.stepped_events()?;
    debug!(bus = %entry.bus, %anchor, steps = steps.len(), "stepped event captured");
    Ok(SteppedEventResult::new(entry.bus.clone(), config.clone(), steps))
}
