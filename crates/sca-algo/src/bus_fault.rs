//! Close-in bus fault study.
//!
//! Applies one [`FaultConfig`] at every selected bus and collects one
//! [`BusFaultResult`] per fault event the engine reports. Engine failures
//! never abort the study:
//!
//! - fault application fails → the bus is skipped entirely
//! - phasor retrieval fails → only that event is skipped

use crate::selector::{load_buses, BusEntry, BusSelector};
use sca_core::{
    validate_impedance, BusFaultResult, EquipmentHandle, FaultConfig, FaultConnection,
    FaultIndex, Ohms, Representation, ScaError, ScaResult, SimulationEngine,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct BusFaultStudy {
    selector: BusSelector,
    config: FaultConfig,
    representation: Representation,
}

impl BusFaultStudy {
    /// Study applying all `connections` at once, clearing prior faults, close-in.
    pub fn new(selector: BusSelector, connections: Vec<FaultConnection>) -> ScaResult<Self> {
        if connections.is_empty() {
            return Err(ScaError::Config(
                "at least one fault connection is required".into(),
            ));
        }
        Ok(Self {
            selector,
            config: FaultConfig::new(connections)
                .with_clear_previous(true)
                .with_close_in(),
            representation: Representation::Phase,
        })
    }

    /// Fault impedance; only applied when either value is strictly positive.
    pub fn with_impedance(mut self, resistance: Ohms, reactance: Ohms) -> ScaResult<Self> {
        validate_impedance(resistance, reactance)?;
        if resistance.value() > 0.0 || reactance.value() > 0.0 {
            self.config = self.config.with_impedance(resistance, reactance);
        }
        Ok(self)
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    pub fn config(&self) -> &FaultConfig {
        &self.config
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Run the study. Only failing to enumerate the case's buses is fatal.
    pub fn run<E: SimulationEngine>(&self, engine: &mut E) -> ScaResult<Vec<BusFaultResult>> {
        let population = load_buses(engine)?;
        let mut results = Vec::new();
        let mut faulted = 0usize;

        for entry in self.selector.select(population) {
            if let Err(err) = engine.apply_fault(entry.handle, &self.config) {
                warn!(bus = %entry.bus, error = %err, "fault application failed; skipping bus");
                continue;
            }
            faulted += 1;

            for event in engine.fault_events() {
                match self.collect_event(engine, &entry, event) {
                    Ok(result) => results.push(result),
                    Err(err) => {
                        warn!(bus = %entry.bus, event, error = %err, "skipping fault event")
                    }
                }
            }
        }

        info!(
            buses = faulted,
            rows = results.len(),
            "bus fault study complete"
        );
        Ok(results)
    }

    fn collect_event<E: SimulationEngine>(
        &self,
        engine: &E,
        entry: &BusEntry,
        event: FaultIndex,
    ) -> ScaResult<BusFaultResult> {
        let description = engine.fault_description(event)?;
        debug!(bus = %entry.bus, event, %description, "reading fault event");
        let voltages = engine.voltage_phasors(entry.handle, event, self.representation)?;
        let currents =
            engine.current_phasors(EquipmentHandle::FAULT_POINT, event, self.representation)?;
        Ok(BusFaultResult {
            bus: entry.bus.clone(),
            description,
            representation: self.representation,
            voltages,
            currents,
        })
    }
}
