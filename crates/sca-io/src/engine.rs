//! [`SimulationEngine`] backed by a JSON case file.
//!
//! Handles are issued in case order: buses first (`1..=n`), then branches.
//! Fault applications and stepped events replay the data recorded in the
//! case; anything the case does not record is a simulation error for that
//! request only.

use crate::case::{Anchor, CaseBranch, CaseFile};
use sca_core::{
    Bus, BusId, EquipmentHandle, EquipmentKind, FaultConfig, FaultConnection, FaultIndex,
    Kilovolts, PhasorTriple, Representation, ScaError, ScaResult, SimulationEngine,
    SteppedEventConfig, SteppedEventStep,
};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Description of the step the engine appends after the last protection operation.
pub const FINAL_CLEARING: &str = "Final clearing";

#[derive(Debug)]
struct LoadedCase {
    name: String,
    buses: Vec<Bus>,
    branches: Vec<CaseBranch>,
    faults: HashMap<(usize, FaultConnection), (PhasorTriple, PhasorTriple)>,
    scripts: HashMap<(Anchor, FaultConnection), Vec<SteppedEventStep>>,
}

impl LoadedCase {
    fn build(case: CaseFile) -> Self {
        let buses: Vec<Bus> = case
            .buses
            .iter()
            .map(|b| Bus {
                id: BusId::new(b.number),
                name: b.name.clone(),
                nominal_kv: Kilovolts(b.kv),
                area: b.area,
                zone: b.zone,
            })
            .collect();
        let faults = case
            .faults
            .iter()
            .map(|f| ((f.bus, f.connection), (f.voltage_triple(), f.current_triple())))
            .collect();
        let scripts = case
            .stepped_events
            .into_iter()
            .map(|event| {
                let steps = event
                    .steps
                    .into_iter()
                    .map(|s| SteppedEventStep::new(s.time, s.current, s.description))
                    .collect();
                ((event.anchor, event.connection), steps)
            })
            .collect();
        Self {
            name: case.name,
            buses,
            branches: case.branches,
            faults,
            scripts,
        }
    }

    fn bus_handle(&self, pos: usize) -> EquipmentHandle {
        EquipmentHandle::new(pos as u64 + 1)
    }

    fn branch_handle(&self, pos: usize) -> EquipmentHandle {
        EquipmentHandle::new((self.buses.len() + pos) as u64 + 1)
    }

    fn resolve(&self, handle: EquipmentHandle) -> Option<Equipment<'_>> {
        let idx = usize::try_from(handle.value()).ok()?.checked_sub(1)?;
        if let Some(bus) = self.buses.get(idx) {
            return Some(Equipment::Bus(bus));
        }
        self.branches
            .get(idx - self.buses.len())
            .map(Equipment::Branch)
    }
}

enum Equipment<'a> {
    Bus(&'a Bus),
    Branch(&'a CaseBranch),
}

#[derive(Debug, Clone)]
struct RecordedFault {
    bus: EquipmentHandle,
    description: String,
    voltages: PhasorTriple,
    currents: PhasorTriple,
}

/// Case-file engine. Starts empty; call [`SimulationEngine::load_case`].
#[derive(Debug, Default)]
pub struct CaseEngine {
    case: Option<LoadedCase>,
    events: Vec<RecordedFault>,
    steps: Option<Vec<SteppedEventStep>>,
}

impl CaseEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an already-parsed case loaded.
    pub fn from_case(case: CaseFile) -> ScaResult<Self> {
        case.validate()?;
        Ok(Self {
            case: Some(LoadedCase::build(case)),
            ..Self::default()
        })
    }

    fn loaded(&self) -> ScaResult<&LoadedCase> {
        self.case
            .as_ref()
            .ok_or_else(|| ScaError::Config("no case loaded".into()))
    }

    fn recorded(&self, event: FaultIndex) -> ScaResult<&RecordedFault> {
        event
            .checked_sub(1)
            .and_then(|idx| self.events.get(idx))
            .ok_or_else(|| {
                ScaError::simulation(
                    EquipmentHandle::FAULT_POINT,
                    "read fault event",
                    format!("no fault event {event}"),
                )
            })
    }
}

impl SimulationEngine for CaseEngine {
    fn load_case(&mut self, path: &Path) -> ScaResult<()> {
        let case = CaseFile::from_path(path)?;
        let loaded = LoadedCase::build(case);
        info!(
            case = %loaded.name,
            buses = loaded.buses.len(),
            branches = loaded.branches.len(),
            "loaded case {}",
            path.display()
        );
        self.case = Some(loaded);
        self.events.clear();
        self.steps = None;
        Ok(())
    }

    fn equipment(&self, kind: EquipmentKind) -> ScaResult<Vec<EquipmentHandle>> {
        let case = self.loaded()?;
        Ok(match kind {
            EquipmentKind::Bus => (0..case.buses.len()).map(|p| case.bus_handle(p)).collect(),
            EquipmentKind::Branch => (0..case.branches.len())
                .map(|p| case.branch_handle(p))
                .collect(),
        })
    }

    fn bus_equipment(
        &self,
        bus: EquipmentHandle,
        kind: EquipmentKind,
    ) -> ScaResult<Vec<EquipmentHandle>> {
        let case = self.loaded()?;
        let number = match case.resolve(bus) {
            Some(Equipment::Bus(b)) => b.id.value(),
            _ => return Err(ScaError::lookup(bus, "not a bus")),
        };
        Ok(match kind {
            EquipmentKind::Branch => case
                .branches
                .iter()
                .enumerate()
                .filter(|(_, br)| br.from_bus == number || br.to_bus == number)
                .map(|(p, _)| case.branch_handle(p))
                .collect(),
            EquipmentKind::Bus => Vec::new(),
        })
    }

    fn bus(&self, handle: EquipmentHandle) -> ScaResult<Bus> {
        match self.loaded()?.resolve(handle) {
            Some(Equipment::Bus(bus)) => Ok(bus.clone()),
            Some(Equipment::Branch(_)) => Err(ScaError::lookup(handle, "handle is a branch")),
            None => Err(ScaError::lookup(handle, "unknown handle")),
        }
    }

    fn apply_fault(&mut self, handle: EquipmentHandle, config: &FaultConfig) -> ScaResult<()> {
        if config.clear_previous {
            self.events.clear();
        }
        let case = self.loaded()?;
        let bus = match case.resolve(handle) {
            Some(Equipment::Bus(bus)) => bus,
            Some(Equipment::Branch(_)) => {
                return Err(ScaError::simulation(handle, "apply fault", "not a bus"))
            }
            None => return Err(ScaError::lookup(handle, "unknown handle")),
        };
        if !config.close_in {
            return Err(ScaError::simulation(
                handle,
                "apply fault",
                "case data only records close-in faults",
            ));
        }

        let impedance = if config.has_impedance() {
            format!(
                " R={:.2} X={:.2}",
                config.resistance.value(),
                config.reactance.value()
            )
        } else {
            String::new()
        };
        let mut applied = Vec::with_capacity(config.connections.len());
        for conn in &config.connections {
            let (voltages, currents) = case
                .faults
                .get(&(bus.id.value(), *conn))
                .copied()
                .ok_or_else(|| {
                    ScaError::simulation(
                        handle,
                        "apply fault",
                        format!("no {conn} fault data for bus {}", bus.id),
                    )
                })?;
            let description = format!(
                "{}. Bus Fault on: {} {} {}{}",
                self.events.len() + applied.len() + 1,
                bus,
                conn.kind().label(),
                conn,
                impedance
            );
            applied.push(RecordedFault {
                bus: handle,
                description,
                voltages,
                currents,
            });
        }
        debug!(bus = %bus, events = applied.len(), "fault applied");
        self.events.extend(applied);
        Ok(())
    }

    fn fault_events(&self) -> Vec<FaultIndex> {
        (1..=self.events.len()).collect()
    }

    fn fault_description(&self, event: FaultIndex) -> ScaResult<String> {
        Ok(self.recorded(event)?.description.clone())
    }

    fn voltage_phasors(
        &self,
        handle: EquipmentHandle,
        event: FaultIndex,
        representation: Representation,
    ) -> ScaResult<PhasorTriple> {
        let fault = self.recorded(event)?;
        if fault.bus != handle {
            return Err(ScaError::simulation(
                handle,
                "read voltages",
                "case data only records voltages at the faulted bus",
            ));
        }
        Ok(fault.voltages.to_representation(representation))
    }

    fn current_phasors(
        &self,
        handle: EquipmentHandle,
        event: FaultIndex,
        representation: Representation,
    ) -> ScaResult<PhasorTriple> {
        if handle != EquipmentHandle::FAULT_POINT {
            return Err(ScaError::simulation(
                handle,
                "read currents",
                "case data only records total fault current",
            ));
        }
        Ok(self.recorded(event)?.currents.to_representation(representation))
    }

    fn apply_stepped_event(
        &mut self,
        handle: EquipmentHandle,
        config: &SteppedEventConfig,
    ) -> ScaResult<()> {
        self.steps = None;
        let case = self.loaded()?;
        let (anchor, location) = match case.resolve(handle) {
            Some(Equipment::Bus(bus)) => (Anchor::Bus(bus.id.value()), bus.to_string()),
            Some(Equipment::Branch(br)) => (Anchor::Branch(br.id), br.name.clone()),
            None => return Err(ScaError::lookup(handle, "unknown handle")),
        };
        if !config.close_in {
            return Err(ScaError::simulation(
                handle,
                "stepped event",
                "case data only records close-in stepped events",
            ));
        }
        let script = case.scripts.get(&(anchor, config.connection)).ok_or_else(|| {
            ScaError::simulation(
                handle,
                "stepped event",
                format!("no {} stepped event recorded at {location}", config.connection),
            )
        })?;

        let default_description = format!(
            "Close-in {} {} fault on {}",
            config.connection.kind().label(),
            config.connection,
            location
        );
        let mut steps: Vec<SteppedEventStep> = script
            .iter()
            .map(|step| {
                let mut step = step.clone();
                if step.description.is_empty() {
                    step.description = default_description.clone();
                }
                step
            })
            .collect();
        let last_time = steps.last().map(|s| s.time.value()).unwrap_or(0.0);
        steps.push(SteppedEventStep::new(last_time, 0.0, FINAL_CLEARING));
        debug!(%handle, steps = steps.len(), "stepped event replayed");
        self.steps = Some(steps);
        Ok(())
    }

    fn stepped_events(&self) -> ScaResult<Vec<SteppedEventStep>> {
        self.steps.clone().ok_or_else(|| {
            ScaError::simulation(
                EquipmentHandle::FAULT_POINT,
                "stepped event",
                "no stepped event has been applied",
            )
        })
    }

    fn release(&mut self) {
        if self.case.take().is_some() {
            debug!("case released");
        }
        self.events.clear();
        self.steps = None;
    }
}
