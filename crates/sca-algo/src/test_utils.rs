//! In-memory [`SimulationEngine`] for exercising the orchestrators without a
//! real case or engine.
//!
//! Buses, branches, fault responses and stepped-event scripts are registered
//! up front; individual handles or events can be marked as failing to drive
//! the skip-and-continue paths.

use sca_core::{
    Bus, BusId, EquipmentHandle, EquipmentKind, FaultConfig, FaultConnection, FaultIndex,
    Kilovolts, PhasorTriple, Representation, ScaError, ScaResult, SimulationEngine,
    SteppedEventConfig, SteppedEventStep,
};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::rc::Rc;

/// Description the fake gives its terminal stepped-event marker.
pub const TERMINAL_MARKER: &str = "final clearing";

#[derive(Debug, Clone)]
struct FakeEvent {
    bus: EquipmentHandle,
    description: String,
    voltages: PhasorTriple,
    currents: PhasorTriple,
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    next_handle: u64,
    buses: Vec<(EquipmentHandle, Option<Bus>)>,
    branches: Vec<(EquipmentHandle, EquipmentHandle)>,
    faults: HashMap<(EquipmentHandle, FaultConnection), (PhasorTriple, PhasorTriple)>,
    scripts: HashMap<(EquipmentHandle, FaultConnection), Vec<SteppedEventStep>>,
    failing_faults: HashSet<EquipmentHandle>,
    failing_steps: HashSet<EquipmentHandle>,
    failing_voltage_events: HashSet<FaultIndex>,
    events: Vec<FakeEvent>,
    steps: Option<Vec<SteppedEventStep>>,
    /// Every handle passed to `apply_fault`/`apply_stepped_event`, in order.
    pub applied: Vec<EquipmentHandle>,
    /// Every stepped-event config received, in order.
    pub stepped_configs: Vec<SteppedEventConfig>,
    loaded: bool,
    releases: Rc<Cell<usize>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Self::default()
        }
    }

    fn issue_handle(&mut self) -> EquipmentHandle {
        let handle = EquipmentHandle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    pub fn add_bus(
        &mut self,
        number: usize,
        name: &str,
        kv: f64,
        area: u32,
        zone: u32,
    ) -> EquipmentHandle {
        let handle = self.issue_handle();
        self.buses.push((
            handle,
            Some(Bus {
                id: BusId::new(number),
                name: name.to_string(),
                nominal_kv: Kilovolts(kv),
                area,
                zone,
            }),
        ));
        handle
    }

    /// A bus handle whose metadata lookup always fails.
    pub fn add_stale_bus(&mut self) -> EquipmentHandle {
        let handle = self.issue_handle();
        self.buses.push((handle, None));
        handle
    }

    pub fn add_branch(&mut self, bus: EquipmentHandle) -> EquipmentHandle {
        let handle = self.issue_handle();
        self.branches.push((handle, bus));
        handle
    }

    /// Phase-domain response of `bus` to `conn`.
    pub fn set_fault(
        &mut self,
        bus: EquipmentHandle,
        conn: FaultConnection,
        voltages: PhasorTriple,
        currents: PhasorTriple,
    ) {
        self.faults.insert((bus, conn), (voltages, currents));
    }

    /// Steps for a run anchored at `anchor`; the terminal marker is appended on replay.
    pub fn set_script(
        &mut self,
        anchor: EquipmentHandle,
        conn: FaultConnection,
        steps: Vec<SteppedEventStep>,
    ) {
        self.scripts.insert((anchor, conn), steps);
    }

    pub fn fail_fault(&mut self, bus: EquipmentHandle) {
        self.failing_faults.insert(bus);
    }

    pub fn fail_stepped_event(&mut self, anchor: EquipmentHandle) {
        self.failing_steps.insert(anchor);
    }

    pub fn fail_voltage_event(&mut self, event: FaultIndex) {
        self.failing_voltage_events.insert(event);
    }

    /// Shared counter of `release` calls; survives the engine being dropped.
    pub fn release_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.releases)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn event(&self, event: FaultIndex) -> ScaResult<&FakeEvent> {
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

impl SimulationEngine for FakeEngine {
    fn load_case(&mut self, path: &Path) -> ScaResult<()> {
        if path.as_os_str().is_empty() {
            return Err(ScaError::Config("empty case path".into()));
        }
        self.loaded = true;
        Ok(())
    }

    fn equipment(&self, kind: EquipmentKind) -> ScaResult<Vec<EquipmentHandle>> {
        Ok(match kind {
            EquipmentKind::Bus => self.buses.iter().map(|(h, _)| *h).collect(),
            EquipmentKind::Branch => self.branches.iter().map(|(h, _)| *h).collect(),
        })
    }

    fn bus_equipment(
        &self,
        bus: EquipmentHandle,
        kind: EquipmentKind,
    ) -> ScaResult<Vec<EquipmentHandle>> {
        match kind {
            EquipmentKind::Branch => Ok(self
                .branches
                .iter()
                .filter(|(_, owner)| *owner == bus)
                .map(|(h, _)| *h)
                .collect()),
            EquipmentKind::Bus => Ok(Vec::new()),
        }
    }

    fn bus(&self, handle: EquipmentHandle) -> ScaResult<Bus> {
        self.buses
            .iter()
            .find(|(h, _)| *h == handle)
            .and_then(|(_, bus)| bus.clone())
            .ok_or_else(|| ScaError::lookup(handle, "stale bus handle"))
    }

    fn apply_fault(&mut self, handle: EquipmentHandle, config: &FaultConfig) -> ScaResult<()> {
        self.applied.push(handle);
        if config.clear_previous {
            self.events.clear();
        }
        if self.failing_faults.contains(&handle) {
            return Err(ScaError::simulation(handle, "apply fault", "injected failure"));
        }
        let bus = self.bus(handle)?;
        for conn in &config.connections {
            let (voltages, currents) = self
                .faults
                .get(&(handle, *conn))
                .copied()
                .ok_or_else(|| {
                    ScaError::simulation(handle, "apply fault", format!("no {conn} response"))
                })?;
            let description = format!(
                "{}. Bus Fault on: {} {}",
                self.events.len() + 1,
                bus,
                conn.kind().label()
            );
            self.events.push(FakeEvent {
                bus: handle,
                description,
                voltages,
                currents,
            });
        }
        Ok(())
    }

    fn fault_events(&self) -> Vec<FaultIndex> {
        (1..=self.events.len()).collect()
    }

    fn fault_description(&self, event: FaultIndex) -> ScaResult<String> {
        Ok(self.event(event)?.description.clone())
    }

    fn voltage_phasors(
        &self,
        handle: EquipmentHandle,
        event: FaultIndex,
        representation: Representation,
    ) -> ScaResult<PhasorTriple> {
        let fault = self.event(event)?;
        if self.failing_voltage_events.contains(&event) || fault.bus != handle {
            return Err(ScaError::simulation(
                handle,
                "read voltages",
                format!("event {event} unavailable"),
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
                "branch currents not recorded",
            ));
        }
        Ok(self.event(event)?.currents.to_representation(representation))
    }

    fn apply_stepped_event(
        &mut self,
        handle: EquipmentHandle,
        config: &SteppedEventConfig,
    ) -> ScaResult<()> {
        self.applied.push(handle);
        self.stepped_configs.push(config.clone());
        self.steps = None;
        if self.failing_steps.contains(&handle) {
            return Err(ScaError::simulation(handle, "stepped event", "injected failure"));
        }
        let mut steps = self
            .scripts
            .get(&(handle, config.connection))
            .cloned()
            .ok_or_else(|| {
                ScaError::simulation(
                    handle,
                    "stepped event",
                    format!("no {} script", config.connection),
                )
            })?;
        let last_time = steps.last().map(|s| s.time.value()).unwrap_or(0.0);
        steps.push(SteppedEventStep::new(last_time, 0.0, TERMINAL_MARKER));
        self.steps = Some(steps);
        Ok(())
    }

    fn stepped_events(&self) -> ScaResult<Vec<SteppedEventStep>> {
        self.steps.clone().ok_or_else(|| {
            ScaError::simulation(EquipmentHandle::FAULT_POINT, "stepped event", "nothing applied")
        })
    }

    fn release(&mut self) {
        self.loaded = false;
        self.events.clear();
        self.steps = None;
        self.releases.set(self.releases.get() + 1);
    }
}
