//! Capability interface to the external short-circuit engine.
//!
//! The engine owns one case-wide simulation state: applying a fault or a
//! stepped event overwrites whatever was applied before. Callers drive it
//! strictly sequentially, so every mutating call takes `&mut self` and the
//! trait carries no `Send`/`Sync` bound.
//!
//! [`CaseSession`] loads a case and guarantees [`SimulationEngine::release`]
//! runs on every exit path afterwards.

use crate::config::{FaultConfig, SteppedEventConfig};
use crate::error::ScaResult;
use crate::phasor::{PhasorTriple, Representation};
use crate::results::SteppedEventStep;
use crate::{Bus, EquipmentHandle};
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// Equipment classes the orchestrators enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentKind {
    Bus,
    Branch,
}

/// Index of a fault event produced by the last [`SimulationEngine::apply_fault`].
pub type FaultIndex = usize;

pub trait SimulationEngine {
    /// Load a network case. Must succeed before any other call.
    fn load_case(&mut self, path: &Path) -> ScaResult<()>;

    /// Handles of every equipment item of `kind`, in case order.
    fn equipment(&self, kind: EquipmentKind) -> ScaResult<Vec<EquipmentHandle>>;

    /// Handles of equipment of `kind` attached to `bus`.
    fn bus_equipment(
        &self,
        bus: EquipmentHandle,
        kind: EquipmentKind,
    ) -> ScaResult<Vec<EquipmentHandle>>;

    fn bus(&self, handle: EquipmentHandle) -> ScaResult<Bus>;

    fn apply_fault(&mut self, handle: EquipmentHandle, config: &FaultConfig) -> ScaResult<()>;

    /// Events produced by the last fault application, in report order.
    fn fault_events(&self) -> Vec<FaultIndex>;

    fn fault_description(&self, event: FaultIndex) -> ScaResult<String>;

    /// Voltages at `handle` during `event`.
    fn voltage_phasors(
        &self,
        handle: EquipmentHandle,
        event: FaultIndex,
        representation: Representation,
    ) -> ScaResult<PhasorTriple>;

    /// Currents through `handle` during `event`; pass
    /// [`EquipmentHandle::FAULT_POINT`] for the total fault current.
    fn current_phasors(
        &self,
        handle: EquipmentHandle,
        event: FaultIndex,
        representation: Representation,
    ) -> ScaResult<PhasorTriple>;

    fn apply_stepped_event(
        &mut self,
        handle: EquipmentHandle,
        config: &SteppedEventConfig,
    ) -> ScaResult<()>;

    /// Steps of the last stepped-event run, ending with the terminal marker.
    fn stepped_events(&self) -> ScaResult<Vec<SteppedEventStep>>;

    /// Tear down the loaded case. Idempotent.
    fn release(&mut self);
}

/// A loaded case. Releases the engine when dropped.
pub struct CaseSession<E: SimulationEngine> {
    engine: E,
}

impl<E: SimulationEngine> CaseSession<E> {
    /// Load `path` into `engine`. The engine is released even if loading fails.
    pub fn open(mut engine: E, path: &Path) -> ScaResult<Self> {
        if let Err(err) = engine.load_case(path) {
            engine.release();
            return Err(err);
        }
        Ok(Self { engine })
    }

    pub fn engine(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: SimulationEngine> Deref for CaseSession<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.engine
    }
}

impl<E: SimulationEngine> DerefMut for CaseSession<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.engine
    }
}

impl<E: SimulationEngine> Drop for CaseSession<E> {
    fn drop(&mut self) {
        self.engine.release();
    }
}
