//! Bus selection by name pattern, voltage band, area and zone.
//!
//! All criteria are ANDed. An area or zone of `0` matches everything.
//! [`BusSelector::select`] is lazy and preserves the input order, so running
//! it twice over the same population yields the same sequence.

use regex::Regex;
use sca_core::{
    Bus, EquipmentHandle, EquipmentKind, Kilovolts, ScaError, ScaResult, SimulationEngine,
};
use tracing::{debug, warn};

/// Raw filter settings as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Regular expression matched against the bus name
    pub expression: Option<String>,
    pub v_min: f64,
    pub v_max: f64,
    /// `0` matches any area
    pub area: u32,
    /// `0` matches any zone
    pub zone: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            expression: None,
            v_min: 0.0,
            v_max: 999.0,
            area: 0,
            zone: 0,
        }
    }
}

/// A bus together with the handle the engine knows it by.
#[derive(Debug, Clone, PartialEq)]
pub struct BusEntry {
    pub handle: EquipmentHandle,
    pub bus: Bus,
}

/// Compiled bus filter.
#[derive(Debug, Clone)]
pub struct BusSelector {
    pattern: Option<Regex>,
    v_min: Kilovolts,
    v_max: Kilovolts,
    area: u32,
    zone: u32,
}

impl BusSelector {
    /// Compile a filter. A bad expression fails here, before any bus is visited.
    pub fn compile(spec: &FilterSpec) -> ScaResult<Self> {
        let pattern = match spec.expression.as_deref() {
            Some(expr) if !expr.is_empty() => {
                Some(
                    Regex::new(expr).map_err(|err| ScaError::InvalidFilterExpression {
                        pattern: expr.to_string(),
                        reason: err.to_string(),
                    })?,
                )
            }
            _ => None,
        };
        Ok(Self {
            pattern,
            v_min: Kilovolts(spec.v_min),
            v_max: Kilovolts(spec.v_max),
            area: spec.area,
            zone: spec.zone,
        })
    }

    /// Selector that accepts every bus.
    pub fn any() -> Self {
        Self {
            pattern: None,
            v_min: Kilovolts(f64::NEG_INFINITY),
            v_max: Kilovolts(f64::INFINITY),
            area: 0,
            zone: 0,
        }
    }

    pub fn accepts(&self, bus: &Bus) -> bool {
        if let Some(re) = &self.pattern {
            if !re.is_match(&bus.name) {
                return false;
            }
        }
        if bus.nominal_kv < self.v_min || bus.nominal_kv > self.v_max {
            return false;
        }
        if self.area != 0 && bus.area != self.area {
            return false;
        }
        if self.zone != 0 && bus.zone != self.zone {
            return false;
        }
        true
    }

    /// Lazily yield the entries whose bus passes every criterion.
    pub fn select<'a, I>(&'a self, entries: I) -> impl Iterator<Item = BusEntry> + 'a
    where
        I: IntoIterator<Item = BusEntry>,
        I::IntoIter: 'a,
    {
        entries.into_iter().filter(move |entry| self.accepts(&entry.bus))
    }
}

/// Load every bus in the case. Buses whose metadata cannot be read are
/// logged and skipped.
pub fn load_buses<E: SimulationEngine>(engine: &E) -> ScaResult<Vec<BusEntry>> {
    let handles = engine.equipment(EquipmentKind::Bus)?;
    let mut entries = Vec::with_capacity(handles.len());
    for handle in handles {
        match engine.bus(handle) {
            Ok(bus) => entries.push(BusEntry { handle, bus }),
            Err(err) => warn!(%handle, error = %err, "skipping bus that failed to load"),
        }
    }
    debug!(count = entries.len(), "loaded bus population");
    Ok(entries)
}
