//! # sca-algo: Short-Circuit Study Orchestration
//!
//! The decision logic of the toolkit: which buses to study, how to drive the
//! engine for each one, and how to judge the protection response.
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`BusSelector`] | Name/voltage/area/zone filter over the bus population |
//! | [`BusFaultStudy`] | One close-in fault application per bus, one row per fault event |
//! | [`SteppedEventStudy`] | Stepped-event runs per bus, connection and (optionally) branch |
//! | [`clearing`] | Cleared / slow / not-cleared classification of stepped events |
//!
//! Everything runs sequentially against a single [`sca_core::SimulationEngine`];
//! failures on one bus or branch are logged through `tracing` and skipped.
//!
//! ## Example
//!
//! ```ignore
//! use sca_algo::{analyze, BusSelector, ClearingCriteria, FilterSpec, SteppedEventStudy};
//! use sca_core::canonicalize_all;
//!
//! let selector = BusSelector::compile(&FilterSpec { area: 3, ..FilterSpec::default() })?;
//! let study = SteppedEventStudy::new(selector, canonicalize_all(["ABC", "AG"])?)?
//!     .with_branches(true);
//! let flagged = analyze(study.run(&mut engine)?, &ClearingCriteria::default());
//! ```

pub mod bus_fault;
pub mod clearing;
pub mod selector;
pub mod stepped_event;
pub mod test_utils;

pub use bus_fault::BusFaultStudy;
pub use clearing::{analyze, classify, ClearingCriteria};
pub use selector::{load_buses, BusEntry, BusSelector, FilterSpec};
pub use stepped_event::SteppedEventStudy;
