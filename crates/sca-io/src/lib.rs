//! # sca-io: Case Files and Reports
//!
//! - [`CaseEngine`] replays a JSON case ([`CaseFile`]) through the
//!   [`sca_core::SimulationEngine`] interface.
//! - [`render_report`] writes study results as aligned columns or CSV.

pub mod case;
pub mod engine;
pub mod report;

pub use case::{Anchor, CaseBranch, CaseBus, CaseFault, CaseFile, CaseStep, CaseSteppedEvent};
pub use engine::{CaseEngine, FINAL_CLEARING};
pub use report::{render_report, ReportFormat, ReportRow};
