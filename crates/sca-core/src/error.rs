//! Unified error types for short-circuit studies
//!
//! [`ScaError`] covers every failure the study pipeline can see. Errors fall
//! into three categories (see [`ErrorCategory`]):
//!
//! - **Configuration**: bad connection codes, bad filter expressions, missing
//!   or unreadable case files. Fatal; nothing is simulated.
//! - **Lookup**: equipment metadata is unavailable for a handle. The item is
//!   skipped and the run continues.
//! - **Simulation**: the engine rejected one fault or stepped-event request.
//!   That simulation is skipped; siblings still run.
//!
//! # Example
//!
//! ```ignore
//! use sca_core::{ScaError, ScaResult};
//!
//! fn run(engine: &mut impl SimulationEngine) -> ScaResult<()> {
//!     match engine.apply_fault(handle, &config) {
//!         Err(err) if err.is_recoverable() => tracing::warn!(%err, "skipping bus"),
//!         other => other?,
//!     }
//!     Ok(())
//! }
//! ```

use crate::EquipmentHandle;
use thiserror::Error;

/// Unified error type for all study operations.
#[derive(Error, Debug)]
pub enum ScaError {
    /// A fault connection code did not match any known alias
    #[error("unknown fault connection: {0:?}")]
    UnrecognizedConnectionCode(String),

    /// The bus-name filter did not compile
    #[error("invalid filter expression {pattern:?}: {reason}")]
    InvalidFilterExpression { pattern: String, reason: String },

    /// Other invalid run configuration (missing input, bad limits, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Equipment metadata unavailable for a handle
    #[error("lookup failed for {handle}: {reason}")]
    Lookup {
        handle: EquipmentHandle,
        reason: String,
    },

    /// The engine failed one simulation request
    #[error("{operation} failed for {handle}: {reason}")]
    Simulation {
        handle: EquipmentHandle,
        operation: &'static str,
        reason: String,
    },

    /// I/O errors while reading a case
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Case data could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for Results using ScaError.
pub type ScaResult<T> = Result<T, ScaError>;

/// How the pipeline reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Abort before any simulation runs
    Configuration,
    /// Skip the equipment item
    Lookup,
    /// Skip the single simulation
    Simulation,
}

impl ScaError {
    pub fn lookup(handle: EquipmentHandle, reason: impl Into<String>) -> Self {
        ScaError::Lookup {
            handle,
            reason: reason.into(),
        }
    }

    pub fn simulation(
        handle: EquipmentHandle,
        operation: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ScaError::Simulation {
            handle,
            operation,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScaError::Lookup { .. } => ErrorCategory::Lookup,
            ScaError::Simulation { .. } => ErrorCategory::Simulation,
            ScaError::UnrecognizedConnectionCode(_)
            | ScaError::InvalidFilterExpression { .. }
            | ScaError::Config(_)
            | ScaError::Io(_)
            | ScaError::Parse(_) => ErrorCategory::Configuration,
        }
    }

    /// True when the orchestrators may log the error and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Configuration)
    }
}

impl From<serde_json::Error> for ScaError {
    fn from(err: serde_json::Error) -> Self {
        ScaError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScaError::simulation(EquipmentHandle::new(7), "apply fault", "no data");
        assert_eq!(err.to_string(), "apply fault failed for handle 7: no data");
    }

    #[test]
    fn test_unrecognized_code_display() {
        let err = ScaError::UnrecognizedConnectionCode("XYZ".into());
        assert!(err.to_string().contains("\"XYZ\""));
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ScaError::Config("missing".into()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ScaError::lookup(EquipmentHandle::new(1), "stale").category(),
            ErrorCategory::Lookup
        );
        assert!(ScaError::lookup(EquipmentHandle::new(1), "stale").is_recoverable());
        assert!(!ScaError::Parse("bad json".into()).is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScaError = io_err.into();
        assert!(matches!(err, ScaError::Io(_)));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
