//! Clearing classification of stepped-event runs.
//!
//! The scan walks every step except the last one, which is the engine's
//! terminal marker. `current_final` and `max_time` are the values of the last
//! step scanned, not running maxima. The scan stops at the first step whose
//! current is at or below the cleared threshold.
//!
//! Classification, first match wins:
//!
//! | Condition                          | Note            |
//! |------------------------------------|-----------------|
//! | not cleared                        | `not cleared`   |
//! | cleared and `max_time ≥ slow`      | `slow clearing` |
//! | verbose                            | `okay`          |
//! | otherwise                          | suppressed      |

use sca_core::{Amperes, ClearingNote, Seconds, SteppedEventResult, SteppedEventStep};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearingCriteria {
    /// Current at or below which the fault counts as cleared
    pub cleared_threshold: Amperes,
    /// Clearing at or after this time is slow
    pub slow_threshold: Seconds,
    /// Report healthy runs as `okay` instead of dropping them
    pub verbose: bool,
}

impl Default for ClearingCriteria {
    fn default() -> Self {
        Self {
            cleared_threshold: Amperes(1.0),
            slow_threshold: Seconds(3.0),
            verbose: false,
        }
    }
}

/// Fill in the derived fields of `result` and return its note.
///
/// `None` means the run is healthy and should be left out of the report.
pub fn classify(
    result: &mut SteppedEventResult,
    criteria: &ClearingCriteria,
) -> Option<ClearingNote> {
    result.cleared = false;
    result.current_init = Amperes(0.0);
    result.current_final = Amperes(0.0);
    result.max_time = Seconds(0.0);

    let scanned: &[SteppedEventStep] = result
        .steps
        .split_last()
        .map(|(_terminal, rest)| rest)
        .unwrap_or(&[]);
    for (i, step) in scanned.iter().enumerate() {
        if i == 0 {
            result.current_init = step.current;
        }
        result.current_final = step.current;
        result.max_time = step.time;
        if step.current <= criteria.cleared_threshold {
            result.cleared = true;
            break;
        }
    }

    let note = if !result.cleared {
        Some(ClearingNote::NotCleared)
    } else if result.max_time >= criteria.slow_threshold {
        Some(ClearingNote::SlowClearing)
    } else if criteria.verbose {
        Some(ClearingNote::Okay)
    } else {
        None
    };
    result.note = note;
    note
}

/// Classify every run and keep only those that carry a note, in order.
pub fn analyze(
    results: Vec<SteppedEventResult>,
    criteria: &ClearingCriteria,
) -> Vec<SteppedEventResult> {
    results
        .into_iter()
        .filter_map(|mut result| classify(&mut result, criteria).map(|_| result))
        .collect()
}
