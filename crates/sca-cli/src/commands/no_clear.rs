use anyhow::Result;
use sca_algo::{analyze, BusSelector, ClearingCriteria, SteppedEventStudy};
use sca_cli::cli::NoClearArgs;
use sca_cli::config::ScaConfig;
use sca_core::{canonicalize_all, Amperes, Ohms, ScaError, ScaResult, Seconds};
use tracing::{debug, info};

use super::util;

const DEFAULT_CONNECTIONS: [&str; 2] = ["ABC", "AG"];

pub fn handle(args: &NoClearArgs, config: &ScaConfig) -> Result<()> {
    let path = util::input_case(args.case.file.as_deref())?;

    let connections = if !args.conn.is_empty() {
        canonicalize_all(&args.conn)?
    } else if let Some(configured) = &config.noclear.connections {
        canonicalize_all(configured)?
    } else {
        canonicalize_all(DEFAULT_CONNECTIONS)?
    };
    let criteria = criteria(args, config)?;
    let selector = BusSelector::compile(&args.filter.to_spec())?;
    let study = SteppedEventStudy::new(selector, connections)?
        .with_impedance(
            Ohms(args.impedance.resistance),
            Ohms(args.impedance.reactance),
        )?
        .with_branches(args.branches);

    debug!(connections = ?study.connections(), ?criteria, "running no-clear study");
    let runs = {
        let mut session = util::open_case(path)?;
        study.run(session.engine())?
    };
    let total = runs.len();
    let flagged = analyze(runs, &criteria);
    info!(runs = total, reported = flagged.len(), "no-clear study finished");

    util::write_report(&flagged, &args.output, config)
}

/// Thresholds from the flags, then the config file, then the defaults.
fn criteria(args: &NoClearArgs, config: &ScaConfig) -> ScaResult<ClearingCriteria> {
    let defaults = ClearingCriteria::default();
    let cleared = args
        .cleared_threshold
        .or(config.noclear.cleared_threshold)
        .unwrap_or(defaults.cleared_threshold.value());
    let slow = args
        .slow_threshold
        .or(config.noclear.slow_threshold)
        .unwrap_or(defaults.slow_threshold.value());
    for (name, value) in [("cleared threshold", cleared), ("slow threshold", slow)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ScaError::Config(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(ClearingCriteria {
        cleared_threshold: Amperes(cleared),
        slow_threshold: Seconds(slow),
        verbose: args.verbose,
    })
}
