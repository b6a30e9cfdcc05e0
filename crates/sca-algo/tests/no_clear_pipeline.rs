//! End-to-end checks of the stepped-event path: selection, orchestration,
//! classification, and session teardown, against the in-memory engine.

use sca_algo::test_utils::FakeEngine;
use sca_algo::{analyze, BusSelector, ClearingCriteria, FilterSpec, SteppedEventStudy};
use sca_core::{
    canonicalize_all, Amperes, CaseSession, ClearingNote, FaultConnection, ScaError, Seconds,
    SteppedEventStep,
};
use std::path::Path;

fn step(t: f64, i: f64) -> SteppedEventStep {
    SteppedEventStep::new(t, i, format!("{t:.2}s"))
}

fn substation() -> FakeEngine {
    let mut engine = FakeEngine::new();
    let fast = engine.add_bus(1, "FAST 132", 132.0, 1, 1);
    let slow = engine.add_bus(2, "SLOW 132", 132.0, 1, 1);
    let stuck = engine.add_bus(3, "STUCK 33", 33.0, 2, 1);
    engine.add_stale_bus();
    let feeder = engine.add_branch(stuck);

    for conn in [FaultConnection::Abc, FaultConnection::Ag] {
        engine.set_script(fast, conn, vec![step(0.0, 500.0), step(0.1, 500.0), step(0.2, 0.8)]);
        engine.set_script(slow, conn, vec![step(0.0, 500.0), step(4.0, 0.5)]);
        engine.set_script(stuck, conn, vec![step(0.0, 500.0), step(5.0, 500.0)]);
        engine.set_script(feeder, conn, vec![step(0.0, 800.0), step(0.3, 0.0)]);
    }
    engine
}

#[test]
fn flags_only_problem_runs() {
    let mut session = CaseSession::open(substation(), Path::new("substation.case")).unwrap();
    let study = SteppedEventStudy::new(
        BusSelector::compile(&FilterSpec::default()).unwrap(),
        canonicalize_all(["abc", "ag"]).unwrap(),
    )
    .unwrap()
    .with_branches(true);

    let runs = study.run(session.engine()).unwrap();
    // 3 buses x 2 connections, plus the feeder branch x 2 connections
    assert_eq!(runs.len(), 8);

    let flagged = analyze(runs, &ClearingCriteria::default());
    let summary: Vec<(&str, ClearingNote)> = flagged
        .iter()
        .map(|r| (r.bus.name.as_str(), r.note.unwrap()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("SLOW 132", ClearingNote::SlowClearing),
            ("SLOW 132", ClearingNote::SlowClearing),
            ("STUCK 33", ClearingNote::NotCleared),
            ("STUCK 33", ClearingNote::NotCleared),
        ]
    );
    assert_eq!(flagged[2].max_time, Seconds(5.0));
    assert_eq!(flagged[2].current_init, Amperes(500.0));
}

#[test]
fn verbose_reports_every_run() {
    let mut engine = substation();
    let study = SteppedEventStudy::new(
        BusSelector::compile(&FilterSpec::default()).unwrap(),
        vec![FaultConnection::Abc],
    )
    .unwrap()
    .with_branches(true);

    let criteria = ClearingCriteria {
        verbose: true,
        ..ClearingCriteria::default()
    };
    let all = analyze(study.run(&mut engine).unwrap(), &criteria);
    assert_eq!(all.len(), 4);
    // the feeder run is attributed to the bus it hangs off
    assert_eq!(all[3].bus.name, "STUCK 33");
    assert_eq!(all[3].note, Some(ClearingNote::Okay));
}

#[test]
fn voltage_filter_limits_runs() {
    let mut engine = substation();
    let study = SteppedEventStudy::new(
        BusSelector::compile(&FilterSpec {
            v_max: 100.0,
            ..FilterSpec::default()
        })
        .unwrap(),
        vec![FaultConnection::Ag],
    )
    .unwrap();
    let runs = study.run(&mut engine).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].bus.name, "STUCK 33");
}

#[test]
fn session_releases_engine_on_drop() {
    let engine = substation();
    let releases = engine.release_counter();
    {
        let session = CaseSession::open(engine, Path::new("substation.case")).unwrap();
        assert!(session.is_loaded());
    }
    assert_eq!(releases.get(), 1);
}

#[test]
fn failed_load_still_releases() {
    let engine = substation();
    let releases = engine.release_counter();
    let err = CaseSession::open(engine, Path::new("")).err().unwrap();
    assert!(matches!(err, ScaError::Config(_)));
    assert_eq!(releases.get(), 1);
}
