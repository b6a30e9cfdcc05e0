//! Studies run through the case-file engine against the shared sample case.

use sca_algo::{
    analyze, BusFaultStudy, BusSelector, ClearingCriteria, FilterSpec, SteppedEventStudy,
};
use sca_core::{
    canonicalize_all, CaseSession, ClearingNote, FaultConnection, Representation, ScaError,
};
use sca_io::{render_report, CaseEngine, ReportFormat, FINAL_CLEARING};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn open_sample() -> CaseSession<CaseEngine> {
    CaseSession::open(CaseEngine::new(), &repo_path("test_data/cases/sample.json")).unwrap()
}

fn all_buses() -> BusSelector {
    BusSelector::compile(&FilterSpec::default()).unwrap()
}

#[test]
fn bus_fault_rows_per_bus_and_connection() {
    let mut session = open_sample();
    let study = BusFaultStudy::new(
        all_buses(),
        vec![FaultConnection::Abc, FaultConnection::Ag],
    )
    .unwrap()
    .with_representation(Representation::Sequence);

    let rows = study.run(session.engine()).unwrap();
    assert_eq!(rows.len(), 8);
    assert!(rows[1].description.starts_with("2. Bus Fault on: 1 NEVADA"));

    // single line to ground: I0 = I1 = I2 = Ia / 3
    let ag = &rows[1].currents.values;
    for seq in ag {
        assert!((seq.magnitude - 4310.7 / 3.0).abs() < 1e-6);
    }
}

#[test]
fn area_filter_limits_bus_faults() {
    let mut session = open_sample();
    let selector = BusSelector::compile(&FilterSpec {
        area: 2,
        ..FilterSpec::default()
    })
    .unwrap();
    let rows = BusFaultStudy::new(selector, vec![FaultConnection::Abc])
        .unwrap()
        .run(session.engine())
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.bus.name.as_str()).collect();
    assert_eq!(names, vec!["CLAYTOR", "ROANOKE"]);
}

#[test]
fn missing_fault_data_skips_the_bus() {
    let mut session = open_sample();
    let rows = BusFaultStudy::new(all_buses(), vec![FaultConnection::Bc])
        .unwrap()
        .run(session.engine())
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn no_clear_flags_slow_and_stuck_runs() {
    let mut session = open_sample();
    let study = SteppedEventStudy::new(all_buses(), canonicalize_all(["ABC", "AG"]).unwrap())
        .unwrap();
    let runs = study.run(session.engine()).unwrap();
    assert_eq!(runs.len(), 8);
    assert_eq!(runs[0].steps.last().unwrap().description, FINAL_CLEARING);

    let flagged = analyze(runs, &ClearingCriteria::default());
    let summary: Vec<(&str, Option<ClearingNote>)> =
        flagged.iter().map(|r| (r.bus.name.as_str(), r.note)).collect();
    assert_eq!(
        summary,
        vec![
            ("OHIO", Some(ClearingNote::SlowClearing)),
            ("CLAYTOR", Some(ClearingNote::NotCleared)),
        ]
    );
}

#[test]
fn no_clear_with_branches_attributes_to_both_ends() {
    let mut session = open_sample();
    let study = SteppedEventStudy::new(all_buses(), canonicalize_all(["ABC", "AG"]).unwrap())
        .unwrap()
        .with_branches(true);
    let flagged = analyze(study.run(session.engine()).unwrap(), &ClearingCriteria::default());
    let names: Vec<&str> = flagged.iter().map(|r| r.bus.name.as_str()).collect();
    assert_eq!(names, vec!["OHIO", "CLAYTOR", "CLAYTOR", "ROANOKE"]);
    assert_eq!(
        flagged[2].fault_description(),
        "Close-in 1LG AG fault on CLAYTOR-ROANOKE"
    );
}

#[test]
fn report_file_has_one_header() {
    let mut session = open_sample();
    let study = SteppedEventStudy::new(all_buses(), vec![FaultConnection::Abc]).unwrap();
    let criteria = ClearingCriteria {
        verbose: true,
        ..ClearingCriteria::default()
    };
    let rows = analyze(study.run(session.engine()).unwrap(), &criteria);

    let tmp = tempdir().unwrap();
    let out = tmp.path().join("noclear.csv");
    let format = ReportFormat::resolve(ReportFormat::Table, Some(&out));
    render_report(&rows, format, fs::File::create(&out).unwrap()).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Fault Description,Bus Number,Bus Name,Bus kV"));
    assert!(lines[2].contains("slow clearing"));
}

#[test]
fn malformed_case_is_a_parse_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ \"buses\": [").unwrap();
    let err = CaseSession::open(CaseEngine::new(), &path).err().unwrap();
    assert!(matches!(err, ScaError::Parse(_)));
}
