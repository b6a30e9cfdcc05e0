use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sca_cli::cli::OutputArgs;
use sca_cli::config::ScaConfig;
use sca_core::{CaseSession, ScaError, ScaResult};
use sca_io::{render_report, CaseEngine, ReportFormat, ReportRow};
use tracing::info;

/// Check that the case file was given and is a regular file.
pub fn input_case(file: Option<&Path>) -> ScaResult<&Path> {
    let path =
        file.ok_or_else(|| ScaError::Config("must provide an input file using -f".into()))?;
    let meta = path
        .metadata()
        .map_err(|err| ScaError::Config(format!("{}: {err}", path.display())))?;
    if !meta.is_file() {
        return Err(ScaError::Config(format!("{:?} is not a file", path.display())));
    }
    Ok(path)
}

pub fn open_case(path: &Path) -> ScaResult<CaseSession<CaseEngine>> {
    info!("loading case {}", path.display());
    CaseSession::open(CaseEngine::new(), path)
}

/// CLI flag, then config file, then table; a `.csv` output forces CSV.
pub fn report_format(output: &OutputArgs, config: &ScaConfig) -> ReportFormat {
    let requested: ReportFormat = output
        .format
        .or(config.report.format)
        .unwrap_or_default()
        .into();
    ReportFormat::resolve(requested, output.output.as_deref())
}

pub fn write_report<R: ReportRow>(
    rows: &[R],
    output: &OutputArgs,
    config: &ScaConfig,
) -> Result<()> {
    let format = report_format(output, config);
    match output.output.as_deref() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            render_report(rows, format, BufWriter::new(file))
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(rows = rows.len(), "report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render_report(rows, format, &mut handle).context("writing report")?;
            handle.flush()?;
        }
    }
    Ok(())
}
