//! Tabular and CSV rendering of study results.

use csv::WriterBuilder;
use sca_core::{BusFaultResult, PhasorTriple, Representation, SteppedEventResult};
use std::io::{self, Write};
use std::path::Path;
use tabwriter::TabWriter;

/// A result record that can be written as one report line.
///
/// `values()` must have the same arity as `header()`.
pub trait ReportRow {
    fn header(&self) -> Vec<String>;
    fn values(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Space-aligned columns
    #[default]
    Table,
    Csv,
}

impl ReportFormat {
    /// CSV wins if requested explicitly or if the output file ends in `.csv`.
    pub fn resolve(requested: ReportFormat, output: Option<&Path>) -> ReportFormat {
        let csv_path = output
            .map(|p| p.to_string_lossy().to_ascii_lowercase().ends_with(".csv"))
            .unwrap_or(false);
        if csv_path {
            ReportFormat::Csv
        } else {
            requested
        }
    }
}

/// Write `rows` to `writer`: the header of the first row, then one line per row.
///
/// Nothing is written for an empty slice.
pub fn render_report<W, R>(rows: &[R], format: ReportFormat, writer: W) -> io::Result<()>
where
    W: Write,
    R: ReportRow,
{
    match format {
        ReportFormat::Csv => {
            let mut out = WriterBuilder::new().flexible(false).from_writer(writer);
            let mut header_written = false;
            for row in rows {
                if !header_written {
                    out.write_record(row.header())?;
                    header_written = true;
                }
                out.write_record(row.values())?;
            }
            out.flush()
        }
        ReportFormat::Table => {
            let mut out = TabWriter::new(writer).padding(2);
            let mut header_written = false;
            for row in rows {
                if !header_written {
                    writeln!(out, "{}", row.header().join("\t"))?;
                    header_written = true;
                }
                writeln!(out, "{}", row.values().join("\t"))?;
            }
            out.flush()
        }
    }
}

const SEQUENCE_COLUMNS: [(&str, &str); 6] = [
    ("V0", "kV"),
    ("V1", "kV"),
    ("V2", "kV"),
    ("I0", "A"),
    ("I1", "A"),
    ("I2", "A"),
];

const PHASE_COLUMNS: [(&str, &str); 6] = [
    ("Va", "kV"),
    ("Vb", "kV"),
    ("Vc", "kV"),
    ("Ia", "A"),
    ("Ib", "A"),
    ("Ic", "A"),
];

fn bus_columns() -> Vec<String> {
    ["Fault Description", "Bus Number", "Bus Name", "Bus kV"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn push_phasors(values: &mut Vec<String>, triple: &PhasorTriple) {
    for p in &triple.values {
        values.push(format!("{:.2}", p.magnitude));
        values.push(format!("{:.1}", p.angle.value()));
    }
}

impl ReportRow for BusFaultResult {
    fn header(&self) -> Vec<String> {
        let quantities = match self.representation {
            Representation::Sequence => &SEQUENCE_COLUMNS,
            Representation::Phase => &PHASE_COLUMNS,
        };
        let mut header = bus_columns();
        for (name, unit) in quantities {
            header.push(format!("{name}_mag ({unit})"));
            header.push(format!("{name}_ang"));
        }
        header
    }

    fn values(&self) -> Vec<String> {
        let mut values = vec![
            self.description.clone(),
            self.bus.id.to_string(),
            self.bus.name.clone(),
            format!("{:.2}", self.bus.nominal_kv.value()),
        ];
        push_phasors(&mut values, &self.voltages);
        push_phasors(&mut values, &self.currents);
        values
    }
}

impl ReportRow for SteppedEventResult {
    fn header(&self) -> Vec<String> {
        let mut header = bus_columns();
        header.extend(
            [
                "Max OpTime (s)",
                "Fault Cleared",
                "Initial Current (A)",
                "Final Current (A)",
                "Note",
            ]
            .map(String::from),
        );
        header
    }

    fn values(&self) -> Vec<String> {
        vec![
            format!("{:?}", self.fault_description()),
            self.bus.id.to_string(),
            self.bus.name.clone(),
            format!("{:.2}", self.bus.nominal_kv.value()),
            format!("{:.2}", self.max_time.value()),
            self.cleared.to_string(),
            format!("{:.2}", self.current_init.value()),
            format!("{:.2}", self.current_final.value()),
            self.note.map(|n| n.as_str()).unwrap_or_default().to_string(),
        ]
    }
}
