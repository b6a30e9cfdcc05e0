use anyhow::Result;
use sca_algo::{BusFaultStudy, BusSelector};
use sca_cli::cli::BusFaultArgs;
use sca_cli::config::ScaConfig;
use sca_core::{canonicalize_all, Ohms, Representation, ScaError};
use tracing::info;

use super::util;

pub fn handle(args: &BusFaultArgs, config: &ScaConfig) -> Result<()> {
    let path = util::input_case(args.case.file.as_deref())?;
    if args.conn.is_empty() {
        return Err(ScaError::Config(
            "must provide at least one fault connection using --conn or -c".into(),
        )
        .into());
    }
    let connections = canonicalize_all(&args.conn)?;
    let selector = BusSelector::compile(&args.filter.to_spec())?;
    let representation = if args.seq {
        Representation::Sequence
    } else {
        Representation::Phase
    };
    let study = BusFaultStudy::new(selector, connections)?
        .with_impedance(
            Ohms(args.impedance.resistance),
            Ohms(args.impedance.reactance),
        )?
        .with_representation(representation);

    let rows = {
        let mut session = util::open_case(path)?;
        study.run(session.engine())?
    };
    info!(
        rows = rows.len(),
        representation = ?study.representation(),
        "bus fault study finished"
    );

    util::write_report(&rows, &args.output, config)
}
