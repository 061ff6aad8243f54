//! `logscan decode`

use crate::args::DecodeArgs;
use crate::output::write_report;
use anyhow::{Context, Result};
use logscan_decoder::{build_event_report, EventReport, EventReportOptions, Idl, IdlEventDecoder};
use tracing::info;

/// Decodes a harvested report and writes the event report.
pub fn execute(args: &DecodeArgs) -> Result<EventReport> {
    let idl = Idl::from_file(&args.idl).context("failed to load IDL")?;
    let decoder = IdlEventDecoder::new(idl).context("failed to prepare decoder")?;
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let options = EventReportOptions {
        event_name: args.event_name.clone(),
        value_field: args.value_field.clone(),
        timestamp_field: args.timestamp_field.clone(),
    };
    let report = build_event_report(&input, &decoder, &options);
    write_report(Some(&args.output), &report.render())?;

    info!(
        target: "logscan",
        scanned = report.scanned,
        decoded = report.decoded,
        matched = report.lines.len(),
        failed = report.failed,
        output = %args.output.display(),
        "decode complete"
    );
    Ok(report)
}
