//! Reading harvested reports and writing event reports.

use crate::decimal::ScaledDecimal;
use crate::decoder::{DecodedEvent, EventDecoder};
use crate::{DecodeError, DecodeResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

/// Default `value` field holding a `{ mantissa, scale }` object.
pub const DEFAULT_VALUE_FIELD: &str = "value";
/// Default field holding the event's unix timestamp.
pub const DEFAULT_TIMESTAMP_FIELD: &str = "timestamp";

/// Signature and payload taken from one harvested report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEntry<'a> {
    /// Transaction signature
    pub signature: &'a str,
    /// Last token of the line
    pub payload: &'a str,
}

/// Splits a report line into its signature and payload.
///
/// The two last whitespace-separated tokens are used; the colon that
/// follows the signature in the report format is dropped.
pub fn parse_report_line(line: &str) -> Option<ReportEntry<'_>> {
    let mut tokens = line.split_whitespace().rev();
    let payload = tokens.next()?;
    let signature = tokens.next()?.trim_end_matches(':');
    if signature.is_empty() {
        return None;
    }
    Some(ReportEntry { signature, payload })
}

/// Formats epoch seconds as `Tue, 14 Nov 2023 22:13:20 GMT`.
pub fn utc_string(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        None => format!("invalid-time:{timestamp}"),
    }
}

/// `<UTC time> - <signature> <value>`.
pub fn render_event_line(timestamp: i64, signature: &str, value: &str) -> String {
    format!("{} - {} {}", utc_string(timestamp), signature, value)
}

/// Which events to keep and where their values live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventReportOptions {
    /// Event name to keep
    pub event_name: String,
    /// Field rendered as a scaled decimal
    pub value_field: String,
    /// Field holding the unix timestamp
    pub timestamp_field: String,
}

impl EventReportOptions {
    /// Options for `event_name` with the default field names.
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
        }
    }
}

/// Result of [`build_event_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventReport {
    /// Rendered lines, in input order
    pub lines: Vec<String>,
    /// Input lines read
    pub scanned: usize,
    /// Lines that decoded to some event
    pub decoded: usize,
    /// Lines that looked like events but could not be rendered
    pub failed: usize,
}

impl EventReport {
    /// Newline-separated report text.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Decodes every line of a harvested report and renders the matching events.
///
/// Lines the decoder does not recognise are skipped; lines that decode but
/// cannot be rendered are logged and counted as failed.
pub fn build_event_report(
    input: &str,
    decoder: &dyn EventDecoder,
    options: &EventReportOptions,
) -> EventReport {
    let mut report = EventReport::default();
    for line in input.lines() {
        report.scanned += 1;
        let Some(entry) = parse_report_line(line) else {
            continue;
        };
        let event = match decoder.decode(entry.payload) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) => {
                warn!(target: "logscan", signature = entry.signature, error = %err, "undecodable event");
                report.failed += 1;
                continue;
            }
        };
        report.decoded += 1;
        if event.name != options.event_name {
            continue;
        }
        match render_event(&event, entry.signature, options) {
            Ok(rendered) => {
                debug!(target: "logscan", "{rendered}");
                report.lines.push(rendered);
            }
            Err(err) => {
                warn!(target: "logscan", signature = entry.signature, error = %err, "cannot render event");
                report.failed += 1;
            }
        }
    }
    report
}

/// Renders one event; events without the value field render their data as JSON.
pub fn render_event(
    event: &DecodedEvent,
    signature: &str,
    options: &EventReportOptions,
) -> DecodeResult<String> {
    let timestamp = event
        .field(&options.timestamp_field)
        .and_then(timestamp_of)
        .ok_or_else(|| DecodeError::missing_field(options.timestamp_field.as_str()))?;
    let value = match event.field(&options.value_field) {
        Some(value) => ScaledDecimal::from_value(value)?.to_string(),
        None => Value::Object(event.data.clone()).to_string(),
    };
    Ok(render_event_line(timestamp, signature, &value))
}

fn timestamp_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::tests::{heartbeat, value_update, IDL};
    use crate::idl::Idl;
    use crate::IdlEventDecoder;

    #[test]
    fn parses_last_two_tokens() {
        let entry = parse_report_line("1500 (1970-01-01T00:25:00.000Z) sig1: AAAA").unwrap();
        assert_eq!(entry.signature, "sig1");
        assert_eq!(entry.payload, "AAAA");
        assert!(parse_report_line("single").is_none());
        assert!(parse_report_line("").is_none());
    }

    #[test]
    fn formats_utc_string() {
        assert_eq!(utc_string(0), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(utc_string(1_700_000_000), "Tue, 14 Nov 2023 22:13:20 GMT");
        assert_eq!(
            render_event_line(0, "sig", "1.5"),
            "Thu, 01 Jan 1970 00:00:00 GMT - sig 1.5"
        );
    }

    #[test]
    fn builds_report_for_named_event() {
        let decoder = IdlEventDecoder::new(Idl::from_json(IDL).unwrap()).unwrap();
        let input = [
            format!("1700000000 (2023-11-14T22:13:20.000Z) sigA: {}", value_update(1_234_500, 4, 1_700_000_000)),
            "1700000001 (2023-11-14T22:13:21.000Z) sigB: Instruction: Update".to_string(),
            format!("1700000002 (2023-11-14T22:13:22.000Z) sigC: {}", heartbeat(1)),
            format!("1700000003 (2023-11-14T22:13:23.000Z) sigD: {}", value_update(-5, 3, 1_700_000_003)),
        ]
        .join("\n");

        let report = build_event_report(&input, &decoder, &EventReportOptions::new("ValueUpdate"));
        assert_eq!(report.scanned, 4);
        assert_eq!(report.decoded, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(
            report.render(),
            "Tue, 14 Nov 2023 22:13:20 GMT - sigA 123.45\n\
             Tue, 14 Nov 2023 22:13:23 GMT - sigD -0.005"
        );
    }

    #[test]
    fn events_without_value_render_as_json() {
        let event = DecodedEvent {
            name: "Heartbeat".to_string(),
            data: serde_json::json!({ "seq": 3, "timestamp": 60 })
                .as_object()
                .cloned()
                .unwrap(),
        };
        let line = render_event(&event, "sig", &EventReportOptions::new("Heartbeat")).unwrap();
        assert_eq!(line, r#"Thu, 01 Jan 1970 00:01:00 GMT - sig {"seq":3,"timestamp":60}"#);
    }

    #[test]
    fn missing_timestamp_counts_as_failure() {
        let decoder = IdlEventDecoder::new(Idl::from_json(IDL).unwrap()).unwrap();
        let input = format!("1 (x) sig: {}", heartbeat(2));
        let report = build_event_report(&input, &decoder, &EventReportOptions::new("Heartbeat"));
        assert_eq!(report.decoded, 1);
        assert_eq!(report.failed, 1);
        assert!(report.lines.is_empty());
    }
}
