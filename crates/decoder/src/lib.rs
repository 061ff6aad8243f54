//! Event decoding for harvested `Program data:` lines.
//!
//! Payloads are base64 Borsh buffers prefixed with an 8-byte event
//! discriminator, described by an Anchor-style IDL. Decoded events can be
//! rendered as `<UTC time> - <signature> <value>` lines, where `value` is an
//! exact [`ScaledDecimal`].

mod borsh;
mod decimal;
mod decoder;
mod error;
pub mod idl;
pub mod report;

pub use borsh::BorshReader;
pub use decimal::ScaledDecimal;
pub use decoder::{DecodedEvent, EventDecoder, IdlEventDecoder};
pub use error::{DecodeError, DecodeResult};
pub use idl::{event_discriminator, Idl};
pub use report::{
    build_event_report, parse_report_line, render_event, render_event_line, EventReport,
    EventReportOptions, ReportEntry,
};
