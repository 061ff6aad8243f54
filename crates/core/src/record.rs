// Copyright (C) 2015-2025 The Logscan Project.
//
// record.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Harvested log records, the requested time window and report rendering.

use crate::{HarvestError, HarvestResult};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// One harvested, filtered log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    /// Block time, seconds since the epoch
    pub timestamp: i64,
    /// Signature of the transaction that emitted the line
    pub signature: String,
    /// Log text after prefix selection
    pub text: String,
}

impl LogRecord {
    /// Creates a new record.
    pub fn new(timestamp: i64, signature: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            signature: signature.into(),
            text: text.into(),
        }
    }

    /// ISO-8601 rendering of the block time with millisecond precision.
    pub fn iso_timestamp(&self) -> String {
        iso8601(self.timestamp)
    }
}

/// Renders `<unixBlockTime> (<ISO8601>) <signature>: <text>`.
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}: {}",
            self.timestamp,
            self.iso_timestamp(),
            self.signature,
            self.text
        )
    }
}

/// Formats epoch seconds as `2024-01-01T00:00:00.000Z`.
pub fn iso8601(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("invalid-time:{timestamp}"),
    }
}

/// Formats one report line.
pub fn format_record(record: &LogRecord) -> String {
    record.to_string()
}

/// Joins records into the newline-separated report format.
pub fn render_report(records: &[LogRecord]) -> String {
    records
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Harvest window `[start, end]` in epoch seconds, bounds included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Oldest block time of interest
    pub start: i64,
    /// Newest block time of interest; the locator searches for this one
    pub end: i64,
}

impl TimeWindow {
    /// Creates a window, rejecting `start >= end`.
    pub fn new(start: i64, end: i64) -> HarvestResult<Self> {
        if start >= end {
            return Err(HarvestError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the `span_secs` seconds before `now`.
    pub fn trailing(now: i64, span_secs: i64) -> HarvestResult<Self> {
        Self::new(now.saturating_sub(span_secs), now)
    }

    /// Whether `timestamp` lies inside the window, bounds included.
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}
