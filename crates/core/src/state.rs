// Copyright (C) 2015-2025 The Logscan Project.
//
// state.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Per-run coordination state shared by every fetch task.

use crate::record::LogRecord;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

/// Timestamp-ordered result store.
///
/// Records are grouped by `(timestamp, signature)`; each group keeps the
/// order in which its transaction emitted the lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    entries: BTreeMap<(i64, String), Vec<LogRecord>>,
    len: usize,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one record.
    pub fn insert(&mut self, record: LogRecord) {
        self.entries
            .entry((record.timestamp, record.signature.clone()))
            .or_default()
            .push(record);
        self.len += 1;
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes the store, yielding records in ascending timestamp order.
    pub fn into_records(self) -> impl Iterator<Item = LogRecord> {
        self.entries.into_values().flatten()
    }
}

/// Coordination state for one harvest run.
///
/// The stop token is set once and never cleared; the in-flight counter is
/// only changed through [`FetchGuard`].
#[derive(Debug)]
pub struct HarvestContext {
    stop: CancellationToken,
    in_flight: AtomicUsize,
    started: AtomicBool,
    store: Mutex<ResultStore>,
    seen: Mutex<HashSet<String>>,
}

impl Default for HarvestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl HarvestContext {
    /// Creates a fresh context with its own stop token.
    pub fn new() -> Self {
        Self::with_stop_token(CancellationToken::new())
    }

    /// Creates a context driven by an existing token, e.g. one tied to Ctrl+C.
    pub fn with_stop_token(stop: CancellationToken) -> Self {
        Self {
            stop,
            in_flight: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            store: Mutex::new(ResultStore::new()),
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Asks every participant to stop issuing new work.
    pub fn request_stop(&self) {
        self.stop.cancel();
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }

    /// Clone of the stop token.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Fetches currently waiting on the node.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether any fetch has completed.
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// `started && in_flight == 0`.
    pub fn is_quiescent(&self) -> bool {
        self.has_started() && self.in_flight() == 0
    }

    /// Registers a fetch attempt; the count drops when the guard does.
    pub fn begin_fetch(&self) -> FetchGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        FetchGuard { ctx: self }
    }

    pub(crate) fn mark_started(&self) {
        self.started.store(true, Ordering::Release);
    }

    /// Returns `true` the first time `signature` is seen in this run.
    pub fn claim_signature(&self, signature: &str) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(signature) {
            return false;
        }
        seen.insert(signature.to_string());
        true
    }

    /// Inserts one transaction's records under a single lock.
    pub fn insert_batch(&self, records: impl IntoIterator<Item = LogRecord>) {
        let mut store = self.store.lock();
        for record in records {
            store.insert(record);
        }
    }

    /// Records stored so far.
    pub fn record_count(&self) -> usize {
        self.store.lock().len()
    }

    /// Takes the store, or `None` while any fetch is still running.
    pub fn take_results(&self) -> Option<ResultStore> {
        if self.in_flight() != 0 {
            return None;
        }
        Some(std::mem::take(&mut *self.store.lock()))
    }
}

/// Keeps a fetch counted as in flight while alive.
#[derive(Debug)]
pub struct FetchGuard<'a> {
    ctx: &'a HarvestContext,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.ctx.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
