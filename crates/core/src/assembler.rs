// Copyright (C) 2015-2025 The Logscan Project.
//
// assembler.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Turns the result store into the final chronological sequence.

use crate::record::{LogRecord, TimeWindow};
use crate::state::ResultStore;

/// Drains `store` into records sorted ascending by timestamp.
///
/// Equal timestamps are ordered by signature, then by emission order within
/// the transaction, so the output does not depend on fetch completion order.
pub fn assemble(store: ResultStore) -> Vec<LogRecord> {
    store.into_records().collect()
}

/// Drops records outside `window`.
pub fn clip_to_window(records: Vec<LogRecord>, window: TimeWindow) -> Vec<LogRecord> {
    records
        .into_iter()
        .filter(|record| window.contains(record.timestamp))
        .collect()
}
