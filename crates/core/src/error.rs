// Copyright (C) 2015-2025 The Logscan Project.
//
// error.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error types for harvesting operations.

use logscan_rpc_client::RpcError;
use thiserror::Error;

/// Errors that end a harvest run.
///
/// Per-fetch and per-page failures are contained inside the run and never
/// surface here.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// The requested window is empty or inverted.
    #[error("invalid time window: start {start} must be before end {end}")]
    InvalidWindow {
        /// Window start, seconds since the epoch.
        start: i64,
        /// Window end, seconds since the epoch.
        end: i64,
    },

    /// No block could be sampled near the target timestamp.
    #[error("no block found near timestamp {target}")]
    BlockNotFound {
        /// Timestamp that was searched for.
        target: i64,
    },

    /// The located block carries no transactions to start paging from.
    #[error("block {index} contains no transactions")]
    EmptyBlock {
        /// Block index.
        index: u64,
    },

    /// Results were requested while fetches were still running.
    #[error("harvest still has {in_flight} fetches in flight")]
    Incomplete {
        /// Fetches still running.
        in_flight: usize,
    },

    /// Harvest or locator settings are unusable.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// An RPC call failed where no retry applies.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Result type for harvesting operations.
pub type HarvestResult<T> = std::result::Result<T, HarvestError>;
