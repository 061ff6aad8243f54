// Copyright (C) 2015-2025 The Logscan Project.
//
// rpc_block.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;

/// Block as returned by `getBlock`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    /// Estimated production time, seconds since the epoch
    #[serde(default)]
    pub block_time: Option<i64>,

    /// Number of blocks beneath this block
    #[serde(default)]
    pub block_height: Option<u64>,

    /// Block hash
    #[serde(default)]
    pub blockhash: String,

    /// Index of the parent block
    #[serde(default)]
    pub parent_slot: u64,

    /// Transaction signatures, present when requested
    #[serde(default)]
    pub signatures: Option<Vec<String>>,
}

/// A block observed at a given index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSample {
    /// Block index (slot)
    pub index: u64,
    /// Block timestamp, absent when the node has no estimate
    pub timestamp: Option<i64>,
    /// Transaction signatures in block order; empty for header-only fetches
    pub signatures: Vec<String>,
}

impl RpcBlock {
    /// Converts the wire model into a sample at `index`.
    pub fn into_sample(self, index: u64) -> BlockSample {
        BlockSample {
            index,
            timestamp: self.block_time,
            signatures: self.signatures.unwrap_or_default(),
        }
    }
}

impl BlockSample {
    /// Signature of the first transaction in the block.
    pub fn first_signature(&self) -> Option<&str> {
        self.signatures.first().map(String::as_str)
    }
}
