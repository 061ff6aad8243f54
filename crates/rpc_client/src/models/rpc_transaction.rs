// Copyright (C) 2015-2025 The Logscan Project.
//
// rpc_transaction.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;
use serde_json::Value;

/// Transaction status metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionMeta {
    /// Execution error, `null` on success
    #[serde(default)]
    pub err: Option<Value>,

    /// Program log output
    #[serde(default)]
    pub log_messages: Option<Vec<String>>,
}

/// Transaction as returned by `getTransaction`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    /// Slot the transaction was processed in
    pub slot: u64,

    /// Estimated production time of that slot
    #[serde(default)]
    pub block_time: Option<i64>,

    /// Status metadata
    #[serde(default)]
    pub meta: Option<RpcTransactionMeta>,
}

/// A fetched transaction reduced to what the harvester needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction signature
    pub signature: String,
    /// Slot the transaction was processed in
    pub slot: u64,
    /// Block time, seconds since the epoch
    pub block_time: Option<i64>,
    /// Log lines in emission order
    pub log_messages: Vec<String>,
    /// Whether execution failed
    pub failed: bool,
}

impl RpcTransaction {
    /// Converts the wire model into a record for `signature`.
    pub fn into_record(self, signature: impl Into<String>) -> TransactionRecord {
        let meta = self.meta.unwrap_or_default();
        TransactionRecord {
            signature: signature.into(),
            slot: self.slot,
            block_time: self.block_time,
            failed: meta.err.is_some(),
            log_messages: meta.log_messages.unwrap_or_default(),
        }
    }
}
