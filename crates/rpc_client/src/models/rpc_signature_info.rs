// Copyright (C) 2015-2025 The Logscan Project.
//
// rpc_signature_info.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;
use serde_json::Value;

/// Entry returned by `getSignaturesForAddress`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcSignatureInfo {
    /// Transaction signature
    pub signature: String,

    /// Slot containing the transaction
    pub slot: u64,

    /// Execution error, `null` on success
    #[serde(default)]
    pub err: Option<Value>,

    /// Memo attached to the transaction
    #[serde(default)]
    pub memo: Option<String>,

    /// Estimated production time
    #[serde(default)]
    pub block_time: Option<i64>,

    /// Cluster confirmation status
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

/// A candidate signature produced by a history listing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureInfo {
    /// Transaction signature
    pub signature: String,
    /// Slot containing the transaction
    pub slot: u64,
    /// Estimated production time
    pub block_time: Option<i64>,
    /// Whether execution failed
    pub failed: bool,
}

impl SignatureInfo {
    /// Creates an entry with only a signature, for callers that know nothing else.
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            slot: 0,
            block_time: None,
            failed: false,
        }
    }
}

impl From<RpcSignatureInfo> for SignatureInfo {
    fn from(info: RpcSignatureInfo) -> Self {
        Self {
            signature: info.signature,
            slot: info.slot,
            block_time: info.block_time,
            failed: info.err.is_some(),
        }
    }
}
