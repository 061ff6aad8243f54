// Copyright (C) 2015-2025 The Logscan Project.
//
// rpc_response.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;
use serde_json::Value;

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Response ID
    #[serde(default)]
    pub id: Value,

    /// JSON-RPC version
    #[serde(rename = "jsonrpc", default)]
    pub json_rpc: String,

    /// Result payload; `null` and absent are both `None`
    #[serde(default)]
    pub result: Option<Value>,

    /// Error payload
    #[serde(default)]
    pub error: Option<RpcResponseError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcResponseError {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,

    /// Optional error data
    #[serde(default)]
    pub data: Option<Value>,
}
