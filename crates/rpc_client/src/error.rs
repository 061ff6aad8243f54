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

//! Error types for RPC operations.

use thiserror::Error;

/// Block is not available on this node.
pub const BLOCK_NOT_AVAILABLE: i64 = -32004;
/// Block was cleaned up from the node's ledger.
pub const BLOCK_CLEANED_UP: i64 = -32001;
/// Slot was skipped, or is missing due to a ledger jump.
pub const SLOT_SKIPPED: i64 = -32007;
/// Slot is missing from long-term storage.
pub const LONG_TERM_STORAGE_SLOT_SKIPPED: i64 = -32009;

/// Errors that can occur during RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The HTTP round trip failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// Request failed before a response was obtained.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Error message.
        message: String,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RpcError {
    /// Create a request failed error.
    pub fn request_failed<S: Into<String>>(message: S) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create an error from a JSON-RPC error object.
    pub fn rpc<S: Into<String>>(code: i64, message: S) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// JSON-RPC error code, when the node returned one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the node reported the requested data as pruned, skipped or absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code(),
            Some(BLOCK_NOT_AVAILABLE | BLOCK_CLEANED_UP | SLOT_SKIPPED | LONG_TERM_STORAGE_SLOT_SKIPPED)
        )
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = std::result::Result<T, RpcError>;
