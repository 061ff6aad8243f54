// Copyright (C) 2015-2025 The Logscan Project.
//
// lib.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Logscan RPC Client Library
//!
//! This crate provides the JSON-RPC transport used to read historical blocks,
//! transactions and signature listings from a ledger node, and the
//! [`LedgerGateway`] trait the harvesting engine is written against.

mod error;
mod gateway;
pub mod models;
mod rpc_client;

pub use error::{RpcError, RpcResult};
pub use gateway::{BlockDetail, LedgerGateway};
pub use rpc_client::{RpcClient, RpcClientBuilder};

// Re-export commonly used types
pub use models::{
    BlockSample, RpcBlock, RpcRequest, RpcResponse, RpcResponseError, RpcSignatureInfo,
    RpcTransaction, SignatureInfo, TransactionRecord,
};
