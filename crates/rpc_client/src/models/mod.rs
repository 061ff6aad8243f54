// Copyright (C) 2015-2025 The Logscan Project.
//
// mod.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Request, response and result models for the ledger JSON-RPC surface.

mod rpc_block;
mod rpc_request;
mod rpc_response;
mod rpc_signature_info;
mod rpc_transaction;

pub use rpc_block::{BlockSample, RpcBlock};
pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcResponse, RpcResponseError};
pub use rpc_signature_info::{RpcSignatureInfo, SignatureInfo};
pub use rpc_transaction::{RpcTransaction, RpcTransactionMeta, TransactionRecord};
