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

//! HTTP JSON-RPC client for the ledger node.

mod builder;
mod client;

pub use builder::RpcClientBuilder;

use reqwest::{Client, Url};
use std::sync::atomic::AtomicU64;
use std::time::Duration;

/// Default timeout applied to every HTTP request.
pub(crate) const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The RPC client used to query ledger history
#[derive(Debug)]
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    commitment: String,
    request_timeout: Duration,
    next_id: AtomicU64,
}
