// Copyright (C) 2015-2025 The Logscan Project.
//
// gateway.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The four ledger operations the harvester depends on.

use crate::models::{BlockSample, SignatureInfo, TransactionRecord};
use crate::RpcResult;
use async_trait::async_trait;
use std::sync::Arc;

/// How much of a block to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockDetail {
    /// Timestamp only; cheap probe used during the binary search.
    Header,
    /// Timestamp plus the block's transaction signatures.
    Signatures,
}

impl BlockDetail {
    /// Value of the `transactionDetails` request option.
    pub fn as_param(&self) -> &'static str {
        match self {
            BlockDetail::Header => "none",
            BlockDetail::Signatures => "signatures",
        }
    }
}

/// Read-only access to a ledger node's history.
///
/// Not-found conditions (skipped, pruned or unknown) are reported as `Ok(None)`;
/// `Err` always means the round trip itself failed and may be retried.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Latest block index known to the node.
    async fn current_height(&self) -> RpcResult<u64>;

    /// Block at `index`, or `None` when the node does not have it.
    async fn block_at(&self, index: u64, detail: BlockDetail) -> RpcResult<Option<BlockSample>>;

    /// Transaction identified by `signature`, or `None` when unknown.
    async fn transaction(&self, signature: &str) -> RpcResult<Option<TransactionRecord>>;

    /// Signatures involving `account`, newest first, strictly older than `cursor`.
    async fn signatures_before(
        &self,
        account: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>>;
}

#[async_trait]
impl<T: LedgerGateway + ?Sized> LedgerGateway for Arc<T> {
    async fn current_height(&self) -> RpcResult<u64> {
        (**self).current_height().await
    }

    async fn block_at(&self, index: u64, detail: BlockDetail) -> RpcResult<Option<BlockSample>> {
        (**self).block_at(index, detail).await
    }

    async fn transaction(&self, signature: &str) -> RpcResult<Option<TransactionRecord>> {
        (**self).transaction(signature).await
    }

    async fn signatures_before(
        &self,
        account: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>> {
        (**self).signatures_before(account, cursor, limit).await
    }
}
