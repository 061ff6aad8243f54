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

//! In-memory ledger used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use logscan_core::{HarvestSettings, LocatorSettings, LogFilter};
use logscan_rpc_client::{
    BlockDetail, BlockSample, LedgerGateway, RpcError, RpcResult, SignatureInfo,
    TransactionRecord,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
struct MockBlock {
    timestamp: Option<i64>,
    signatures: Vec<String>,
}

#[derive(Debug, Clone)]
struct MockTx {
    record: TransactionRecord,
    account: String,
    ordinal: usize,
}

/// Ledger with scripted blocks, transactions and failures.
#[derive(Debug, Default)]
pub struct MockLedger {
    blocks: BTreeMap<u64, MockBlock>,
    height: u64,
    transactions: HashMap<String, MockTx>,
    extra_history: Vec<(String, String)>,
    failing_blocks: HashSet<u64>,
    failing_cursors: HashSet<String>,
    forgotten: HashSet<String>,
    tx_failures: Mutex<HashMap<String, usize>>,
    tx_delays: HashMap<String, Duration>,
    default_tx_delay: Duration,

    pub block_calls: AtomicUsize,
    pub tx_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    active_fetches: AtomicUsize,
    pub peak_fetches: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger of `count` blocks with block time `base + step * index` and one
    /// unrelated transaction per block.
    pub fn linear(count: u64, base: i64, step: i64) -> Self {
        let mut ledger = Self::new();
        for index in 0..count {
            ledger.push_block(index, Some(base + step * index as i64));
        }
        ledger
    }

    /// Adds a block with a single filler transaction from another account.
    pub fn push_block(&mut self, index: u64, timestamp: Option<i64>) {
        let filler = format!("filler-{index}");
        self.blocks.insert(
            index,
            MockBlock {
                timestamp,
                signatures: Vec::new(),
            },
        );
        self.height = self.height.max(index);
        self.add_transaction(index, &filler, "OTHER", &[]);
    }

    /// Adds a block that carries no transactions.
    pub fn push_empty_block(&mut self, index: u64, timestamp: Option<i64>) {
        self.blocks.insert(
            index,
            MockBlock {
                timestamp,
                signatures: Vec::new(),
            },
        );
        self.height = self.height.max(index);
    }

    /// Adds a transaction for `account` to an existing block.
    pub fn add_transaction(&mut self, index: u64, signature: &str, account: &str, logs: &[&str]) {
        let block = self.blocks.entry(index).or_insert(MockBlock {
            timestamp: None,
            signatures: Vec::new(),
        });
        block.signatures.push(signature.to_string());
        let position = block.signatures.len() - 1;
        let block_time = block.timestamp;
        let record = TransactionRecord {
            signature: signature.to_string(),
            slot: index,
            block_time,
            log_messages: logs.iter().map(|line| line.to_string()).collect(),
            failed: false,
        };
        self.transactions.insert(
            signature.to_string(),
            MockTx {
                record,
                account: account.to_string(),
                ordinal: ordinal_for(index, position),
            },
        );
    }

    /// Lists `signature` a second time in `account`'s history.
    pub fn duplicate_in_history(&mut self, account: &str, signature: &str) {
        self.extra_history
            .push((account.to_string(), signature.to_string()));
    }

    /// Block probes at `index` fail with a transport error.
    pub fn fail_block(&mut self, index: u64) {
        self.failing_blocks.insert(index);
    }

    /// Page requests using `cursor` fail.
    pub fn fail_page_at(&mut self, cursor: &str) {
        self.failing_cursors.insert(cursor.to_string());
    }

    /// The first `times` fetches of `signature` fail.
    pub fn fail_transaction(&mut self, signature: &str, times: usize) {
        self.tx_failures.lock().insert(signature.to_string(), times);
    }

    /// Makes the node forget `signature` while keeping it in history.
    pub fn forget_transaction(&mut self, signature: &str) {
        self.forgotten.insert(signature.to_string());
    }

    pub fn delay_transaction(&mut self, signature: &str, delay: Duration) {
        self.tx_delays.insert(signature.to_string(), delay);
    }

    pub fn set_default_delay(&mut self, delay: Duration) {
        self.default_tx_delay = delay;
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn history(&self, account: &str) -> Vec<(usize, String)> {
        let mut entries: Vec<(usize, String)> = self
            .transactions
            .values()
            .filter(|tx| tx.account == account)
            .map(|tx| (tx.ordinal, tx.record.signature.clone()))
            .collect();
        for (owner, signature) in &self.extra_history {
            if owner == account {
                if let Some(tx) = self.transactions.get(signature) {
                    entries.push((tx.ordinal, signature.clone()));
                }
            }
        }
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries
    }
}

#[async_trait]
impl LedgerGateway for MockLedger {
    async fn current_height(&self) -> RpcResult<u64> {
        Ok(self.height)
    }

    async fn block_at(&self, index: u64, detail: BlockDetail) -> RpcResult<Option<BlockSample>> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_blocks.contains(&index) {
            return Err(RpcError::request_failed(format!("block {index} unreachable")));
        }
        Ok(self.blocks.get(&index).map(|block| BlockSample {
            index,
            timestamp: block.timestamp,
            signatures: match detail {
                BlockDetail::Header => Vec::new(),
                BlockDetail::Signatures => block.signatures.clone(),
            },
        }))
    }

    async fn transaction(&self, signature: &str) -> RpcResult<Option<TransactionRecord>> {
        self.tx_calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_fetches.fetch_max(active, Ordering::SeqCst);

        let delay = self
            .tx_delays
            .get(signature)
            .copied()
            .unwrap_or(self.default_tx_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.active_fetches.fetch_sub(1, Ordering::SeqCst);

        {
            let mut failures = self.tx_failures.lock();
            if let Some(remaining) = failures.get_mut(signature) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(RpcError::request_failed("connection reset"));
                }
            }
        }

        Ok(self
            .transactions
            .get(signature)
            .filter(|_| !self.forgotten.contains(signature))
            .map(|tx| tx.record.clone()))
    }

    async fn signatures_before(
        &self,
        account: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(cursor) = cursor {
            if self.failing_cursors.contains(cursor) {
                return Err(RpcError::request_failed("page unavailable"));
            }
        }
        let bound = match cursor {
            Some(cursor) => match self.transactions.get(cursor) {
                Some(tx) => tx.ordinal,
                None => return Err(RpcError::rpc(-32602, "Invalid param: unknown signature")),
            },
            None => usize::MAX,
        };
        Ok(self
            .history(account)
            .into_iter()
            .filter(|(ordinal, _)| *ordinal < bound)
            .take(limit)
            .map(|(ordinal, signature)| SignatureInfo {
                block_time: self.transactions.get(&signature).and_then(|tx| tx.record.block_time),
                slot: (ordinal / 1_000) as u64,
                signature,
                failed: false,
            })
            .collect())
    }
}

fn ordinal_for(index: u64, position: usize) -> usize {
    (index as usize) * 1_000 + position
}

pub fn fast_locator() -> LocatorSettings {
    LocatorSettings {
        retry_backoff: Duration::ZERO,
        ..LocatorSettings::default()
    }
}

pub fn fast_harvest(filter: LogFilter) -> HarvestSettings {
    HarvestSettings {
        retry_backoff: Duration::from_millis(10),
        filter,
        ..HarvestSettings::default()
    }
}
