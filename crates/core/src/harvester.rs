// Copyright (C) 2015-2025 The Logscan Project.
//
// harvester.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Concurrent transaction fetching and log extraction.

use crate::filter::LogFilter;
use crate::record::LogRecord;
use crate::state::HarvestContext;
use crate::walker::SignatureWalker;
use crate::{HarvestError, HarvestResult};
use logscan_config::{
    HarvestConfig, DEFAULT_FETCH_BACKOFF_MS, DEFAULT_MAX_CONCURRENCY, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
use logscan_rpc_client::{LedgerGateway, TransactionRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Tuning knobs for [`Harvester`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    /// Signatures requested per page
    pub page_limit: usize,
    /// Transaction fetches allowed to run at once
    pub max_concurrency: usize,
    /// Pause before retrying a failed transaction fetch
    pub retry_backoff: Duration,
    /// Line selection applied to every transaction
    pub filter: LogFilter,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            retry_backoff: Duration::from_millis(DEFAULT_FETCH_BACKOFF_MS),
            filter: LogFilter::any(),
        }
    }
}

impl HarvestSettings {
    /// Builds settings from the `[harvest]` section and a substring filter.
    pub fn from_config(config: &HarvestConfig, needle: impl Into<String>) -> Self {
        Self {
            page_limit: config.page_limit,
            max_concurrency: config.max_concurrency,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            filter: LogFilter::new(config.log_kind, needle),
        }
    }

    /// Rejects settings the harvester cannot run with.
    pub fn validate(&self) -> HarvestResult<()> {
        if self.page_limit == 0 || self.page_limit > MAX_PAGE_LIMIT {
            return Err(HarvestError::InvalidSettings(format!(
                "page limit must be between 1 and {MAX_PAGE_LIMIT}, got {}",
                self.page_limit
            )));
        }
        if self.max_concurrency == 0 {
            return Err(HarvestError::InvalidSettings(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How a single transaction fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The transaction was fetched; `lines` records were stored.
    Harvested {
        /// Records stored for the transaction
        lines: usize,
    },
    /// The node does not have the transaction, or it carries no block time.
    Missing,
    /// The stop token fired before the fetch could start or restart.
    Abandoned,
}

/// Counters describing one harvest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestStats {
    /// Signature pages requested
    pub pages: usize,
    /// Fetch tasks spawned
    pub spawned: usize,
    /// Fetches that returned a transaction
    pub harvested: usize,
    /// Fetches for transactions the node did not return
    pub missing: usize,
    /// Fetches dropped because of the stop token
    pub abandoned: usize,
    /// Signatures skipped because they were already claimed
    pub duplicates: usize,
    /// Records stored
    pub records: usize,
}

impl HarvestStats {
    fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Harvested { .. } => self.harvested += 1,
            FetchOutcome::Missing => self.missing += 1,
            FetchOutcome::Abandoned => self.abandoned += 1,
        }
    }
}

/// Selected log text of `transaction`, in emission order.
pub fn filter_logs<'a>(filter: &LogFilter, transaction: &'a TransactionRecord) -> Vec<&'a str> {
    filter.select(&transaction.log_messages)
}

/// Walks an account's history and fetches its transactions concurrently.
pub struct Harvester<G> {
    gateway: Arc<G>,
    settings: HarvestSettings,
    ctx: Arc<HarvestContext>,
}

impl<G> Harvester<G>
where
    G: LedgerGateway + 'static,
{
    /// Creates a harvester sharing `ctx` with its fetch tasks.
    pub fn new(gateway: Arc<G>, settings: HarvestSettings, ctx: Arc<HarvestContext>) -> Self {
        Self {
            gateway,
            settings,
            ctx,
        }
    }

    /// Shared run state.
    pub fn context(&self) -> &Arc<HarvestContext> {
        &self.ctx
    }

    /// Harvests `account` backward from `start_signature` until a transaction
    /// older than `window_start` is seen or the history runs out.
    ///
    /// Returns once every spawned fetch has finished.
    pub async fn run(
        &self,
        account: &str,
        start_signature: &str,
        window_start: i64,
    ) -> HarvestResult<HarvestStats> {
        self.settings.validate()?;

        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency));
        let stop = self.ctx.stop_token();
        let mut walker = SignatureWalker::new(
            Arc::clone(&self.gateway),
            account,
            Some(start_signature.to_string()),
            self.settings.page_limit,
            stop.clone(),
        );
        let mut tasks = JoinSet::new();
        let mut stats = HarvestStats::default();

        'pages: while let Some(batch) = walker.next_batch().await {
            for info in batch {
                if self.ctx.is_stopped() {
                    break 'pages;
                }
                if !self.ctx.claim_signature(&info.signature) {
                    stats.duplicates += 1;
                    continue;
                }

                let permit = tokio::select! {
                    permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => break 'pages,
                    },
                    _ = stop.cancelled() => break 'pages,
                };

                let fetch = TransactionFetch {
                    gateway: Arc::clone(&self.gateway),
                    ctx: Arc::clone(&self.ctx),
                    filter: self.settings.filter.clone(),
                    retry_backoff: self.settings.retry_backoff,
                    window_start,
                    signature: info.signature,
                };
                tasks.spawn(async move {
                    let outcome = fetch.run().await;
                    drop(permit);
                    outcome
                });
                stats.spawned += 1;

                while let Some(done) = tasks.try_join_next() {
                    collect(&mut stats, done);
                }
            }
        }

        while let Some(done) = tasks.join_next().await {
            collect(&mut stats, done);
        }

        stats.pages = walker.pages_requested();
        stats.records = self.ctx.record_count();

        info!(
            target: "logscan",
            pages = stats.pages,
            fetched = stats.harvested,
            missing = stats.missing,
            abandoned = stats.abandoned,
            records = stats.records,
            "harvest finished"
        );
        Ok(stats)
    }
}

fn collect(stats: &mut HarvestStats, done: Result<FetchOutcome, tokio::task::JoinError>) {
    match done {
        Ok(outcome) => stats.record(outcome),
        Err(err) => {
            error!(target: "logscan", error = %err, "fetch task failed");
            stats.abandoned += 1;
        }
    }
}

/// One signature's fetch, retried until it succeeds or the run stops.
pub struct TransactionFetch<G> {
    gateway: Arc<G>,
    ctx: Arc<HarvestContext>,
    filter: LogFilter,
    retry_backoff: Duration,
    window_start: i64,
    signature: String,
}

impl<G: LedgerGateway> TransactionFetch<G> {
    /// Creates a fetch for `signature`.
    pub fn new(
        gateway: Arc<G>,
        ctx: Arc<HarvestContext>,
        settings: &HarvestSettings,
        window_start: i64,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            ctx,
            filter: settings.filter.clone(),
            retry_backoff: settings.retry_backoff,
            window_start,
            signature: signature.into(),
        }
    }

    /// Fetches the transaction and stores its selected lines.
    pub async fn run(self) -> FetchOutcome {
        let mut attempt = 0u32;
        loop {
            if self.ctx.is_stopped() {
                debug!(target: "logscan", signature = %self.signature, "fetch abandoned after stop");
                return FetchOutcome::Abandoned;
            }

            attempt += 1;
            let guard = self.ctx.begin_fetch();
            match self.gateway.transaction(&self.signature).await {
                Ok(Some(transaction)) => {
                    let outcome = self.absorb(transaction);
                    self.ctx.mark_started();
                    drop(guard);
                    return outcome;
                }
                Ok(None) => {
                    debug!(target: "logscan", signature = %self.signature, "transaction not found");
                    self.ctx.mark_started();
                    drop(guard);
                    return FetchOutcome::Missing;
                }
                Err(err) => {
                    drop(guard);
                    warn!(
                        target: "logscan",
                        signature = %self.signature,
                        attempt,
                        error = %err,
                        "transaction fetch failed, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                }
            }
        }
    }

    fn absorb(&self, transaction: TransactionRecord) -> FetchOutcome {
        let Some(block_time) = transaction.block_time else {
            debug!(target: "logscan", signature = %self.signature, "transaction has no block time");
            return FetchOutcome::Missing;
        };

        let records: Vec<LogRecord> = filter_logs(&self.filter, &transaction)
            .into_iter()
            .map(|text| LogRecord::new(block_time, self.signature.as_str(), text))
            .collect();
        for record in &records {
            debug!(target: "logscan", "{record}");
        }
        let lines = records.len();
        self.ctx.insert_batch(records);

        if block_time < self.window_start {
            if !self.ctx.is_stopped() {
                info!(
                    target: "logscan",
                    signature = %self.signature,
                    block_time,
                    window_start = self.window_start,
                    "crossed window start, stopping"
                );
            }
            self.ctx.request_stop();
        }

        FetchOutcome::Harvested { lines }
    }
}
