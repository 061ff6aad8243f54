// Copyright (C) 2015-2025 The Logscan Project.
//
// locator.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Timestamp to block resolution.
//!
//! The locator runs a binary search over block indexes using cheap header
//! probes, then fetches the final block with its signatures. Probes that
//! fail or come back without a block time are nudged backward by a random
//! amount and retried, so a run of skipped slots cannot pin the search.

use crate::{HarvestError, HarvestResult};
use logscan_config::{
    LocatorConfig, DEFAULT_COARSE_THRESHOLD, DEFAULT_JITTER_SPAN, DEFAULT_LOCATOR_BACKOFF_MS,
    DEFAULT_MAX_SAMPLE_ATTEMPTS,
};
use logscan_rpc_client::{BlockDetail, BlockSample, LedgerGateway};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tuning knobs for [`BlockTimeLocator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorSettings {
    /// Range width at which the binary search stops narrowing
    pub coarse_threshold: u64,
    /// Upper bound of the random backward step applied after a failed probe
    pub jitter_span: u64,
    /// Probes allowed per sample before giving up
    pub max_sample_attempts: u32,
    /// Pause between probes of the same sample
    pub retry_backoff: Duration,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            coarse_threshold: DEFAULT_COARSE_THRESHOLD,
            jitter_span: DEFAULT_JITTER_SPAN,
            max_sample_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_LOCATOR_BACKOFF_MS),
        }
    }
}

impl From<&LocatorConfig> for LocatorSettings {
    fn from(config: &LocatorConfig) -> Self {
        Self {
            coarse_threshold: config.coarse_threshold,
            jitter_span: config.jitter_span,
            max_sample_attempts: config.max_sample_attempts,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

impl LocatorSettings {
    /// Rejects settings the search cannot run with.
    pub fn validate(&self) -> HarvestResult<()> {
        if self.jitter_span == 0 {
            return Err(HarvestError::InvalidSettings(
                "locator jitter span must be at least 1".to_string(),
            ));
        }
        if self.max_sample_attempts == 0 {
            return Err(HarvestError::InvalidSettings(
                "locator needs at least one sample attempt".to_string(),
            ));
        }
        Ok(())
    }
}

/// Block chosen as the starting point of a harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedBlock {
    /// Block index
    pub index: u64,
    /// Block time, when the node reported one
    pub timestamp: Option<i64>,
    /// First transaction signature in the block
    pub signature: String,
}

/// Finds the block nearest a target timestamp.
#[derive(Debug, Clone)]
pub struct BlockTimeLocator<G> {
    gateway: G,
    settings: LocatorSettings,
}

impl<G: LedgerGateway> BlockTimeLocator<G> {
    /// Creates a locator over `gateway`.
    pub fn new(gateway: G, settings: LocatorSettings) -> Self {
        Self { gateway, settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    /// Resolves `target` to a block and the first signature in it.
    ///
    /// The returned block is the last probe of the search, which sits at or
    /// just past the first block whose time reaches `target`. Targets outside
    /// the ledger's range degenerate to genesis or the current height.
    pub async fn locate(&self, target: i64) -> HarvestResult<LocatedBlock> {
        let height = self.current_height().await?;
        let (mut min, mut max) = (0u64, height);
        let mut last_probe = None;
        let mut stalled = 0u32;

        debug!(target: "logscan", height, target_time = target, "searching for block");

        while max - min > self.settings.coarse_threshold {
            let mid = min + (max - min) / 2;
            let (index, timestamp) = self.sample_timestamp(mid, min, target).await?;
            let bounds = (min, max);

            if timestamp >= target {
                max = index;
            } else {
                min = index;
            }
            last_probe = Some(index);

            if (min, max) == bounds {
                stalled += 1;
                if stalled > self.settings.max_sample_attempts {
                    warn!(target: "logscan", min, max, "block search stopped making progress");
                    return Err(HarvestError::BlockNotFound { target });
                }
            } else {
                stalled = 0;
            }
        }

        let block = self.sample_block(last_probe.unwrap_or(max), target).await?;
        let signature = block
            .first_signature()
            .ok_or(HarvestError::EmptyBlock { index: block.index })?
            .to_string();

        info!(
            target: "logscan",
            index = block.index,
            block_time = ?block.timestamp,
            signature = %signature,
            "located starting block"
        );

        Ok(LocatedBlock {
            index: block.index,
            timestamp: block.timestamp,
            signature,
        })
    }

    async fn current_height(&self) -> HarvestResult<u64> {
        let mut attempt = 1;
        loop {
            match self.gateway.current_height().await {
                Ok(height) => return Ok(height),
                Err(err) if attempt >= self.settings.max_sample_attempts => {
                    return Err(err.into());
                }
                Err(err) => {
                    warn!(target: "logscan", attempt, error = %err, "failed to read current height");
                    attempt += 1;
                    tokio::time::sleep(self.settings.retry_backoff).await;
                }
            }
        }
    }

    /// Header probe near `index`; only a sample carrying a block time counts.
    async fn sample_timestamp(&self, index: u64, floor: u64, target: i64) -> HarvestResult<(u64, i64)> {
        let mut probe = index;
        for attempt in 1..=self.settings.max_sample_attempts {
            match self.gateway.block_at(probe, BlockDetail::Header).await {
                Ok(Some(BlockSample {
                    timestamp: Some(timestamp),
                    ..
                })) => {
                    debug!(target: "logscan", index = probe, block_time = timestamp, "sampled block");
                    return Ok((probe, timestamp));
                }
                Ok(_) => {
                    debug!(target: "logscan", index = probe, attempt, "block unavailable");
                }
                Err(err) => {
                    warn!(target: "logscan", index = probe, attempt, error = %err, "block probe failed");
                }
            }
            probe = jitter(probe, floor, self.settings.jitter_span);
            tokio::time::sleep(self.settings.retry_backoff).await;
        }
        Err(HarvestError::BlockNotFound { target })
    }

    /// Full fetch near `index` returning the block with its signatures.
    async fn sample_block(&self, index: u64, target: i64) -> HarvestResult<BlockSample> {
        let mut probe = index;
        for attempt in 1..=self.settings.max_sample_attempts {
            match self.gateway.block_at(probe, BlockDetail::Signatures).await {
                Ok(Some(block)) => return Ok(block),
                Ok(None) => {
                    debug!(target: "logscan", index = probe, attempt, "block unavailable");
                }
                Err(err) => {
                    warn!(target: "logscan", index = probe, attempt, error = %err, "block fetch failed");
                }
            }
            probe = jitter(probe, 0, self.settings.jitter_span);
            tokio::time::sleep(self.settings.retry_backoff).await;
        }
        Err(HarvestError::BlockNotFound { target })
    }
}

/// Steps `index` back by a random amount in `1..=span`, never below `floor`.
fn jitter(index: u64, floor: u64, span: u64) -> u64 {
    let step = rand::thread_rng().gen_range(1..=span.max(1));
    index.saturating_sub(step).max(floor)
}
