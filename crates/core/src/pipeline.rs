// Copyright (C) 2015-2025 The Logscan Project.
//
// pipeline.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! End-to-end harvest of one account over one time window.

use crate::assembler::{assemble, clip_to_window};
use crate::harvester::{HarvestSettings, HarvestStats, Harvester};
use crate::locator::{BlockTimeLocator, LocatedBlock, LocatorSettings};
use crate::record::{render_report, LogRecord, TimeWindow};
use crate::state::HarvestContext;
use crate::{HarvestError, HarvestResult};
use logscan_rpc_client::LedgerGateway;
use std::sync::Arc;
use tracing::info;

/// What to harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestRequest {
    /// Account whose history is walked
    pub account: String,
    /// Time window of interest
    pub window: TimeWindow,
    /// Drop records outside the window after assembly
    pub clip_to_window: bool,
}

impl HarvestRequest {
    /// Creates an unclipped request.
    pub fn new(account: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            account: account.into(),
            window,
            clip_to_window: false,
        }
    }

    /// Enables or disables window clipping.
    pub fn with_clip_to_window(mut self, clip: bool) -> Self {
        self.clip_to_window = clip;
        self
    }
}

/// Outcome of [`harvest_window`].
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Block the walk started from
    pub located: LocatedBlock,
    /// Chronologically ordered records
    pub records: Vec<LogRecord>,
    /// Run counters
    pub stats: HarvestStats,
}

impl HarvestReport {
    /// Newline-separated report text.
    pub fn render(&self) -> String {
        render_report(&self.records)
    }
}

/// Locates the window end, harvests back to the window start and assembles
/// the results.
///
/// Records slightly older than the window start may be kept unless the
/// request asks for clipping.
pub async fn harvest_window<G>(
    gateway: Arc<G>,
    request: &HarvestRequest,
    locator: LocatorSettings,
    harvest: HarvestSettings,
    ctx: Arc<HarvestContext>,
) -> HarvestResult<HarvestReport>
where
    G: LedgerGateway + 'static,
{
    locator.validate()?;
    harvest.validate()?;

    let located = BlockTimeLocator::new(Arc::clone(&gateway), locator)
        .locate(request.window.end)
        .await?;

    let harvester = Harvester::new(gateway, harvest, Arc::clone(&ctx));
    let stats = harvester
        .run(&request.account, &located.signature, request.window.start)
        .await?;

    let store = ctx.take_results().ok_or(HarvestError::Incomplete {
        in_flight: ctx.in_flight(),
    })?;
    let mut records = assemble(store);
    if request.clip_to_window {
        let before = records.len();
        records = clip_to_window(records, request.window);
        info!(
            target: "logscan",
            dropped = before - records.len(),
            "clipped records to window"
        );
    }

    Ok(HarvestReport {
        located,
        records,
        stats,
    })
}
