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

//! Logscan harvesting engine.
//!
//! Given an account and a time window, the engine finds the block closest to
//! the window end, walks the account's signatures backward, fetches each
//! transaction under a concurrency cap and collects the selected log lines
//! in timestamp order.
//!
//! ```no_run
//! use logscan_core::{harvest_window, HarvestContext, HarvestRequest, TimeWindow};
//! use logscan_rpc_client::RpcClient;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(RpcClient::builder("https://api.mainnet-beta.solana.com".parse()?).build()?);
//! let request = HarvestRequest::new("Account1111", TimeWindow::new(1_000, 2_000)?);
//! let report = harvest_window(
//!     client,
//!     &request,
//!     Default::default(),
//!     Default::default(),
//!     Arc::new(HarvestContext::new()),
//! )
//! .await?;
//! println!("{}", report.render());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod error;
pub mod filter;
pub mod harvester;
pub mod locator;
pub mod pipeline;
pub mod record;
pub mod state;
pub mod walker;

pub use assembler::{assemble, clip_to_window};
pub use error::{HarvestError, HarvestResult};
pub use filter::LogFilter;
pub use harvester::{
    filter_logs, FetchOutcome, HarvestSettings, HarvestStats, Harvester, TransactionFetch,
};
pub use locator::{BlockTimeLocator, LocatedBlock, LocatorSettings};
pub use pipeline::{harvest_window, HarvestReport, HarvestRequest};
pub use record::{format_record, iso8601, render_report, LogRecord, TimeWindow};
pub use state::{FetchGuard, HarvestContext, ResultStore};
pub use walker::SignatureWalker;
