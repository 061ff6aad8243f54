//! # logscan: time-windowed ledger log harvester
//!
//! Reconstructs what a program logged during an interval by walking an
//! account's transaction history on a Solana-style JSON-RPC node.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logscan::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LogscanConfig::default();
//!     let client = Arc::new(RpcClientBuilder::from_config(&config.rpc)?.build()?);
//!     let request = HarvestRequest::new("Account1111", TimeWindow::new(1_700_000_000, 1_700_000_600)?);
//!
//!     let report = harvest_window(
//!         client,
//!         &request,
//!         LocatorSettings::from(&config.locator),
//!         HarvestSettings::from_config(&config.harvest, "Instruction"),
//!         Arc::new(HarvestContext::new()),
//!     )
//!     .await?;
//!     println!("{}", report.render());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - constants and the TOML configuration
//! - [`rpc_client`] - JSON-RPC transport and the [`rpc_client::LedgerGateway`] trait
//! - [`core`] - block locator, signature walker, concurrent harvester, assembly
//! - [`decoder`] - IDL-driven event decoding and scaled decimals

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use logscan_config as config;
pub use logscan_core as core;
pub use logscan_decoder as decoder;
pub use logscan_rpc_client as rpc_client;

/// Common imports for harvesting
pub mod prelude {
    pub use crate::config::{LogKind, LogscanConfig};
    pub use crate::core::{
        harvest_window, HarvestContext, HarvestError, HarvestReport, HarvestRequest,
        HarvestSettings, LocatorSettings, LogFilter, LogRecord, TimeWindow,
    };
    pub use crate::decoder::{EventDecoder, Idl, IdlEventDecoder, ScaledDecimal};
    pub use crate::rpc_client::{LedgerGateway, RpcClient, RpcClientBuilder};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
