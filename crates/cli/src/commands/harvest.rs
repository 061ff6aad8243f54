//! `logscan harvest`

use crate::args::HarvestArgs;
use crate::output::write_report;
use anyhow::{Context, Result};
use chrono::Utc;
use logscan_config::LogscanConfig;
use logscan_core::{
    harvest_window, HarvestContext, HarvestReport, HarvestRequest, HarvestSettings,
    LocatorSettings,
};
use logscan_rpc_client::RpcClientBuilder;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Resolves configuration for a harvest run; fails before any network activity.
pub fn resolve_config(args: &HarvestArgs, config_path: Option<&Path>) -> Result<LogscanConfig> {
    let mut config = LogscanConfig::load_or_default(config_path)
        .context("failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Runs the harvest and writes the report.
pub async fn execute(args: &HarvestArgs, config_path: Option<&Path>) -> Result<HarvestReport> {
    let config = resolve_config(args, config_path)?;
    let window = args
        .window(Utc::now().timestamp())
        .context("invalid time window")?;
    let client = RpcClientBuilder::from_config(&config.rpc)
        .and_then(|builder| builder.build())
        .context("failed to create RPC client")?;

    info!(
        target: "logscan",
        account = %args.account,
        url = %client.url(),
        start = window.start,
        end = window.end,
        "starting harvest"
    );

    let ctx = Arc::new(HarvestContext::new());
    let interrupt = tokio::spawn({
        let ctx = Arc::clone(&ctx);
        async move {
            if signal::ctrl_c().await.is_ok() {
                warn!(target: "logscan", "interrupt received, finishing in-flight fetches");
                ctx.request_stop();
            }
        }
    });

    let request = HarvestRequest::new(args.account.clone(), window)
        .with_clip_to_window(config.harvest.clip_to_window);
    let result = harvest_window(
        Arc::new(client),
        &request,
        LocatorSettings::from(&config.locator),
        HarvestSettings::from_config(&config.harvest, args.needle()),
        ctx,
    )
    .await;
    interrupt.abort();

    let report = result.context("harvest failed")?;
    write_report(args.output.as_deref(), &report.render())?;

    let destination = args
        .output
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<stdout>".to_string());
    info!(
        target: "logscan",
        records = report.records.len(),
        pages = report.stats.pages,
        transactions = report.stats.harvested,
        output = %destination,
        "harvest complete"
    );
    Ok(report)
}
