// Copyright (C) 2015-2025 The Logscan Project.
//
// end_to_end.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

mod common;

use common::{fast_harvest, fast_locator, MockLedger};
use logscan_config::LogKind;
use logscan_core::{
    harvest_window, HarvestContext, HarvestError, HarvestRequest, HarvestSettings, LogFilter,
    TimeWindow,
};
use std::sync::Arc;
use std::time::Duration;

/// Blocks 0..=100 at block time `900 + 20 * index`; `ACC1` has `sig1` at 1500
/// and `sig2` at 2500.
fn ledger() -> MockLedger {
    let mut ledger = MockLedger::linear(101, 900, 20);
    ledger.add_transaction(30, "sig1", "ACC1", &["foo bar", "baz"]);
    ledger.add_transaction(80, "sig2", "ACC1", &["foo qux"]);
    ledger
}

#[tokio::test]
async fn harvests_filtered_lines_inside_window() {
    let request = HarvestRequest::new("ACC1", TimeWindow::new(1_000, 2_000).unwrap());
    let report = harvest_window(
        Arc::new(ledger()),
        &request,
        fast_locator(),
        fast_harvest(LogFilter::new(LogKind::Any, "foo")),
        Arc::new(HarvestContext::new()),
    )
    .await
    .unwrap();

    assert!(report.located.timestamp.unwrap() >= 2_000);
    assert_eq!(report.render(), "1500 (1970-01-01T00:25:00.000Z) sig1: foo bar");
}

#[tokio::test(start_paused = true)]
async fn records_before_window_start_are_kept_unless_clipped() {
    let mut ledger = ledger();
    ledger.add_transaction(0, "sig0", "ACC1", &["foo ancient"]);
    ledger.delay_transaction("sig0", Duration::from_millis(50));
    let ledger = Arc::new(ledger);
    let window = TimeWindow::new(1_000, 2_000).unwrap();
    let filter = LogFilter::new(LogKind::Any, "foo");

    let loose = harvest_window(
        Arc::clone(&ledger),
        &HarvestRequest::new("ACC1", window),
        fast_locator(),
        fast_harvest(filter.clone()),
        Arc::new(HarvestContext::new()),
    )
    .await
    .unwrap();
    let stamps: Vec<i64> = loose.records.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![900, 1_500]);

    let clipped = harvest_window(
        ledger,
        &HarvestRequest::new("ACC1", window).with_clip_to_window(true),
        fast_locator(),
        fast_harvest(filter),
        Arc::new(HarvestContext::new()),
    )
    .await
    .unwrap();
    assert_eq!(clipped.render(), "1500 (1970-01-01T00:25:00.000Z) sig1: foo bar");
}

#[tokio::test]
async fn invalid_settings_fail_before_any_request() {
    let request = HarvestRequest::new("ACC1", TimeWindow::new(1_000, 2_000).unwrap());
    let settings = HarvestSettings {
        page_limit: 0,
        ..HarvestSettings::default()
    };
    let err = harvest_window(
        Arc::new(ledger()),
        &request,
        fast_locator(),
        settings,
        Arc::new(HarvestContext::new()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HarvestError::InvalidSettings(_)));
}

#[test]
fn inverted_window_is_rejected() {
    assert!(matches!(
        TimeWindow::new(2_000, 1_000),
        Err(HarvestError::InvalidWindow { .. })
    ));
}

#[tokio::test]
async fn locator_failure_ends_the_run() {
    let mut ledger = MockLedger::new();
    for index in 0..=5 {
        ledger.push_empty_block(index, Some(1_000 + index as i64));
    }
    let request = HarvestRequest::new("ACC1", TimeWindow::new(1_000, 1_003).unwrap());
    let err = harvest_window(
        Arc::new(ledger),
        &request,
        fast_locator(),
        fast_harvest(LogFilter::any()),
        Arc::new(HarvestContext::new()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HarvestError::EmptyBlock { .. }));
}

#[tokio::test]
async fn window_at_the_start_of_time_harvests_nothing() {
    let window = TimeWindow::new(i64::MIN, i64::MIN + 1).unwrap();
    let report = harvest_window(
        Arc::new(ledger()),
        &HarvestRequest::new("ACC1", window),
        fast_locator(),
        fast_harvest(LogFilter::any()),
        Arc::new(HarvestContext::new()),
    )
    .await
    .unwrap();

    assert!(report.located.index <= 10);
    assert!(report.records.is_empty());
}
