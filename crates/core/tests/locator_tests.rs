// Copyright (C) 2015-2025 The Logscan Project.
//
// locator_tests.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

mod common;

use common::{fast_locator, MockLedger};
use logscan_core::{BlockTimeLocator, HarvestError, LocatorSettings};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn boundary(base: i64, step: i64, target: i64) -> u64 {
    ((target - base) as f64 / step as f64).ceil().max(0.0) as u64
}

#[tokio::test]
async fn binary_search_lands_within_threshold_of_target() {
    let ledger = Arc::new(MockLedger::linear(1_001, 1_000, 2));
    let locator = BlockTimeLocator::new(Arc::clone(&ledger), fast_locator());

    for target in [1_001, 1_200, 1_700, 2_333, 2_998] {
        let located = locator.locate(target).await.unwrap();
        let expected = boundary(1_000, 2, target);
        assert!(
            located.index.abs_diff(expected) <= 10,
            "target {target}: located {} expected near {expected}",
            located.index
        );
        assert_eq!(located.signature, format!("filler-{}", located.index));
        assert_eq!(located.timestamp, Some(1_000 + 2 * located.index as i64));
    }
}

#[tokio::test]
async fn target_before_genesis_degenerates_to_first_blocks() {
    let ledger = Arc::new(MockLedger::linear(1_001, 1_000, 2));
    let located = BlockTimeLocator::new(ledger, fast_locator())
        .locate(10)
        .await
        .unwrap();
    assert!(located.index <= 10);
}

#[tokio::test]
async fn extreme_targets_do_not_overflow() {
    let ledger = Arc::new(MockLedger::linear(101, 900, 20));
    let locator = BlockTimeLocator::new(ledger, fast_locator());

    let earliest = locator.locate(i64::MIN).await.unwrap();
    assert!(earliest.index <= 10);

    let latest = locator.locate(i64::MAX).await.unwrap();
    assert!(latest.index >= 90);
}

#[tokio::test]
async fn target_after_height_degenerates_to_tip() {
    let ledger = Arc::new(MockLedger::linear(1_001, 1_000, 2));
    let located = BlockTimeLocator::new(ledger, fast_locator())
        .locate(1_000_000)
        .await
        .unwrap();
    assert!(located.index >= 990);
}

#[tokio::test]
async fn short_ledger_skips_search_and_fetches_tip() {
    let ledger = Arc::new(MockLedger::linear(5, 1_000, 1));
    let located = BlockTimeLocator::new(Arc::clone(&ledger), fast_locator())
        .locate(1_002)
        .await
        .unwrap();
    assert_eq!(located.index, 4);
    assert_eq!(ledger.block_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fixed_failing_index_is_jittered_around() {
    let mut ledger = MockLedger::linear(1_001, 1_000, 2);
    // First midpoint of [0, 1000].
    ledger.fail_block(500);
    let ledger = Arc::new(ledger);

    let located = BlockTimeLocator::new(Arc::clone(&ledger), fast_locator())
        .locate(1_700)
        .await
        .unwrap();
    assert!(located.index.abs_diff(350) <= 10);
    assert!(ledger.block_calls.load(Ordering::SeqCst) < 64);
}

#[tokio::test]
async fn skipped_slots_are_tolerated() {
    let mut ledger = MockLedger::new();
    for index in (0..=1_000).step_by(2) {
        ledger.push_block(index, Some(5_000 + index as i64));
    }
    // Odd slots were skipped; the tip is an even slot.
    let located = BlockTimeLocator::new(Arc::new(ledger), fast_locator())
        .locate(5_401)
        .await
        .unwrap();
    assert_eq!(located.index % 2, 0);
    assert!(located.index.abs_diff(401) <= 12);
}

#[tokio::test]
async fn unobtainable_samples_end_in_block_not_found() {
    let mut ledger = MockLedger::linear(1_001, 1_000, 2);
    for index in 0..=1_000 {
        ledger.fail_block(index);
    }
    let ledger = Arc::new(ledger);
    let settings = LocatorSettings {
        max_sample_attempts: 8,
        ..fast_locator()
    };

    let err = BlockTimeLocator::new(Arc::clone(&ledger), settings)
        .locate(1_700)
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::BlockNotFound { target: 1_700 }));
    assert_eq!(ledger.block_calls.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn blocks_without_time_count_as_unobtainable() {
    let mut ledger = MockLedger::new();
    for index in 0..=100 {
        ledger.push_block(index, None);
    }
    let settings = LocatorSettings {
        max_sample_attempts: 4,
        ..fast_locator()
    };
    let err = BlockTimeLocator::new(Arc::new(ledger), settings)
        .locate(1_000)
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::BlockNotFound { .. }));
}

#[tokio::test]
async fn empty_located_block_is_reported() {
    let mut ledger = MockLedger::new();
    for index in 0..=5 {
        ledger.push_empty_block(index, Some(100 + index as i64));
    }
    let err = BlockTimeLocator::new(Arc::new(ledger), fast_locator())
        .locate(103)
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::EmptyBlock { index: 5 }));
}
