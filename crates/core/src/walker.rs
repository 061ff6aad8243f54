// Copyright (C) 2015-2025 The Logscan Project.
//
// walker.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Backward pagination over an account's signature history.

use futures::stream::{self, Stream};
use logscan_rpc_client::{LedgerGateway, SignatureInfo};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Pages through signatures newest to oldest, starting below a cursor.
///
/// Pages are requested one at a time. The walk ends on the stop token, an
/// empty page or the first failed page; a failed page is not retried.
#[derive(Debug)]
pub struct SignatureWalker<G> {
    gateway: G,
    account: String,
    cursor: Option<String>,
    page_limit: usize,
    stop: CancellationToken,
    pages: usize,
    exhausted: bool,
}

impl<G: LedgerGateway> SignatureWalker<G> {
    /// Creates a walker that starts strictly older than `start`.
    pub fn new(
        gateway: G,
        account: impl Into<String>,
        start: Option<String>,
        page_limit: usize,
        stop: CancellationToken,
    ) -> Self {
        Self {
            gateway,
            account: account.into(),
            cursor: start,
            page_limit,
            stop,
            pages: 0,
            exhausted: false,
        }
    }

    /// Current cursor; the oldest signature returned so far.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Pages requested from the node so far.
    pub fn pages_requested(&self) -> usize {
        self.pages
    }

    /// Next page of signatures, or `None` once the walk is over.
    pub async fn next_batch(&mut self) -> Option<Vec<SignatureInfo>> {
        if self.exhausted || self.stop.is_cancelled() {
            self.exhausted = true;
            return None;
        }

        self.pages += 1;
        let page = self
            .gateway
            .signatures_before(&self.account, self.cursor.as_deref(), self.page_limit)
            .await;

        match page {
            Ok(batch) if batch.is_empty() => {
                debug!(target: "logscan", pages = self.pages, "signature history exhausted");
                self.exhausted = true;
                None
            }
            Ok(batch) => {
                self.cursor = batch.last().map(|info| info.signature.clone());
                debug!(
                    target: "logscan",
                    page = self.pages,
                    count = batch.len(),
                    cursor = ?self.cursor,
                    "fetched signature page"
                );
                Some(batch)
            }
            Err(err) => {
                warn!(target: "logscan", page = self.pages, error = %err, "signature page failed, ending walk");
                self.exhausted = true;
                None
            }
        }
    }

    /// Turns the walker into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = Vec<SignatureInfo>> {
        stream::unfold(self, |mut walker| async move {
            walker.next_batch().await.map(|batch| (batch, walker))
        })
    }
}
