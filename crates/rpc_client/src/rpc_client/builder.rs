// Copyright (C) 2015-2025 The Logscan Project.
//
// builder.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{RpcClient, DEFAULT_HTTP_TIMEOUT};
use crate::{RpcError, RpcResult};
use logscan_config::{RpcConfig, DEFAULT_COMMITMENT};
use reqwest::{Client, Url};
use std::sync::atomic::AtomicU64;
use std::time::Duration;

/// Builder for [`RpcClient`] instances.
#[derive(Debug, Clone)]
pub struct RpcClientBuilder {
    url: Url,
    timeout: Duration,
    commitment: String,
    http_client: Option<Client>,
}

impl RpcClientBuilder {
    /// Creates a builder targeting `url` with default settings.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: DEFAULT_HTTP_TIMEOUT,
            commitment: DEFAULT_COMMITMENT.to_string(),
            http_client: None,
        }
    }

    /// Creates a builder from the `[rpc]` configuration section.
    pub fn from_config(config: &RpcConfig) -> RpcResult<Self> {
        let url = Url::parse(config.url.trim())?;
        Ok(Self::new(url)
            .timeout(Duration::from_secs(config.timeout_secs))
            .commitment(config.commitment.clone()))
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the commitment level sent with each query.
    #[must_use]
    pub fn commitment(mut self, commitment: impl Into<String>) -> Self {
        self.commitment = commitment.into();
        self
    }

    /// Reuses an existing HTTP client instead of building one.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> RpcResult<RpcClient> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(RpcError::Http)?,
        };

        Ok(RpcClient {
            base_address: self.url,
            http_client,
            commitment: self.commitment,
            request_timeout: self.timeout,
            next_id: AtomicU64::new(1),
        })
    }
}
