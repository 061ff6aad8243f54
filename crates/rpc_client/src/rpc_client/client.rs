// Copyright (C) 2015-2025 The Logscan Project.
//
// client.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::builder::RpcClientBuilder;
use super::RpcClient;
use crate::gateway::{BlockDetail, LedgerGateway};
use crate::models::{
    BlockSample, RpcBlock, RpcRequest, RpcResponse, RpcSignatureInfo, RpcTransaction,
    SignatureInfo, TransactionRecord,
};
use crate::{RpcError, RpcResult};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

impl RpcClient {
    /// Creates a configurable builder for the RPC client.
    #[must_use]
    pub fn builder(url: Url) -> RpcClientBuilder {
        RpcClientBuilder::new(url)
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &Url {
        &self.base_address
    }

    /// Commitment level sent with each query.
    pub fn commitment(&self) -> &str {
        &self.commitment
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn as_rpc_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RpcRequest::new(id, method, params)
    }

    fn as_rpc_response(content: &str) -> RpcResult<RpcResponse> {
        let response: RpcResponse = serde_json::from_str(content)
            .map_err(|e| RpcError::invalid_response(format!("Parse error: {e}")))?;

        if let Some(error) = response.error {
            return Err(RpcError::rpc(error.code, error.message));
        }

        Ok(response)
    }

    /// Sends a request and returns the parsed response envelope.
    pub async fn send_async(&self, request: RpcRequest) -> RpcResult<RpcResponse> {
        let start = Instant::now();
        let method = request.method.clone();

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let content = response.text().await?;

        trace!(
            target: "logscan::rpc",
            method = %method,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "rpc round trip"
        );

        if !status.is_success() {
            // Some nodes wrap JSON-RPC errors in a non-2xx status.
            return match serde_json::from_str::<RpcResponse>(&content) {
                Ok(RpcResponse {
                    error: Some(error), ..
                }) => Err(RpcError::rpc(error.code, error.message)),
                _ => {
                    let snippet: String = content.chars().take(200).collect();
                    Err(RpcError::request_failed(format!("HTTP {status}: {snippet}")))
                }
            };
        }

        Self::as_rpc_response(&content)
    }

    /// Sends an RPC call and returns its `result`, `None` when it was `null`.
    pub async fn rpc_send_async(&self, method: &str, params: Vec<Value>) -> RpcResult<Option<Value>> {
        let request = self.as_rpc_request(method, params);
        let response = self.send_async(request).await?;
        Ok(response.result)
    }

    fn decode<T: DeserializeOwned>(value: Value, context: &str) -> RpcResult<T> {
        serde_json::from_value(value)
            .map_err(|e| RpcError::invalid_response(format!("{context}: {e}")))
    }

    fn commitment_config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("commitment".to_string(), json!(self.commitment));
        config
    }

    /// Returns the latest slot the node has reached at the configured commitment.
    pub async fn get_slot(&self) -> RpcResult<u64> {
        let result = self
            .rpc_send_async("getSlot", vec![Value::Object(self.commitment_config())])
            .await?
            .ok_or_else(|| RpcError::invalid_response("getSlot: missing result"))?;
        Self::decode(result, "getSlot")
    }

    /// Returns the block at `slot`, or `None` when the node answers `null`.
    pub async fn get_block(&self, slot: u64, detail: BlockDetail) -> RpcResult<Option<RpcBlock>> {
        let mut config = self.commitment_config();
        config.insert("encoding".to_string(), json!("json"));
        config.insert("transactionDetails".to_string(), json!(detail.as_param()));
        config.insert("rewards".to_string(), json!(false));
        config.insert("maxSupportedTransactionVersion".to_string(), json!(0));

        let result = self
            .rpc_send_async("getBlock", vec![json!(slot), Value::Object(config)])
            .await?;
        result.map(|value| Self::decode(value, "getBlock")).transpose()
    }

    /// Returns the transaction identified by `signature`, or `None` when unknown.
    pub async fn get_transaction(&self, signature: &str) -> RpcResult<Option<RpcTransaction>> {
        let mut config = self.commitment_config();
        config.insert("encoding".to_string(), json!("json"));
        config.insert("maxSupportedTransactionVersion".to_string(), json!(0));

        let result = self
            .rpc_send_async("getTransaction", vec![json!(signature), Value::Object(config)])
            .await?;
        result.map(|value| Self::decode(value, "getTransaction")).transpose()
    }

    /// Returns up to `limit` signatures for `address`, newest first, older than `before`.
    pub async fn get_signatures_for_address(
        &self,
        address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> RpcResult<Vec<RpcSignatureInfo>> {
        let mut config = self.commitment_config();
        config.insert("limit".to_string(), json!(limit));
        if let Some(before) = before {
            config.insert("before".to_string(), json!(before));
        }

        let result = self
            .rpc_send_async("getSignaturesForAddress", vec![json!(address), Value::Object(config)])
            .await?;
        match result {
            Some(value) => Self::decode(value, "getSignaturesForAddress"),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl LedgerGateway for RpcClient {
    async fn current_height(&self) -> RpcResult<u64> {
        self.get_slot().await
    }

    async fn block_at(&self, index: u64, detail: BlockDetail) -> RpcResult<Option<BlockSample>> {
        match self.get_block(index, detail).await {
            Ok(block) => Ok(block.map(|block| block.into_sample(index))),
            Err(err) if err.is_not_found() => {
                debug!(target: "logscan::rpc", index, error = %err, "block not available");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn transaction(&self, signature: &str) -> RpcResult<Option<TransactionRecord>> {
        match self.get_transaction(signature).await {
            Ok(tx) => Ok(tx.map(|tx| tx.into_record(signature))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn signatures_before(
        &self,
        account: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>> {
        let page = self.get_signatures_for_address(account, cursor, limit).await?;
        Ok(page.into_iter().map(SignatureInfo::from).collect())
    }
}
