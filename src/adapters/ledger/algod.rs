//! Algod adapter - talks to an Algorand node over its REST API.
//!
//! Works against public endpoints such as AlgoNode without a token, or a
//! private node with a token sent in a configurable header.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::anchoring::{
    MicroAlgos, SignedTransaction, TransactionId, TransactionParams, WalletAddress,
};
use crate::ports::{LedgerClient, LedgerError};

pub const DEFAULT_ALGOD_URL: &str = "https://testnet-api.algonode.cloud";
pub const DEFAULT_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Rounds a built transaction stays valid for.
const VALIDITY_WINDOW: u64 = 1000;

/// Configuration for the Algod adapter.
#[derive(Debug, Clone)]
pub struct AlgodConfig {
    pub base_url: String,
    token: Option<Secret<String>>,
    pub token_header: String,
    pub timeout: Duration,
}

impl AlgodConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then(|| Secret::new(token));
        self
    }

    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ALGOD_URL)
    }
}

/// Ledger client backed by an Algod node.
pub struct AlgodClient {
    config: AlgodConfig,
    client: Client,
}

impl AlgodClient {
    pub fn new(config: AlgodConfig) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LedgerError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.header(self.config.token_header.as_str(), token.expose_secret()),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LedgerError> {
        let response = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| LedgerError::network(e.to_string()))?;
        decode(response).await
    }

    async fn last_round(&self) -> Result<u64, LedgerError> {
        let status: NodeStatus = self.get_json("/v2/status").await?;
        Ok(status.last_round)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LedgerError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LedgerError::node(status.as_u16(), node_message(&body)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| LedgerError::invalid_response(e.to_string()))
}

/// Algod error bodies are `{"message": "..."}`.
fn node_message(body: &str) -> String {
    serde_json::from_str::<NodeError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

impl From<ParamsResponse> for TransactionParams {
    fn from(params: ParamsResponse) -> Self {
        TransactionParams {
            fee: params.fee,
            min_fee: params.min_fee,
            first_valid: params.last_round,
            last_valid: params.last_round + VALIDITY_WINDOW,
            genesis_id: params.genesis_id,
            genesis_hash: params.genesis_hash,
        }
    }
}

#[async_trait]
impl LedgerClient for AlgodClient {
    async fn genesis_id(&self) -> Result<String, LedgerError> {
        let genesis: GenesisResponse = self.get_json("/genesis").await?;
        Ok(format!("{}-{}", genesis.network, genesis.id))
    }

    async fn suggested_params(&self) -> Result<TransactionParams, LedgerError> {
        let params: ParamsResponse = self.get_json("/v2/transactions/params").await?;
        Ok(params.into())
    }

    async fn submit_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionId, LedgerError> {
        let response = self
            .authorize(self.client.post(self.url("/v2/transactions")))
            .header("Content-Type", "application/x-binary")
            .body(signed.as_bytes().to_vec())
            .send()
            .await
            .map_err(|e| LedgerError::network(e.to_string()))?;
        let submitted: SubmitResponse = decode(response).await?;

        TransactionId::new(submitted.tx_id)
            .map_err(|e| LedgerError::invalid_response(e.to_string()))
    }

    async fn wait_for_confirmation(
        &self,
        tx_id: &TransactionId,
        max_rounds: u64,
    ) -> Result<u64, LedgerError> {
        let start = self.last_round().await? + 1;
        let mut current = start;

        while current < start + max_rounds {
            let pending: PendingResponse = self
                .get_json(&format!("/v2/transactions/pending/{}", tx_id))
                .await?;

            if let Some(round) = pending.confirmed_round.filter(|r| *r > 0) {
                return Ok(round);
            }
            if !pending.pool_error.is_empty() {
                return Err(LedgerError::Rejected(pending.pool_error));
            }

            let _: NodeStatus = self
                .get_json(&format!("/v2/status/wait-for-block-after/{}", current))
                .await?;
            current += 1;
        }

        Err(LedgerError::ConfirmationTimeout {
            tx_id: tx_id.to_string(),
            rounds: max_rounds,
        })
    }

    async fn account_balance(&self, address: &WalletAddress) -> Result<MicroAlgos, LedgerError> {
        let account: AccountResponse = self.get_json(&format!("/v2/accounts/{}", address)).await?;
        Ok(MicroAlgos(account.amount))
    }
}

// ----- Algod API Types -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ParamsResponse {
    #[serde(default)]
    fee: u64,
    min_fee: u64,
    last_round: u64,
    genesis_id: String,
    genesis_hash: String,
}

#[derive(Debug, Deserialize)]
struct GenesisResponse {
    network: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "txId")]
    tx_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PendingResponse {
    confirmed_round: Option<u64>,
    #[serde(default)]
    pool_error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct NodeStatus {
    last_round: u64,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    amount: u64,
}

#[derive(Debug, Deserialize)]
struct NodeError {
    message: String,
}
