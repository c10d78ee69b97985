//! Async client for the fintech API.
//!
//! # Design
//! `Fintech` pairs a stateless `FintechClient` with a `Transport`. The
//! `ledger()` and `auth()` namespaces are borrowed views with no state of
//! their own beyond optional per-call headers; every operation goes through
//! `Fintech::send`, which builds, executes and parses one round-trip. There
//! is no retry: a failed attempt is final.

use serde::de::DeserializeOwned;

use crate::client::FintechClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    GetAccountResponse, RecordTransactionRequest, RecordTransactionResponse, ValidateKeyResponse,
};

/// Async client for the fintech API.
///
/// Cheap to share: clone it or wrap it in an `Arc`. Concurrent calls do not
/// coordinate with each other.
#[derive(Debug, Clone)]
pub struct Fintech<T = HttpTransport> {
    client: FintechClient,
    transport: T,
}

impl Fintech<HttpTransport> {
    /// Client for [`DEFAULT_BASE_URL`](crate::config::DEFAULT_BASE_URL).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> Fintech<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: FintechClient::new(config),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn client(&self) -> &FintechClient {
        &self.client
    }

    pub fn ledger(&self) -> Ledger<'_, T> {
        Ledger {
            fintech: self,
            headers: Vec::new(),
        }
    }

    pub fn auth(&self) -> Auth<'_, T> {
        Auth {
            fintech: self,
            headers: Vec::new(),
        }
    }

    async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status, "received response");
        if !response.is_success() {
            tracing::warn!(status = response.status, "fintech api returned an error status");
        }
        self.client.parse(response)
    }
}

/// Ledger operations: transactions and account lookups.
#[derive(Debug, Clone)]
pub struct Ledger<'a, T = HttpTransport> {
    fintech: &'a Fintech<T>,
    headers: Vec<(String, String)>,
}

impl<T: Transport> Ledger<'_, T> {
    /// Add or override a header for calls made through this view.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `POST /v1/ledger/transactions`. Fields are forwarded unvalidated.
    pub async fn record_transaction(
        &self,
        input: &RecordTransactionRequest,
    ) -> Result<RecordTransactionResponse, ApiError> {
        let request = self
            .fintech
            .client
            .build_record_transaction(input, &self.headers)?;
        self.fintech.send(request).await
    }

    /// `GET /v1/ledger/accounts/{account_id}`.
    pub async fn get_account(&self, account_id: &str) -> Result<GetAccountResponse, ApiError> {
        let request = self.fintech.client.build_get_account(account_id, &self.headers)?;
        self.fintech.send(request).await
    }
}

/// API-key validation.
#[derive(Debug, Clone)]
pub struct Auth<'a, T = HttpTransport> {
    fintech: &'a Fintech<T>,
    headers: Vec<(String, String)>,
}

impl<T: Transport> Auth<'_, T> {
    /// Add or override a header for calls made through this view.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `POST /v1/auth/validate` with `{"keyHash": key_hash}`.
    ///
    /// An unknown key comes back as `Ok` with `valid == false`.
    pub async fn validate_key(&self, key_hash: &str) -> Result<ValidateKeyResponse, ApiError> {
        let request = self.fintech.client.build_validate_key(key_hash, &self.headers)?;
        self.fintech.send(request).await
    }
}
