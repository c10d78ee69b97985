//! Stateless HTTP request builder and response parser for the fintech API.
//!
//! # Design
//! `FintechClient` holds only the normalized configuration and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Both sides funnel through `request` and
//! `parse`, so URL composition, headers and status handling live in one
//! place.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, API_KEY_HEADER};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    GetAccountResponse, RecordTransactionRequest, RecordTransactionResponse, ValidateKeyRequest,
    ValidateKeyResponse,
};

pub const TRANSACTIONS_PATH: &str = "/v1/ledger/transactions";
pub const ACCOUNTS_PATH: &str = "/v1/ledger/accounts";
pub const VALIDATE_KEY_PATH: &str = "/v1/auth/validate";

const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Synchronous, stateless client for the fintech API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct FintechClient {
    config: ClientConfig,
}

impl FintechClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Describe a request to `path` under the base URL.
    ///
    /// Every request carries `Content-Type: application/json` and the API
    /// key. `extra_headers` replace a default with the same name (ignoring
    /// ASCII case) or are appended after it.
    pub fn request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        extra_headers: &[(String, String)],
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = vec![
            (CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string()),
            (API_KEY_HEADER.to_string(), self.config.api_key().to_string()),
        ];
        for (name, value) in extra_headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(existing) => existing.1 = value.clone(),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.config.base_url()),
            headers,
            body,
        })
    }

    /// Decode a response, turning any non-2xx status into `ApiError::Status`.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_record_transaction(
        &self,
        input: &RecordTransactionRequest,
        extra_headers: &[(String, String)],
    ) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Post, TRANSACTIONS_PATH, Some(input), extra_headers)
    }

    /// The account id goes into the path verbatim.
    pub fn build_get_account(
        &self,
        account_id: &str,
        extra_headers: &[(String, String)],
    ) -> Result<HttpRequest, ApiError> {
        let path = format!("{ACCOUNTS_PATH}/{account_id}");
        self.request::<()>(HttpMethod::Get, &path, None, extra_headers)
    }

    pub fn build_validate_key(
        &self,
        key_hash: &str,
        extra_headers: &[(String, String)],
    ) -> Result<HttpRequest, ApiError> {
        let body = ValidateKeyRequest {
            key_hash: key_hash.to_string(),
        };
        self.request(HttpMethod::Post, VALIDATE_KEY_PATH, Some(&body), extra_headers)
    }

    pub fn parse_record_transaction(
        &self,
        response: HttpResponse,
    ) -> Result<RecordTransactionResponse, ApiError> {
        self.parse(response)
    }

    pub fn parse_get_account(&self, response: HttpResponse) -> Result<GetAccountResponse, ApiError> {
        self.parse(response)
    }

    pub fn parse_validate_key(&self, response: HttpResponse) -> Result<ValidateKeyResponse, ApiError> {
        self.parse(response)
    }
}

/// Map a non-2xx status to `ApiError::Status`, preferring the body text and
/// falling back to the status phrase when the body is empty.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = if response.body.is_empty() {
        response.reason().to_string()
    } else {
        response.body.clone()
    };
    Err(ApiError::Status {
        status: response.status,
        message,
    })
}
