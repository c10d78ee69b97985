//! Request and response shapes of the fintech API.
//!
//! # Design
//! These mirror the remote schema field for field and enforce nothing
//! locally: currency codes, amount signs and reference ids are the server's
//! business. Wire names are camelCase. Response types default any missing
//! or `null` field, so a syntactically valid body with the wrong shape still
//! decodes and reaches the caller as-is. A value of the wrong JSON type
//! (e.g. `"balance":"500"`) is still a decode error.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for `POST /v1/ledger/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
    pub account_id: String,
    /// Amount in minor units (e.g. cents).
    pub amount: i64,
    pub currency: String,
    pub description: String,
    /// Caller-supplied reference, forwarded untouched.
    pub reference_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordTransactionResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
    /// Server-defined, e.g. `"pending"` or `"completed"`.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAccountResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    /// Balance in minor units.
    #[serde(deserialize_with = "null_as_default")]
    pub balance: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// ISO-8601 timestamp as sent by the server; not parsed.
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// Payload for `POST /v1/auth/validate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    pub key_hash: String,
}

/// Result of a key validation. `valid: false` is a normal answer, not an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateKeyResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub valid: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub environment: String,
    /// Opaque scope list exactly as the server formats it.
    #[serde(deserialize_with = "null_as_default")]
    pub scopes: String,
}
