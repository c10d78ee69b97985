use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransaction {
    pub account_id: String,
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub reference_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecorded {
    pub transaction_id: String,
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKey {
    pub key_hash: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyIdentity {
    pub valid: bool,
    pub user_id: String,
    pub org_id: String,
    pub environment: String,
    pub scopes: String,
}

impl KeyIdentity {
    fn unknown() -> Self {
        Self {
            valid: false,
            user_id: String::new(),
            org_id: String::new(),
            environment: "sandbox".to_string(),
            scopes: String::new(),
        }
    }
}

/// One request as seen by the server, for assertions in tests.
#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct MockState {
    pub accounts: RwLock<HashMap<String, Account>>,
    pub keys: RwLock<HashMap<String, KeyIdentity>>,
    received: RwLock<Vec<ReceivedRequest>>,
}

impl MockState {
    /// Account `acct-1` (500 USD) and key hash `hash-valid`.
    pub fn seeded() -> Self {
        let accounts = HashMap::from([(
            "acct-1".to_string(),
            Account {
                account_id: "acct-1".to_string(),
                balance: 500,
                currency: "USD".to_string(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
            },
        )]);
        let keys = HashMap::from([(
            "hash-valid".to_string(),
            KeyIdentity {
                valid: true,
                user_id: "user-1".to_string(),
                org_id: "org-1".to_string(),
                environment: "production".to_string(),
                scopes: "ledger:read,ledger:write".to_string(),
            },
        )]);
        Self {
            accounts: RwLock::new(accounts),
            keys: RwLock::new(keys),
            received: RwLock::default(),
        }
    }

    pub async fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.read().await.clone()
    }

    async fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.received.write().await.push(ReceivedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            api_key: header(API_KEY_HEADER),
            content_type: header("content-type"),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
}

pub type Db = Arc<MockState>;

pub fn app() -> Router {
    app_with_state(Arc::new(MockState::seeded()))
}

pub fn app_with_state(state: Db) -> Router {
    Router::new()
        .route("/v1/ledger/transactions", post(record_transaction))
        .route("/v1/ledger/accounts/{id}", get(get_account))
        .route("/v1/auth/validate", post(validate_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, state: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn text(status: StatusCode, message: &'static str) -> Response {
    (status, message).into_response()
}

/// Every route answers 401 when `X-API-Key` is absent.
fn require_api_key(headers: &HeaderMap) -> Result<(), Response> {
    if headers.contains_key(API_KEY_HEADER) {
        Ok(())
    } else {
        Err(text(StatusCode::UNAUTHORIZED, "missing api key"))
    }
}

async fn record_transaction(
    State(db): State<Db>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    db.record(&method, &uri, &headers, &body).await;
    if let Err(denied) = require_api_key(&headers) {
        return denied;
    }
    let input: RecordTransaction = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(_) => return text(StatusCode::BAD_REQUEST, "invalid transaction"),
    };

    let mut accounts = db.accounts.write().await;
    let Some(account) = accounts.get_mut(&input.account_id) else {
        return text(StatusCode::NOT_FOUND, "account not found");
    };
    account.balance = account.balance.saturating_add(input.amount);
    tracing::debug!(
        account = %input.account_id,
        amount = input.amount,
        reference = %input.reference_id,
        "recorded transaction"
    );

    Json(TransactionRecorded {
        transaction_id: Uuid::new_v4().to_string(),
        status: "completed".to_string(),
    })
    .into_response()
}

async fn get_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    db.record(&method, &uri, &headers, &Bytes::new()).await;
    if let Err(denied) = require_api_key(&headers) {
        return denied;
    }
    let accounts = db.accounts.read().await;
    match accounts.get(&id) {
        Some(account) => Json(account.clone()).into_response(),
        None => text(StatusCode::NOT_FOUND, "account not found"),
    }
}

async fn validate_key(
    State(db): State<Db>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    db.record(&method, &uri, &headers, &body).await;
    if let Err(denied) = require_api_key(&headers) {
        return denied;
    }
    let input: ValidateKey = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(_) => return text(StatusCode::BAD_REQUEST, "invalid request"),
    };
    let keys = db.keys.read().await;
    let identity = keys
        .get(&input.key_hash)
        .cloned()
        .unwrap_or_else(KeyIdentity::unknown);
    Json(identity).into_response()
}
