//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every operation
//! over real HTTP through `HttpTransport`. The server's request log lets the
//! tests check exactly what went over the wire.

use std::sync::Arc;

use fintech_core::{ApiError, Fintech, RecordTransactionRequest};
use mock_server::MockState;

/// Start a seeded mock server and return its base URL and state.
async fn start_server() -> (String, Arc<MockState>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(MockState::seeded());
    tokio::spawn(mock_server::run_with_state(listener, state.clone()));
    (format!("http://{addr}"), state)
}

fn transaction() -> RecordTransactionRequest {
    RecordTransactionRequest {
        account_id: "acct-1".to_string(),
        amount: 1050,
        currency: "USD".to_string(),
        description: "test".to_string(),
        reference_id: "ref-1".to_string(),
    }
}

#[tokio::test]
async fn ledger_lifecycle() {
    let (base_url, _) = start_server().await;
    let client = Fintech::with_base_url("test-key", &base_url);

    // Step 1: read the seeded account.
    let account = client.ledger().get_account("acct-1").await.unwrap();
    assert_eq!(account.balance, 500);
    assert_eq!(account.currency, "USD");
    assert_eq!(account.created_at, "2024-01-01T00:00:00Z");

    // Step 2: record a transaction.
    let recorded = client.ledger().record_transaction(&transaction()).await.unwrap();
    assert_eq!(recorded.status, "completed");
    assert!(!recorded.transaction_id.is_empty());

    // Step 3: the balance reflects it.
    let account = client.ledger().get_account("acct-1").await.unwrap();
    assert_eq!(account.balance, 1550);
}

#[tokio::test]
async fn missing_account_is_a_status_error() {
    let (base_url, _) = start_server().await;
    let client = Fintech::with_base_url("test-key", &base_url);

    let err = client.ledger().get_account("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    let msg = err.to_string();
    assert!(msg.contains("404"), "{msg}");
    assert!(msg.contains("account not found"), "{msg}");
}

#[tokio::test]
async fn unknown_key_is_valid_false_not_an_error() {
    let (base_url, _) = start_server().await;
    let client = Fintech::with_base_url("test-key", &base_url);

    let result = client.auth().validate_key("unknown-hash").await.unwrap();
    assert!(!result.valid);
    assert_eq!(result.environment, "sandbox");
    assert_eq!(result.user_id, "");
    assert_eq!(result.scopes, "");

    let result = client.auth().validate_key("hash-valid").await.unwrap();
    assert!(result.valid);
    assert_eq!(result.org_id, "org-1");
    assert_eq!(result.scopes, "ledger:read,ledger:write");
}

#[tokio::test]
async fn every_request_carries_key_and_content_type() {
    let (base_url, state) = start_server().await;
    let client = Fintech::with_base_url("k-123", &base_url);

    client.ledger().record_transaction(&transaction()).await.unwrap();
    client.ledger().get_account("acct-1").await.unwrap();
    client.auth().validate_key("hash-valid").await.unwrap();

    let seen = state.requests().await;
    assert_eq!(seen.len(), 3);
    for req in &seen {
        assert_eq!(req.api_key.as_deref(), Some("k-123"), "{}", req.path);
        assert_eq!(req.content_type.as_deref(), Some("application/json"), "{}", req.path);
    }
    assert_eq!(seen[1].method, "GET");
    assert!(seen[1].body.is_empty());
    assert_eq!(seen[2].body, r#"{"keyHash":"hash-valid"}"#);
}

#[tokio::test]
async fn transaction_body_reaches_server_intact() {
    let (base_url, state) = start_server().await;
    let client = Fintech::with_base_url("test-key", &base_url);

    client.ledger().record_transaction(&transaction()).await.unwrap();

    let seen = state.requests().await;
    let sent: RecordTransactionRequest = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(sent, transaction());
}

#[tokio::test]
async fn trailing_slash_produces_same_paths() {
    let (base_url, state) = start_server().await;
    let with_slash = Fintech::with_base_url("test-key", format!("{base_url}/"));
    let without = Fintech::with_base_url("test-key", &base_url);
    assert_eq!(with_slash.base_url(), without.base_url());

    for client in [&with_slash, &without] {
        client.ledger().get_account("acct-1").await.unwrap();
        client.auth().validate_key("hash-valid").await.unwrap();
    }

    let paths: Vec<String> = state.requests().await.into_iter().map(|r| r.path).collect();
    assert_eq!(paths[0], "/v1/ledger/accounts/acct-1");
    assert_eq!(paths[1], "/v1/auth/validate");
    assert_eq!(paths[..2], paths[2..]);
}

#[tokio::test]
async fn concurrent_operations_do_not_interfere() {
    let (base_url, state) = start_server().await;
    let client = Fintech::with_base_url("test-key", &base_url);

    let ledger = client.ledger();
    let tx = transaction();
    let (account, recorded) = tokio::join!(ledger.get_account("acct-1"), ledger.record_transaction(&tx));

    let account = account.unwrap();
    assert_eq!(account.account_id, "acct-1");
    assert!(account.balance == 500 || account.balance == 1550);
    assert_eq!(recorded.unwrap().status, "completed");

    let seen = state.requests().await;
    assert_eq!(seen.len(), 2);
    let post = seen.iter().find(|r| r.method == "POST").unwrap();
    let get = seen.iter().find(|r| r.method == "GET").unwrap();
    assert_eq!(post.path, "/v1/ledger/transactions");
    assert_eq!(get.path, "/v1/ledger/accounts/acct-1");
    assert!(get.body.is_empty());
    for req in &seen {
        assert_eq!(req.api_key.as_deref(), Some("test-key"));
    }
}

#[tokio::test]
async fn spawned_tasks_share_one_client() {
    let (base_url, _) = start_server().await;
    let client = Arc::new(Fintech::with_base_url("test-key", &base_url));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.ledger().get_account("acct-1").await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().account_id, "acct-1");
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Fintech::with_base_url("test-key", format!("http://{addr}"));
    let err = client.ledger().get_account("acct-1").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
    assert_eq!(err.status(), None);
}
