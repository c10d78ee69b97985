//! Async client SDK for the fintech API: ledger transactions, account
//! lookups and API-key validation.
//!
//! # Overview
//! `FintechClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). `Fintech`
//! wires it to a `Transport` (by default reqwest) and exposes the operations
//! under `ledger()` and `auth()`.
//!
//! # Design
//! - `FintechClient` is stateless; it holds only the API key and the
//!   normalized base URL.
//! - Every operation is a single round-trip with no retry. Any non-2xx
//!   status becomes `ApiError::Status`; transport failures pass through as
//!   `ApiError::Transport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! # async fn demo() -> Result<(), fintech_core::ApiError> {
//! let client = fintech_core::Fintech::with_base_url("my-key", "http://localhost:8080/");
//! let account = client.ledger().get_account("acct-1").await?;
//! println!("balance: {}", account.balance);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod sdk;
pub mod transport;
pub mod types;

pub use client::FintechClient;
pub use config::{ClientConfig, API_KEY_HEADER, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sdk::{Auth, Fintech, Ledger};
pub use transport::{HttpTransport, Transport};
pub use types::{
    GetAccountResponse, RecordTransactionRequest, RecordTransactionResponse, ValidateKeyRequest,
    ValidateKeyResponse,
};
