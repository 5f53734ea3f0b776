//! Wager HTTP client implementation.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

use wager_core::{AccountId, DepositId, TransactionId, TransactionType};

use crate::error::ClientError;
use crate::types::{
    AccountResponse, ApiErrorResponse, BalanceResponse, CreateAccountRequest, DepositRequest,
    GetAccountRequest, TransactionRequest,
};

/// Wager API client.
///
/// Provides one method per ledger operation.
#[derive(Debug, Clone)]
pub struct WagerClient {
    client: Client,
    base_url: String,
}

impl WagerClient {
    /// Create a new wager client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the wager service (e.g., `"http://wager:8080"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new wager client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create an account, replacing any account with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_account(
        &self,
        id: AccountId,
        balance: Decimal,
        token: &str,
    ) -> Result<AccountResponse, ClientError> {
        let request = CreateAccountRequest {
            id,
            balance,
            token: token.to_string(),
        };
        self.post("/user/create", &request).await
    }

    /// Get an account's balance and statistics.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `WrongToken` for a bad token, or any
    /// transport error.
    pub async fn get_account(
        &self,
        id: AccountId,
        token: &str,
    ) -> Result<AccountResponse, ClientError> {
        let request = GetAccountRequest {
            id,
            token: token.to_string(),
        };
        self.post("/user/get", &request).await
    }

    /// Deposit into an account. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn deposit(
        &self,
        user_id: AccountId,
        deposit_id: DepositId,
        amount: Decimal,
        token: &str,
    ) -> Result<Decimal, ClientError> {
        let request = DepositRequest {
            user_id,
            deposit_id,
            amount,
            token: token.to_string(),
        };
        let response: BalanceResponse = self.post("/user/deposit", &request).await?;
        Ok(response.balance)
    }

    /// Apply a bet or a win. Returns the new balance.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` for a bet larger than the balance, or any other
    /// error the server returns.
    pub async fn transaction(
        &self,
        user_id: AccountId,
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal,
        token: &str,
    ) -> Result<Decimal, ClientError> {
        let request = TransactionRequest {
            user_id,
            transaction_id,
            transaction_type,
            amount,
            token: token.to_string(),
        };
        let response: BalanceResponse = self.post("/transaction", &request).await?;
        Ok(response.balance)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "Sending request");

        let response = self.client.post(&url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let body = api_error.error;
                let detail = |key: &str| {
                    body.details
                        .as_ref()
                        .and_then(|d| d.get(key))
                        .and_then(serde_json::Value::as_f64)
                        .and_then(|v| Decimal::try_from(v).ok())
                        .unwrap_or_default()
                };

                // Map specific error codes to typed errors
                match body.code.as_str() {
                    "not_found" => Err(ClientError::NotFound {
                        message: body.message,
                    }),
                    "wrong_token" => Err(ClientError::WrongToken),
                    "insufficient_balance" => Err(ClientError::InsufficientBalance {
                        balance: detail("balance"),
                        required: detail("required"),
                    }),
                    "duplicate_record" => Err(ClientError::DuplicateRecord {
                        message: body.message,
                    }),
                    code => Err(ClientError::Api {
                        code: code.to_string(),
                        message: body.message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
