//! HTTP client for the Cashly REST API.
//!
//! Every request carries a bearer token obtained from a [`TokenSource`] at
//! send time, so signing in or out of a `ClientStore` takes effect on the
//! next call without rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use cashly_core::accounts::{Account, AccountReaderTrait};
use cashly_core::errors::{ApiError, Error, Result};
use cashly_core::goals::{Goal, GoalReaderTrait};
use cashly_core::state::TokenSource;
use cashly_core::transactions::{
    ResponseStatus, TransactionSumProviderTrait, TransactionSumQuery, TransactionSumResponse,
};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL for the Cashly API.
pub const DEFAULT_API_URL: &str = "https://api.cashly.app";

/// Longest slice of an unparseable body kept in error messages.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

// ─────────────────────────────────────────────────────────────────────────────
// Response envelope
// ─────────────────────────────────────────────────────────────────────────────

/// `{ "status": "success" | "error", "data": ..., "message": ... }`
#[derive(Debug, serde::Deserialize)]
struct ApiEnvelope<T> {
    status: ResponseStatus,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Cashly API.
///
/// # Example
///
/// ```ignore
/// let client = CashlyApiClient::new(DEFAULT_API_URL, Arc::new(StaticToken(token)), None)?;
/// let accounts = client.list_accounts().await?;
/// ```
#[derive(Clone)]
pub struct CashlyApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl CashlyApiClient {
    /// Creates a new API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root, e.g. "https://api.cashly.app"
    /// * `tokens` - Where to read the bearer token from on each request
    /// * `timeout` - Per-request timeout; defaults to 30 seconds
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenSource>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap> {
        let token = self.tokens.access_token().ok_or(Error::NotAuthenticated)?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth_header);
        Ok(headers)
    }

    /// GET `path` and return the body, failing on non-success statuses.
    async fn get_body<Q: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CashlyApi] GET {}", url);

        let mut request = self.client.get(&url).headers(self.headers()?);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, path, &body).into());
        }
        Ok(body)
    }

    /// GET an enveloped resource and unwrap its `data`.
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get_body::<()>(path, None).await?;
        unwrap_envelope(&body)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn fetch_accounts(&self) -> Result<Vec<Account>> {
        self.get_data("/api/accounts").await
    }

    pub async fn fetch_account(&self, account_id: &str) -> Result<Account> {
        self.get_data(&format!("/api/accounts/{}", urlencoding::encode(account_id)))
            .await
    }

    pub async fn fetch_goals(&self) -> Result<Vec<Goal>> {
        self.get_data("/api/goals").await
    }

    pub async fn fetch_goal(&self, goal_id: &str) -> Result<Goal> {
        self.get_data(&format!("/api/goals/{}", urlencoding::encode(goal_id)))
            .await
    }

    /// Sum of a category's transactions between two dates.
    ///
    /// The endpoint's own `{status, data}` shape is returned untouched; an
    /// `"error"` status is not turned into an `Err` here.
    pub async fn category_transaction_sum(
        &self,
        query: &TransactionSumQuery,
    ) -> Result<TransactionSumResponse> {
        let body = self
            .get_body("/api/transactions/category-sum", Some(query))
            .await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()).into())
    }
}

fn status_error(status: StatusCode, path: &str, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::Unauthorized(status.as_u16())
        }
        StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    match envelope.status {
        ResponseStatus::Success => envelope
            .data
            .ok_or_else(|| ApiError::Decode("Response is missing 'data'".to_string()).into()),
        ResponseStatus::Error => Err(ApiError::Remote(
            envelope
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        )
        .into()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core trait implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AccountReaderTrait for CashlyApiClient {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.fetch_accounts().await
    }

    async fn get_account(&self, account_id: &str) -> Result<Account> {
        self.fetch_account(account_id).await
    }
}

#[async_trait]
impl GoalReaderTrait for CashlyApiClient {
    async fn list_goals(&self) -> Result<Vec<Goal>> {
        self.fetch_goals().await
    }

    async fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.fetch_goal(goal_id).await
    }
}

#[async_trait]
impl TransactionSumProviderTrait for CashlyApiClient {
    async fn category_sum(&self, query: &TransactionSumQuery) -> Result<TransactionSumResponse> {
        self.category_transaction_sum(query).await
    }
}
