//! Drives the real HTTP client against a local axum server.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};

use cashly_api_client::CashlyApiClient;
use cashly_core::accounts::{
    apply_account_filter, AccountFilter, AccountReaderTrait, SortBy, StatusFilter,
};
use cashly_core::errors::{ApiError, Error};
use cashly_core::goals::{GoalProgressResolver, GoalReaderTrait};
use cashly_core::state::{ClientStore, Session, StaticToken};
use cashly_core::transactions::{DateRange, TransactionSumProviderTrait, TransactionSumQuery};

const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn list_accounts(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad token"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": [
                {
                    "id": "chase",
                    "institution_name": "Chase",
                    "account_type": "checking",
                    "account_number_masked": "****1111",
                    "balance": "500",
                    "is_active": true,
                    "last_synced_at": "2024-06-01T10:00:00Z"
                },
                {
                    "id": "ally",
                    "institution_name": "Ally",
                    "custom_name": "Rainy Day",
                    "account_type": "savings",
                    "account_number_masked": "****2222",
                    "balance": "1500",
                    "is_active": false
                },
                {
                    "id": "crypto",
                    "institution_name": "Coinbase",
                    "account_type": "crypto_wallet",
                    "account_number_masked": "",
                    "balance": "250.75",
                    "is_active": true
                }
            ]
        })),
    )
}

async fn get_account(headers: HeaderMap, Path(account_id): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if account_id != "joint account" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "no such account"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": {
                "id": "joint account",
                "institution_name": "Wells Fargo",
                "custom_name": "Household",
                "account_type": "checking",
                "account_number_masked": "****3333",
                "balance": "2750.40",
                "currency": "USD",
                "is_active": true
            }
        })),
    )
}

async fn get_goal(headers: HeaderMap, Path(goal_id): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if goal_id != "vacation" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "no such goal"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": {
                "id": "vacation",
                "name": "Vacation",
                "target_amount": "1200.00",
                "current_amount": "0.00",
                "inferred_category_id": "cat-travel"
            }
        })),
    )
}

async fn list_goals() -> Json<Value> {
    Json(json!({"status": "error", "message": "goals are temporarily unavailable"}))
}

async fn category_sum(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let expected = ["categoryId", "from", "to"];
    if expected.iter().any(|key| !params.contains_key(*key)) {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "missing params"})));
    }
    match params["categoryId"].as_str() {
        "cat-travel" => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": { "total": 300.0, "from": params["from"], "to": params["to"] }
            })),
        ),
        "cat-broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "aggregation failed"})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({"status": "error", "message": "unknown category"})),
        ),
    }
}

async fn spawn_server() -> String {
    let router = Router::new()
        .route("/api/accounts", get(list_accounts))
        .route("/api/accounts/{account_id}", get(get_account))
        .route("/api/goals", get(list_goals))
        .route("/api/goals/{goal_id}", get(get_goal))
        .route("/api/transactions/category-sum", get(category_sum));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> CashlyApiClient {
    CashlyApiClient::new(base_url, Arc::new(StaticToken(TOKEN.to_string())), None).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_list_accounts_then_filter() {
    let base_url = spawn_server().await;
    let accounts = client(&base_url).list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[1].custom_name.as_deref(), Some("Rainy Day"));
    assert_eq!(accounts[2].account_type, "crypto_wallet");

    let filter = AccountFilter {
        status: StatusFilter::Active,
        sort_by: SortBy::BalanceDesc,
        ..Default::default()
    };
    let visible = apply_account_filter(&accounts, &filter);
    let ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["chase", "crypto"]);
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let base_url = spawn_server().await;
    let client =
        CashlyApiClient::new(&base_url, Arc::new(StaticToken("stale".to_string())), None).unwrap();

    let err = client.list_accounts().await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Unauthorized(401))));
}

#[tokio::test]
async fn test_token_follows_client_store() {
    let base_url = spawn_server().await;
    let store = Arc::new(ClientStore::new());
    let client = CashlyApiClient::new(&base_url, store.clone(), None).unwrap();

    let err = client.list_accounts().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));

    store.sign_in(Session {
        user_id: "user-1".to_string(),
        email: "sam@example.com".to_string(),
        access_token: TOKEN.to_string(),
        is_admin: false,
    });
    assert_eq!(client.list_accounts().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_account_and_not_found() {
    let base_url = spawn_server().await;
    let client = client(&base_url);

    let account = client.get_account("joint account").await.unwrap();
    assert_eq!(account.id, "joint account");
    assert_eq!(account.display_name(), "Household");
    assert_eq!(account.balance, "2750.40");

    let err = client.get_account("closed").await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_get_goal_and_not_found() {
    let base_url = spawn_server().await;
    let client = client(&base_url);

    let goal = client.get_goal("vacation").await.unwrap();
    assert_eq!(goal.target_amount.as_deref(), Some("1200.00"));
    assert_eq!(goal.progress_percentage, None);

    let err = client.get_goal("house").await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_error_envelope_maps_to_remote_error() {
    let base_url = spawn_server().await;
    let err = client(&base_url).list_goals().await.unwrap_err();
    assert!(
        matches!(err, Error::Api(ApiError::Remote(ref m)) if m == "goals are temporarily unavailable")
    );
}

#[tokio::test]
async fn test_category_sum_passes_query() {
    let base_url = spawn_server().await;
    let query = TransactionSumQuery::for_category(
        "cat-travel",
        DateRange::new(date(2024, 1, 1), date(2024, 7, 4)),
    );
    let response = client(&base_url).category_sum(&query).await.unwrap();
    assert_eq!(response.total(), Some(300.0));

    let unknown = TransactionSumQuery::for_category(
        "cat-other",
        DateRange::new(date(2024, 1, 1), date(2024, 7, 4)),
    );
    let response = client(&base_url).category_sum(&unknown).await.unwrap();
    assert_eq!(response.total(), None);
}

#[tokio::test]
async fn test_resolver_over_http() {
    let base_url = spawn_server().await;
    let client = Arc::new(client(&base_url));
    let resolver = GoalProgressResolver::new(client.clone());

    let goal = client.get_goal("vacation").await.unwrap();
    let progress = resolver.resolve_as_of(&goal, None, date(2024, 7, 4)).await;
    assert_eq!(progress, 25.0);

    let mut broken = goal.clone();
    broken.inferred_category_id = Some("cat-broken".to_string());
    assert_eq!(resolver.resolve(&broken, None).await, 0.0);
}
