//! HTTP client tests against an in-process mock of the transfer API

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use p2p_transfer::messages::{ApiCall, ApiOutcome, ApiPayload};
use p2p_transfer::models::{Credentials, TransferRequest, User};
use p2p_transfer::network::client::{create_client, execute_call};

#[derive(Clone, Default)]
struct MockState {
    transfer_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    transfer_bodies: Arc<Mutex<Vec<Value>>>,
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "data": { "userId": 1, "username": body["username"] },
                "executionTimeMs": 12,
                "message": "Login successful"
            })),
        )
            .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response()
    }
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(json!({
            "data": { "id": 9, "username": body["username"], "passwordHash": "$2a$10$x" },
            "executionTimeMs": 40
        })),
    )
}

async fn list_accounts(Path(user_id): Path<i64>) -> impl IntoResponse {
    Json(json!({
        "data": [
            { "id": 1, "accountNumber": "40817810000000000001", "balance": 150050, "userId": user_id },
            { "id": 2, "accountNumber": "40817810000000000002", "balance": 0, "userId": user_id }
        ],
        "executionTimeMs": 3
    }))
}

async fn transfer(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.transfer_queries.lock().await.push(query);
    state.transfer_bodies.lock().await.push(body);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "insufficient funds", "data": null, "executionTimeMs": 4 })),
    )
}

async fn delete_account(Path(_id): Path<i64>) -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "Account has non-zero balance")
}

async fn spawn_mock_server() -> anyhow::Result<(String, MockState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = MockState::default();

    let api = Router::new()
        .route("/users/login", post(login))
        .route("/users/register", post(register))
        .route("/accounts/user/:user_id", get(list_accounts))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/:id", delete(delete_account))
        .with_state(state.clone());
    let app = Router::new().nest("/api", api);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api"), state))
}

fn client() -> reqwest::Client {
    create_client(Duration::from_secs(5))
}

#[tokio::test]
async fn login_success_envelope_yields_user_and_timing() {
    let (base_url, _state) = spawn_mock_server().await.expect("spawn server");

    let outcome = execute_call(
        &client(),
        &base_url,
        &ApiCall::Login(Credentials::new("alice", "secret")),
    )
    .await;

    assert_eq!(
        outcome,
        ApiOutcome::Success {
            payload: ApiPayload::User(User {
                user_id: 1,
                username: "alice".into()
            }),
            execution_time_ms: Some(12),
        }
    );
}

#[tokio::test]
async fn bad_password_plain_text_is_opaque() {
    let (base_url, _state) = spawn_mock_server().await.expect("spawn server");

    let outcome = execute_call(
        &client(),
        &base_url,
        &ApiCall::Login(Credentials::new("alice", "wrong")),
    )
    .await;

    assert_eq!(
        outcome,
        ApiOutcome::OpaqueError {
            body: "Invalid username or password".into()
        }
    );
}

#[tokio::test]
async fn registration_id_is_normalized() {
    let (base_url, _state) = spawn_mock_server().await.expect("spawn server");

    let outcome = execute_call(
        &client(),
        &base_url,
        &ApiCall::Register(Credentials::new("bob", "pw")),
    )
    .await;

    match outcome {
        ApiOutcome::Success {
            payload: ApiPayload::User(user),
            execution_time_ms,
        } => {
            assert_eq!(user.user_id, 9);
            assert_eq!(user.username, "bob");
            assert_eq!(execution_time_ms, Some(40));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn account_list_decodes_minor_unit_balances() {
    let (base_url, _state) = spawn_mock_server().await.expect("spawn server");

    let outcome = execute_call(&client(), &base_url, &ApiCall::ListAccounts { user_id: 1 }).await;

    match outcome {
        ApiOutcome::Success {
            payload: ApiPayload::Accounts(accounts),
            ..
        } => {
            assert_eq!(accounts.len(), 2);
            assert_eq!(accounts[0].account_number, "40817810000000000001");
            assert_eq!(accounts[0].balance, 150_050);
            assert_eq!(accounts[0].user_id, Some(1));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn transfer_sends_user_in_query_and_reports_structured_error() {
    let (base_url, state) = spawn_mock_server().await.expect("spawn server");

    let call = ApiCall::Transfer {
        user_id: 1,
        request: TransferRequest {
            from_account_number: "40817810000000000001".into(),
            to_account_number: "40817810000000000099".into(),
            amount: 10_000,
        },
    };
    let outcome = execute_call(&client(), &base_url, &call).await;

    assert_eq!(
        outcome,
        ApiOutcome::StructuredError {
            message: "insufficient funds".into(),
            execution_time_ms: Some(4),
        }
    );

    let queries = state.transfer_queries.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("userId").map(String::as_str), Some("1"));

    let bodies = state.transfer_bodies.lock().await;
    assert_eq!(bodies[0]["fromAccountNumber"], "40817810000000000001");
    assert_eq!(bodies[0]["toAccountNumber"], "40817810000000000099");
    assert_eq!(bodies[0]["amount"], 10_000);
}

#[tokio::test]
async fn delete_failure_text_is_verbatim() {
    let (base_url, _state) = spawn_mock_server().await.expect("spawn server");

    let outcome = execute_call(
        &client(),
        &base_url,
        &ApiCall::DeleteAccount {
            user_id: 1,
            account_id: 2,
        },
    )
    .await;

    assert_eq!(
        outcome,
        ApiOutcome::OpaqueError {
            body: "Account has non-zero balance".into()
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let outcome = execute_call(
        &client(),
        &format!("http://{addr}/api"),
        &ApiCall::ListAccounts { user_id: 1 },
    )
    .await;

    assert!(
        matches!(outcome, ApiOutcome::TransportError { .. }),
        "unexpected outcome {:?}",
        outcome
    );
}
