//! HTTP client wrapper - executes API calls and classifies responses

use std::time::{Duration, Instant};

use serde_json::{Map, Value};

use crate::messages::{ApiCall, ApiOutcome, ApiPayload, CallKind};
use crate::models::{Account, HttpMethod, LoginPayload, RegisteredUser};

/// Build a request for the given call
fn build_request(client: &reqwest::Client, base_url: &str, call: &ApiCall) -> reqwest::RequestBuilder {
    let url = format!("{}{}", base_url.trim_end_matches('/'), call.path());

    let mut req_builder = match call.method() {
        HttpMethod::GET => client.get(&url),
        HttpMethod::POST => client.post(&url),
        HttpMethod::DELETE => client.delete(&url),
    };

    let query = call.query();
    if !query.is_empty() {
        req_builder = req_builder.query(&query);
    }

    if let Some(body) = call.body() {
        req_builder = req_builder.json(&body);
    }

    req_builder.header("Accept", "application/json")
}

/// Execute a call and classify whatever comes back
pub async fn execute_call(client: &reqwest::Client, base_url: &str, call: &ApiCall) -> ApiOutcome {
    let start = Instant::now();
    let result = build_request(client, base_url, call).send().await;

    let outcome = match result {
        Ok(resp) => {
            let status = resp.status().as_u16();
            match resp.text().await {
                Ok(body) => classify_response(call.kind(), status, &body),
                Err(e) => {
                    tracing::warn!(status, error = %e, "failed to read response body");
                    ApiOutcome::UnknownError
                }
            }
        }
        Err(e) => {
            let message = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            ApiOutcome::TransportError { message }
        }
    };

    tracing::info!(
        method = call.method().as_str(),
        path = %call.path(),
        outcome = outcome.variant_name(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "call finished"
    );
    outcome
}

/// Decide the outcome of a response that did arrive.
///
/// Successful statuses must carry a `{ data, executionTimeMs? }` envelope whose
/// `data` fits the call; anything else on a success status is opaque. Error
/// statuses are structured when the body has a non-empty `message`.
pub fn classify_response(kind: CallKind, status: u16, body: &str) -> ApiOutcome {
    if body.trim().is_empty() {
        return ApiOutcome::UnknownError;
    }

    let is_success = (200..300).contains(&status);
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        // Plain text, e.g. an exception message
        Err(_) => {
            return ApiOutcome::OpaqueError {
                body: body.to_string(),
            }
        }
    };

    match value {
        Value::Object(map) if is_success => match map.get("data").cloned() {
            Some(data) => match decode_payload(kind, data) {
                Ok(payload) => ApiOutcome::Success {
                    payload,
                    execution_time_ms: execution_time(&map),
                },
                Err(e) => {
                    tracing::warn!(?kind, error = %e, "unexpected payload shape");
                    opaque(Value::Object(map))
                }
            },
            None => opaque(Value::Object(map)),
        },
        Value::Object(map) => match map.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => ApiOutcome::StructuredError {
                message: message.to_string(),
                execution_time_ms: execution_time(&map),
            },
            _ => opaque(Value::Object(map)),
        },
        Value::Null => ApiOutcome::UnknownError,
        other => opaque(other),
    }
}

fn execution_time(map: &Map<String, Value>) -> Option<u64> {
    map.get("executionTimeMs").and_then(Value::as_u64)
}

/// Strings are shown as-is, everything else serialized
fn opaque(value: Value) -> ApiOutcome {
    ApiOutcome::OpaqueError {
        body: value_text(value),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Decode the envelope's `data` into the payload this call expects
fn decode_payload(kind: CallKind, data: Value) -> Result<ApiPayload, serde_json::Error> {
    match kind {
        CallKind::Login => {
            serde_json::from_value::<LoginPayload>(data).map(|p| ApiPayload::User(p.into()))
        }
        CallKind::Register => {
            serde_json::from_value::<RegisteredUser>(data).map(|p| ApiPayload::User(p.into()))
        }
        CallKind::ListAccounts { .. } => {
            serde_json::from_value::<Vec<Account>>(data).map(ApiPayload::Accounts)
        }
        CallKind::CreateAccount => serde_json::from_value::<Account>(data).map(ApiPayload::Account),
        CallKind::Transfer | CallKind::DeleteAccount => Ok(ApiPayload::Message(value_text(data))),
    }
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_login_envelope() {
        let body = r#"{"data":{"userId":1,"username":"alice"},"executionTimeMs":12,"message":"Login successful"}"#;
        assert_eq!(
            classify_response(CallKind::Login, 200, body),
            ApiOutcome::Success {
                payload: ApiPayload::User(User {
                    user_id: 1,
                    username: "alice".into()
                }),
                execution_time_ms: Some(12),
            }
        );
    }

    #[test]
    fn test_registration_id_becomes_user_id() {
        let body = r#"{"data":{"id":7,"username":"bob","passwordHash":"$2a$"},"executionTimeMs":30}"#;
        match classify_response(CallKind::Register, 201, body) {
            ApiOutcome::Success {
                payload: ApiPayload::User(user),
                ..
            } => assert_eq!(user.user_id, 7),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_transfer_message_and_object_payloads() {
        let text = r#"{"data":"Transfer completed","executionTimeMs":5}"#;
        assert_eq!(
            classify_response(CallKind::Transfer, 200, text),
            ApiOutcome::Success {
                payload: ApiPayload::Message("Transfer completed".into()),
                execution_time_ms: Some(5),
            }
        );

        let object = r#"{"data":{"status":"DONE"}}"#;
        assert_eq!(
            classify_response(CallKind::DeleteAccount, 200, object),
            ApiOutcome::Success {
                payload: ApiPayload::Message(r#"{"status":"DONE"}"#.into()),
                execution_time_ms: None,
            }
        );
    }

    #[test]
    fn test_structured_error() {
        let body = r#"{"message":"insufficient funds","data":{"balance":10},"executionTimeMs":4}"#;
        assert_eq!(
            classify_response(CallKind::Transfer, 400, body),
            ApiOutcome::StructuredError {
                message: "insufficient funds".into(),
                execution_time_ms: Some(4),
            }
        );
    }

    #[test]
    fn test_error_object_without_message_is_serialized() {
        let body = r#"{"data":"Access denied","executionTimeMs":0}"#;
        match classify_response(CallKind::DeleteAccount, 403, body) {
            ApiOutcome::OpaqueError { body } => {
                let parsed: Value = serde_json::from_str(&body).unwrap();
                assert_eq!(parsed["data"], "Access denied");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_and_scalar_errors_are_verbatim() {
        assert_eq!(
            classify_response(CallKind::Login, 401, "Invalid username or password"),
            ApiOutcome::OpaqueError {
                body: "Invalid username or password".into()
            }
        );
        assert_eq!(
            classify_response(CallKind::Login, 400, r#""quoted""#),
            ApiOutcome::OpaqueError { body: "quoted".into() }
        );
        assert_eq!(
            classify_response(CallKind::Transfer, 500, "42"),
            ApiOutcome::OpaqueError { body: "42".into() }
        );
    }

    #[test]
    fn test_success_without_expected_shape_is_opaque() {
        assert!(matches!(
            classify_response(CallKind::ListAccounts { user_id: 1 }, 200, r#"{"data":{"not":"a list"}}"#),
            ApiOutcome::OpaqueError { .. }
        ));
        assert!(matches!(
            classify_response(CallKind::CreateAccount, 201, r#"{"account":{}}"#),
            ApiOutcome::OpaqueError { .. }
        ));
    }

    #[test]
    fn test_empty_and_null_bodies_are_unknown() {
        assert_eq!(classify_response(CallKind::Login, 500, ""), ApiOutcome::UnknownError);
        assert_eq!(classify_response(CallKind::Login, 502, "  \n"), ApiOutcome::UnknownError);
        assert_eq!(classify_response(CallKind::Login, 500, "null"), ApiOutcome::UnknownError);
    }
}
