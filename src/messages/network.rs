//! Network messages - communication between App and Network layers

use serde_json::Value;

use crate::models::{Account, CreateAccountRequest, Credentials, HttpMethod, TransferRequest, User};

/// One call against the transfer API
#[derive(Debug, Clone)]
pub enum ApiCall {
    Login(Credentials),
    Register(Credentials),
    ListAccounts {
        user_id: i64,
    },
    CreateAccount(CreateAccountRequest),
    Transfer {
        user_id: i64,
        request: TransferRequest,
    },
    DeleteAccount {
        user_id: i64,
        account_id: i64,
    },
}

/// What a call was, without its payload. Used to decode and route responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Login,
    Register,
    ListAccounts { user_id: i64 },
    CreateAccount,
    Transfer,
    DeleteAccount,
}

impl CallKind {
    /// Calls that change server state and must be followed by a refresh
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            CallKind::CreateAccount | CallKind::Transfer | CallKind::DeleteAccount
        )
    }
}

impl ApiCall {
    pub fn kind(&self) -> CallKind {
        match self {
            ApiCall::Login(_) => CallKind::Login,
            ApiCall::Register(_) => CallKind::Register,
            ApiCall::ListAccounts { user_id } => CallKind::ListAccounts { user_id: *user_id },
            ApiCall::CreateAccount(_) => CallKind::CreateAccount,
            ApiCall::Transfer { .. } => CallKind::Transfer,
            ApiCall::DeleteAccount { .. } => CallKind::DeleteAccount,
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            ApiCall::ListAccounts { .. } => HttpMethod::GET,
            ApiCall::DeleteAccount { .. } => HttpMethod::DELETE,
            _ => HttpMethod::POST,
        }
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            ApiCall::Login(_) => String::from("/users/login"),
            ApiCall::Register(_) => String::from("/users/register"),
            ApiCall::ListAccounts { user_id } => format!("/accounts/user/{}", user_id),
            ApiCall::CreateAccount(_) => String::from("/accounts"),
            ApiCall::Transfer { .. } => String::from("/accounts/transfer"),
            ApiCall::DeleteAccount { account_id, .. } => format!("/accounts/{}", account_id),
        }
    }

    /// Query parameters; the acting user travels here for transfer and delete
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ApiCall::Transfer { user_id, .. } | ApiCall::DeleteAccount { user_id, .. } => {
                vec![("userId", user_id.to_string())]
            }
            _ => Vec::new(),
        }
    }

    /// JSON body, if the call has one
    pub fn body(&self) -> Option<Value> {
        let body = match self {
            ApiCall::Login(credentials) | ApiCall::Register(credentials) => {
                serde_json::to_value(credentials)
            }
            ApiCall::CreateAccount(request) => serde_json::to_value(request),
            ApiCall::Transfer { request, .. } => serde_json::to_value(request),
            ApiCall::ListAccounts { .. } | ApiCall::DeleteAccount { .. } => return None,
        };
        body.ok()
    }
}

/// Decoded `data` of a successful envelope
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    User(User),
    Accounts(Vec<Account>),
    Account(Account),
    /// Transfer/delete confirmation; objects arrive already serialized
    Message(String),
}

/// Classified result of a call, decided once at the network boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// 2xx with a `{ data, executionTimeMs? }` envelope of the expected shape
    Success {
        payload: ApiPayload,
        execution_time_ms: Option<u64>,
    },
    /// Error body carrying a `message`
    StructuredError {
        message: String,
        execution_time_ms: Option<u64>,
    },
    /// Any other body, serialized (objects) or verbatim (scalars, text)
    OpaqueError { body: String },
    /// No response was received
    TransportError { message: String },
    UnknownError,
}

impl ApiOutcome {
    pub fn variant_name(&self) -> &'static str {
        match self {
            ApiOutcome::Success { .. } => "success",
            ApiOutcome::StructuredError { .. } => "structured_error",
            ApiOutcome::OpaqueError { .. } => "opaque_error",
            ApiOutcome::TransportError { .. } => "transport_error",
            ApiOutcome::UnknownError => "unknown_error",
        }
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one API call
    Execute { id: u64, call: ApiCall },
    /// Shutdown the network actor
    Shutdown,
}

/// Response sent from Network layer to App layer
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub id: u64,
    pub outcome: ApiOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transfer_call_shape() {
        let call = ApiCall::Transfer {
            user_id: 3,
            request: TransferRequest {
                from_account_number: "111".into(),
                to_account_number: "222".into(),
                amount: 1050,
            },
        };
        assert_eq!(call.method(), HttpMethod::POST);
        assert_eq!(call.path(), "/accounts/transfer");
        assert_eq!(call.query(), vec![("userId", String::from("3"))]);
        assert_eq!(
            call.body(),
            Some(json!({"fromAccountNumber": "111", "toAccountNumber": "222", "amount": 1050}))
        );
        assert!(call.kind().is_mutating());
    }

    #[test]
    fn test_delete_and_list_have_no_body() {
        let delete = ApiCall::DeleteAccount { user_id: 3, account_id: 9 };
        assert_eq!(delete.method(), HttpMethod::DELETE);
        assert_eq!(delete.path(), "/accounts/9");
        assert_eq!(delete.body(), None);

        let list = ApiCall::ListAccounts { user_id: 3 };
        assert_eq!(list.method(), HttpMethod::GET);
        assert_eq!(list.path(), "/accounts/user/3");
        assert!(list.query().is_empty());
        assert!(!list.kind().is_mutating());
    }

    #[test]
    fn test_create_account_body() {
        let call = ApiCall::CreateAccount(CreateAccountRequest {
            user_id: 1,
            initial_balance: 10_000,
        });
        assert_eq!(call.body(), Some(json!({"userId": 1, "initialBalance": 10000})));
    }
}
