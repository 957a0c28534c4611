use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods used by the transfer API
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// The signed-in user. Never holds the password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
}

/// `data` of a successful login: `{ userId, username }`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(alias = "id")]
    pub user_id: i64,
    pub username: String,
}

impl From<LoginPayload> for User {
    fn from(payload: LoginPayload) -> Self {
        User {
            user_id: payload.user_id,
            username: payload.username,
        }
    }
}

/// `data` of a successful registration: the stored user, keyed by `id`
#[derive(Clone, Debug, Deserialize)]
pub struct RegisteredUser {
    #[serde(alias = "userId")]
    pub id: i64,
    pub username: String,
}

impl From<RegisteredUser> for User {
    fn from(payload: RegisteredUser) -> Self {
        User {
            user_id: payload.id,
            username: payload.username,
        }
    }
}

/// A bank account. `balance` is in minor units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub account_number: String,
    pub balance: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Body of the login and registration calls
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keeps passwords out of tracing output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub user_id: i64,
    pub initial_balance: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_number: String,
    pub to_account_number: String,
    pub amount: i64,
}
