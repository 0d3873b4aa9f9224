use std::sync::LazyLock;

use regex::Regex;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    api_interfaces::account::{AuthResponse, Credentials},
    error::{ActionError, GetError, ValidationError},
    session::Session,
    util::{endpoint, error_message},
};

const LOGIN_SCRIPT: &str = "login.php";
const REGISTER_SCRIPT: &str = "register.php";

/// Shown when the server rejects credentials without saying why.
const BAD_CREDENTIALS: &str = "Nieprawidłowe dane logowania";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("Invalid regex pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Exchange credentials for a session.
pub async fn login(
    client: &Client,
    auth_url: &Url,
    email: &str,
    password: &str,
) -> Result<Session, ActionError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials.into());
    }
    let response = authenticate(client, auth_url, LOGIN_SCRIPT, email.trim(), password).await?;
    // Only the email the server vouches for is stored.
    Ok(Session::new(&response.token, response.email.as_deref()))
}

/// Create an account and log into it.
pub async fn register(
    client: &Client,
    auth_url: &Url,
    email: &str,
    password: &str,
) -> Result<Session, ActionError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials.into());
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()).into());
    }
    let response = authenticate(client, auth_url, REGISTER_SCRIPT, email, password).await?;
    Ok(Session::new(&response.token, Some(email)))
}

struct Authenticated {
    token: String,
    email: Option<String>,
}

async fn authenticate(
    client: &Client,
    auth_url: &Url,
    script: &str,
    email: &str,
    password: &str,
) -> Result<Authenticated, GetError> {
    let url = endpoint(auth_url, &[script])?;
    debug!(%url, email, "authenticating");
    let body = serde_json::to_string(&Credentials { email, password })?;
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await.map_err(GetError::ResponseBodyError)?;
    if !status.is_success() {
        return Err(GetError::ResponseError {
            status,
            message: error_message(status, &body, Some(BAD_CREDENTIALS)),
        });
    }
    let parsed: AuthResponse = serde_json::from_str(&body)?;
    match parsed.token.filter(|token| !token.is_empty()) {
        Some(token) => Ok(Authenticated {
            token,
            email: parsed.email,
        }),
        None => Err(GetError::ResponseError {
            status,
            message: parsed.message.unwrap_or_else(|| BAD_CREDENTIALS.to_string()),
        }),
    }
}
