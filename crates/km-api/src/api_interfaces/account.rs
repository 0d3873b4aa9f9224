use serde::{Deserialize, Serialize};

/// Request body for both login and registration.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw login/registration response from API.
#[derive(Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Request body for new comments.
#[derive(Serialize)]
pub struct NewComment<'a> {
    pub text: &'a str,
}

/// Request body for feedback submissions.
#[derive(Serialize)]
pub struct Suggestion<'a> {
    pub user: &'a str,
    pub feedback: &'a str,
}

/// Generic acknowledgement body.
#[derive(Deserialize, Default)]
pub struct Ack {
    pub message: Option<String>,
}
