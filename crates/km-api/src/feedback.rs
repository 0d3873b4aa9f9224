use reqwest::{Client, Url};
use tracing::info;

use crate::{
    api_interfaces::account::{Ack, Suggestion},
    error::{ActionError, GetError, ValidationError},
    session::Session,
    util::{endpoint, read_ack_or},
};

const DEFAULT_ACK: &str = "Feedback sent successfully!";
const SEND_FAILED: &str = "Failed to send feedback. Please try again.";

/// Send free-form feedback about the app. Returns the server's
/// acknowledgement message.
pub async fn send(
    client: &Client,
    api_url: &Url,
    session: &Session,
    feedback: &str,
) -> Result<String, ActionError> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(ValidationError::EmptyFeedback.into());
    }
    let url = endpoint(api_url, &["suggestions"])?;
    let body = serde_json::to_string(&Suggestion {
        user: session.email(),
        feedback,
    })
    .map_err(GetError::from)?;
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .bearer_auth(session.token())
        .body(body)
        .send()
        .await
        .map_err(GetError::from)?;
    let ack: Ack = read_ack_or(response, Some(SEND_FAILED)).await?;
    info!(user = session.email(), "feedback sent");
    Ok(ack.message.unwrap_or_else(|| DEFAULT_ACK.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const FAKE_TOKEN: &str = "fake-token";

    fn api_url(server: &MockServer) -> Url {
        crate::util::parse_base_url(&server.url("/api")).unwrap()
    }

    #[tokio::test]
    async fn send_success() {
        // Arrange
        let server = MockServer::start_async().await;
        let feedback_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/suggestions")
                    .header("Authorization", format!("Bearer {}", FAKE_TOKEN))
                    .json_body(json!({"user": "jan@example.com", "feedback": "Dodajcie Głogów"}));
                then.status(200).json_body(json!({"message": "Dzięki!"}));
            })
            .await;
        let client = reqwest::Client::new();
        let session = Session::new(FAKE_TOKEN, Some("jan@example.com"));

        // Act
        let ack = send(&client, &api_url(&server), &session, " Dodajcie Głogów\n").await;

        // Assert
        assert_eq!(ack.unwrap(), "Dzięki!");
        feedback_mock.assert();
    }

    #[tokio::test]
    async fn send_default_ack_on_empty_body() {
        // Arrange
        let server = MockServer::start_async().await;
        let feedback_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/suggestions");
                then.status(201);
            })
            .await;
        let client = reqwest::Client::new();
        let session = Session::new(FAKE_TOKEN, None);

        // Act
        let ack = send(&client, &api_url(&server), &session, "Super").await;

        // Assert
        assert_eq!(ack.unwrap(), DEFAULT_ACK);
        feedback_mock.assert();
    }

    #[tokio::test]
    async fn send_error_uses_detail() {
        // Arrange
        let server = MockServer::start_async().await;
        let feedback_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/suggestions");
                then.status(422).json_body(json!({"detail": "Feedback too long"}));
            })
            .await;
        let client = reqwest::Client::new();
        let session = Session::new(FAKE_TOKEN, None);

        // Act
        let result = send(&client, &api_url(&server), &session, "x").await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), "Feedback too long");
        feedback_mock.assert();
    }

    #[tokio::test]
    async fn send_error_without_detail_uses_generic_message() {
        // Arrange
        let server = MockServer::start_async().await;
        let feedback_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/suggestions");
                then.status(500).body("Internal Server Error");
            })
            .await;
        let client = reqwest::Client::new();
        let session = Session::new(FAKE_TOKEN, None);

        // Act
        let result = send(&client, &api_url(&server), &session, "x").await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), SEND_FAILED);
        feedback_mock.assert();
    }

    #[tokio::test]
    async fn send_blank_is_rejected() {
        let client = reqwest::Client::new();
        let api_url = crate::util::parse_base_url("http://test.invalid/api").unwrap();
        let session = Session::new(FAKE_TOKEN, None);

        let result = send(&client, &api_url, &session, " \t ").await;

        assert!(matches!(
            result.unwrap_err(),
            ActionError::Validation(ValidationError::EmptyFeedback)
        ));
    }
}
