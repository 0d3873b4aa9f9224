use reqwest::{Client, Url};
use serde::Serialize;
use tracing::debug;

use crate::{
    api_interfaces::{account::NewComment, details},
    error::{ActionError, GetError, ValidationError},
    mapper::coerce_string,
    session::Session,
    util::{endpoint, read_ack, read_json},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
}

impl From<details::Comment> for Comment {
    fn from(raw: details::Comment) -> Self {
        Self {
            id: coerce_string(&raw.id),
            user: coerce_string(&raw.user),
            text: coerce_string(&raw.text),
        }
    }
}

/// Get all comments on a place.
pub async fn get(client: &Client, api_url: &Url, listing_id: &str) -> Result<Vec<Comment>, GetError> {
    let url = endpoint(api_url, &["kebabs", listing_id, "comments"])?;
    debug!(%url, "fetching comments");
    let response = client.get(url).send().await?;
    let raw: Vec<details::Comment> = read_json(response).await?;
    Ok(raw.into_iter().map(Comment::from).collect())
}

/// Post a comment as the session's user. Blank text is rejected before any
/// request is made.
pub async fn add(
    client: &Client,
    api_url: &Url,
    session: &Session,
    listing_id: &str,
    text: &str,
) -> Result<(), ActionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyComment.into());
    }
    let url = endpoint(api_url, &["kebabs", listing_id, "comment"])?;
    let body = serde_json::to_string(&NewComment { text }).map_err(GetError::from)?;
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .bearer_auth(session.token())
        .body(body)
        .send()
        .await
        .map_err(GetError::from)?;
    read_ack::<serde_json::Value>(response).await?;
    Ok(())
}
