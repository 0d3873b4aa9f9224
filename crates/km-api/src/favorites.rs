use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    api_interfaces::{account::Ack, details::Favorite},
    error::GetError,
    mapper::{coerce_bool, coerce_string},
    session::Session,
    util::{endpoint, read_ack, read_json},
};

/// Whether the place is on the session user's favorites list.
pub async fn is_favorite(
    client: &Client,
    api_url: &Url,
    session: &Session,
    listing_id: &str,
) -> Result<bool, GetError> {
    let url = endpoint(api_url, &["favorites"])?;
    let response = client
        .get(url)
        .bearer_auth(session.token())
        .send()
        .await?;
    let favorites: Vec<Favorite> = read_json(response).await?;
    Ok(favorites
        .iter()
        .any(|fav| coerce_string(&fav.id) == listing_id && coerce_bool(&fav.is_favorite)))
}

/// Add the place to favorites.
pub async fn add(
    client: &Client,
    api_url: &Url,
    session: &Session,
    listing_id: &str,
) -> Result<Option<String>, GetError> {
    let url = endpoint(api_url, &["kebabs", listing_id, "favorite"])?;
    debug!(%url, "adding favorite");
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .bearer_auth(session.token())
        .send()
        .await?;
    let ack: Ack = read_ack(response).await?;
    Ok(ack.message)
}

/// Remove the place from favorites.
pub async fn remove(
    client: &Client,
    api_url: &Url,
    session: &Session,
    listing_id: &str,
) -> Result<Option<String>, GetError> {
    let url = endpoint(api_url, &["kebabs", listing_id, "unfavorite"])?;
    debug!(%url, "removing favorite");
    let response = client
        .delete(url)
        .header("Content-Type", "application/json")
        .bearer_auth(session.token())
        .send()
        .await?;
    let ack: Ack = read_ack(response).await?;
    Ok(ack.message)
}

/// Flip the favorite flag given its current value; returns the new value.
pub async fn toggle(
    client: &Client,
    api_url: &Url,
    session: &Session,
    listing_id: &str,
    currently_favorite: bool,
) -> Result<bool, GetError> {
    if currently_favorite {
        remove(client, api_url, session, listing_id).await?;
    } else {
        add(client, api_url, session, listing_id).await?;
    }
    Ok(!currently_favorite)
}
