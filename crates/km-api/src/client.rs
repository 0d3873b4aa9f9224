use reqwest::Url;

use crate::{
    auth,
    comments::{self, Comment},
    config::{Config, EndpointConfig},
    details::{self, ListingDetails, OpeningHours},
    error::{ActionError, ConfigError, GetError},
    favorites, feedback,
    fetcher::{DataFetcher, ListingQuery},
    listing::Listing,
    session::Session,
    util::{default_http_client, endpoint},
};

/// Entry point for everything the app asks of the two backends.
#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    endpoints: EndpointConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("unable to build the http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Client {
    pub fn new(http_client: reqwest::Client, endpoints: EndpointConfig) -> Self {
        Self {
            http_client,
            endpoints,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientInitError> {
        Ok(Self::new(default_http_client()?, config.endpoints()?))
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    fn api(&self) -> &Url {
        &self.endpoints.api
    }

    /// A fetcher bound to the listing endpoint, for use with a
    /// [`ListingPipeline`](crate::pipeline::ListingPipeline).
    pub fn listing_fetcher(&self) -> Result<DataFetcher, GetError> {
        Ok(DataFetcher::from_url(
            self.http_client.clone(),
            endpoint(self.api(), &["kebabs"])?,
        ))
    }

    pub async fn get_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, GetError> {
        self.listing_fetcher()?.fetch_listings(query).await
    }

    pub async fn get_details(&self, id: &str) -> Result<ListingDetails, GetError> {
        details::get(&self.http_client, self.api(), id).await
    }

    pub async fn get_comments(&self, id: &str) -> Result<Vec<Comment>, GetError> {
        comments::get(&self.http_client, self.api(), id).await
    }

    pub async fn add_comment(
        &self,
        session: &Session,
        id: &str,
        text: &str,
    ) -> Result<(), ActionError> {
        comments::add(&self.http_client, self.api(), session, id, text).await
    }

    pub async fn is_favorite(&self, session: &Session, id: &str) -> Result<bool, GetError> {
        favorites::is_favorite(&self.http_client, self.api(), session, id).await
    }

    pub async fn toggle_favorite(
        &self,
        session: &Session,
        id: &str,
        currently_favorite: bool,
    ) -> Result<bool, GetError> {
        favorites::toggle(&self.http_client, self.api(), session, id, currently_favorite).await
    }

    pub async fn get_opening_hours(
        &self,
        session: &Session,
        title: &str,
    ) -> Result<Option<OpeningHours>, GetError> {
        details::get_opening_hours(&self.http_client, self.api(), session, title).await
    }

    pub async fn send_feedback(
        &self,
        session: &Session,
        feedback: &str,
    ) -> Result<String, ActionError> {
        feedback::send(&self.http_client, self.api(), session, feedback).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ActionError> {
        auth::login(&self.http_client, &self.endpoints.auth, email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ActionError> {
        auth::register(&self.http_client, &self.endpoints.auth, email, password).await
    }
}
