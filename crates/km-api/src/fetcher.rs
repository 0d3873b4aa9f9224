use derive_builder::Builder;
use reqwest::{Client, Url};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::GetError,
    filter::FilterSpec,
    listing::{Listing, Status},
    mapper,
    util::{parse_base_url, read_json},
};

/// Query parameters for the listing endpoint. Unset fields are not sent.
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[builder(default, setter(into, strip_option))]
pub struct ListingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag")]
    pub craft_rating: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag")]
    pub in_chain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

// The API reads flags as 1/0.
fn flag<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(b) => serializer.serialize_u8(u8::from(*b)),
        None => serializer.serialize_none(),
    }
}

impl From<FilterSpec> for ListingQuery {
    fn from(spec: FilterSpec) -> Self {
        Self {
            status: spec.status,
            craft_rating: spec.craft_rating,
            in_chain: spec.in_chain,
            page: None,
            page_size: None,
        }
    }
}

/// Retrieves raw listing payloads from one endpoint.
#[derive(Clone, Debug)]
pub struct DataFetcher {
    http_client: Client,
    endpoint: Url,
}

impl DataFetcher {
    pub fn new(http_client: Client, endpoint: &str) -> Result<Self, GetError> {
        Ok(Self {
            http_client,
            endpoint: parse_base_url(endpoint)?,
        })
    }

    pub fn from_url(http_client: Client, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issue one GET and return the parsed body as-is.
    pub async fn fetch(&self, query: &ListingQuery) -> Result<Value, GetError> {
        debug!(endpoint = %self.endpoint, ?query, "fetching listings");
        let response = self
            .http_client
            .get(self.endpoint.clone())
            .query(query)
            .send()
            .await?;
        read_json(response).await
    }

    /// Fetch and map in one go.
    pub async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, GetError> {
        let payload = self.fetch(query).await?;
        let listings = mapper::map_records(mapper::extract_records(payload)?);
        debug!(count = listings.len(), "mapped listings");
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn builder_sets_only_given_fields() {
        let query = ListingQueryBuilder::default()
            .status(Status::Open)
            .craft_rating(true)
            .build()
            .unwrap();
        assert_eq!(query.status, Some(Status::Open));
        assert_eq!(query.craft_rating, Some(true));
        assert_eq!(query.in_chain, None);
        assert_eq!(query.page, None);
    }

    #[test]
    fn new_rejects_relative_endpoint() {
        let fetcher = DataFetcher::new(Client::new(), "kebabs");
        assert!(matches!(fetcher, Err(GetError::InvalidEndpoint(_, _))));
    }

    #[tokio::test]
    async fn fetch_listings_success() {
        // Arrange
        let server = MockServer::start_async().await;
        let listings_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/kebabs/")
                    .query_param("status", "open")
                    .query_param("in_chain", "0");
                then.status(200).json_body(json!({
                    "items": [
                        {"id": 1, "name": "Kebab 1", "status": "open", "in_chain": false},
                        {"id": 2, "name": "Kebab 2", "status": "open", "in_chain": "0"}
                    ]
                }));
            })
            .await;
        let fetcher = DataFetcher::new(Client::new(), &server.url("/kebabs/")).unwrap();
        let query = ListingQueryBuilder::default()
            .status(Status::Open)
            .in_chain(false)
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"status": "open", "in_chain": 0})
        );

        // Act
        let listings = fetcher.fetch_listings(&query).await;

        // Assert
        assert!(
            listings.is_ok(),
            "Failed to get listings: {:?}",
            listings.unwrap_err()
        );
        let listings = listings.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, "1");
        assert_eq!(listings[1].name, "Kebab 2");
        listings_mock.assert();
    }

    #[tokio::test]
    async fn fetch_accepts_bare_array() {
        // Arrange
        let server = MockServer::start_async().await;
        let listings_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .json_body(json!([{"id": "a", "name": "Amir"}, "garbage"]));
            })
            .await;
        let fetcher = DataFetcher::new(Client::new(), &server.url("/")).unwrap();

        // Act
        let listings = fetcher.fetch_listings(&ListingQuery::default()).await;

        // Assert
        assert_eq!(listings.unwrap().len(), 1);
        listings_mock.assert();
    }

    #[tokio::test]
    async fn fetch_bad_status_with_message() {
        // Arrange
        let server = MockServer::start_async().await;
        let listings_mock = server
            .mock_async(|when, then| {
                when.path("/");
                then.status(500)
                    .header("Content-Type", "application/json")
                    .body(r#"{"message": "database unavailable"}"#);
            })
            .await;
        let fetcher = DataFetcher::new(Client::new(), &server.url("/")).unwrap();

        // Act
        let listings = fetcher.fetch_listings(&ListingQuery::default()).await;

        // Assert
        match listings {
            Err(GetError::ResponseError { status, message }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        listings_mock.assert();
    }

    #[tokio::test]
    async fn fetch_bad_status_without_message() {
        // Arrange
        let server = MockServer::start_async().await;
        let listings_mock = server
            .mock_async(|when, then| {
                when.path("/");
                then.status(500).body("Internal Server Error");
            })
            .await;
        let fetcher = DataFetcher::new(Client::new(), &server.url("/")).unwrap();

        // Act
        let error = fetcher
            .fetch_listings(&ListingQuery::default())
            .await
            .unwrap_err();

        // Assert
        assert_eq!(error.user_message(), "HTTP error! Status: 500");
        listings_mock.assert();
    }

    #[tokio::test]
    async fn fetch_invalid_url() {
        // Arrange
        let fetcher = DataFetcher::new(Client::new(), "http://test.invalid").unwrap();

        // Act
        let listings = fetcher.fetch_listings(&ListingQuery::default()).await;

        // Assert
        assert!(matches!(listings.unwrap_err(), GetError::RequestError(_)));
    }

    #[tokio::test]
    async fn fetch_bad_json() {
        // Arrange
        let server = MockServer::start_async().await;
        let listings_mock = server
            .mock_async(|when, then| {
                when.path("/");
                then.status(200).body("not json at all");
            })
            .await;
        let fetcher = DataFetcher::new(Client::new(), &server.url("/")).unwrap();

        // Act
        let listings = fetcher.fetch_listings(&ListingQuery::default()).await;

        // Assert
        assert!(matches!(listings.unwrap_err(), GetError::ParseError(_)));
        listings_mock.assert();
    }
}
