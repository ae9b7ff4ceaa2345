use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client as HTTPClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error as ThisError;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://stock-price-checker-proxy.freecodecamp.rocks";

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    HTTPError(#[from] reqwest::Error),
    #[error("Quote request failed with status: {0}")]
    StatusError(StatusCode),
    #[error("URL error: {0}")]
    URLError(#[from] url::ParseError),
    #[error("Other error: {0}")]
    OtherError(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
}

#[derive(Deserialize, Debug)]
struct QuoteResponse {
    symbol: String,
    #[serde(rename = "latestPrice")]
    latest_price: f64,
}

#[automock]
#[async_trait]
pub trait Interface: Send + Sync {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, Error>;
}

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http_client: HTTPClient,
}

impl Client {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http_client = HTTPClient::builder().timeout(timeout).build()?;

        Ok(Client {
            base_url,
            http_client,
        })
    }

    fn quote_url(&self, ticker: &str) -> Result<Url, Error> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                Error::OtherError(format!("Base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(&["v1", "stock", ticker, "quote"]);

        Ok(url)
    }
}

#[async_trait]
impl Interface for Client {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, Error> {
        let url = self.quote_url(ticker)?;

        debug!("Fetching quote from {}", url);

        let response = self
            .http_client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::StatusError(response.status()));
        }

        let quote_response: QuoteResponse = response.json().await?;

        Ok(Quote {
            symbol: quote_response.symbol,
            price: quote_response.latest_price,
        })
    }
}
