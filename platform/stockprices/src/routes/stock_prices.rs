use crate::errors::Error;
use actix_web::{get, web, HttpRequest, HttpResponse};
use futures::try_join;
use log::info;
use serde::Serialize;
use std::sync::Arc;
use stockchecker::anonymizer::anonymize;
use stockchecker::likes::{Error as LikesError, Interface as LikesInterface};
use stockchecker::quotes::Interface as QuotesInterface;
use stockchecker::schema::Ticker;
use url::form_urlencoded;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

#[derive(Debug, PartialEq)]
pub enum Tickers {
    One(Ticker),
    Two(Ticker, Ticker),
}

#[derive(Debug, PartialEq)]
pub struct Parameters {
    pub tickers: Tickers,
    pub like: bool,
}

impl Parameters {
    /// Parses `stock` (once or twice) and `like` from a raw query string.
    /// `like` is enabled only by a single `true` or `on` value.
    pub fn parse(query: &str) -> Result<Self, Error> {
        let mut stocks: Vec<Ticker> = Vec::new();
        let mut likes: Vec<String> = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "stock" => stocks.push(Ticker::new(&value)),
                "like" => likes.push(value.into_owned()),
                _ => {}
            }
        }

        let like = matches!(likes.as_slice(), [value] if value == "true" || value == "on");

        let mut stocks = stocks.into_iter();

        let tickers = match (stocks.next(), stocks.next()) {
            (None, _) => return Err(Error::Validation),
            (Some(ticker), None) if ticker.is_empty() => return Err(Error::Validation),
            (Some(ticker), None) => Tickers::One(ticker),
            (Some(first), Some(second)) => Tickers::Two(first, second),
        };

        Ok(Parameters { tickers, like })
    }
}

#[derive(Serialize, Debug)]
struct StockPrices<T> {
    #[serde(rename = "stockData")]
    stock_data: T,
}

#[derive(Serialize, Debug)]
struct StockData {
    stock: String,
    price: f64,
    likes: u64,
}

#[derive(Serialize, Debug)]
struct RelativeStockData {
    stock: String,
    price: f64,
    rel_likes: i64,
}

/// Repeated forwarded-for headers are joined with `", "` into one value.
fn client_address(request: &HttpRequest) -> String {
    let forwarded_for: Vec<&str> = request
        .headers()
        .get_all(FORWARDED_FOR_HEADER)
        .filter_map(|value| value.to_str().ok())
        .collect();

    if !forwarded_for.is_empty() {
        return forwarded_for.join(", ");
    }

    request
        .peer_addr()
        .map(|address| address.ip().to_string())
        .unwrap_or_default()
}

async fn like_count(
    likes_client: &dyn LikesInterface,
    ticker: &Ticker,
    liker: &str,
    like: bool,
) -> Result<u64, LikesError> {
    if like {
        likes_client.record_like(ticker.as_str(), liker).await
    } else {
        likes_client.get_like_count(ticker.as_str()).await
    }
}

#[get("/api/stock-prices")]
pub async fn handler(
    request: HttpRequest,
    quotes_client: web::Data<Arc<dyn QuotesInterface>>,
    likes_client: web::Data<Arc<dyn LikesInterface>>,
) -> Result<HttpResponse, Error> {
    let parameters = Parameters::parse(request.query_string())?;

    let liker = anonymize(&client_address(&request));

    let likes_client = likes_client.get_ref().as_ref();

    match parameters.tickers {
        Tickers::One(ticker) => {
            info!("Stock prices requested for {} (like: {})", ticker, parameters.like);

            let quote = quotes_client.fetch_quote(ticker.as_str()).await?;

            let likes = like_count(likes_client, &ticker, &liker, parameters.like).await?;

            Ok(HttpResponse::Ok().json(StockPrices {
                stock_data: StockData {
                    stock: ticker.to_string(),
                    price: quote.price,
                    likes,
                },
            }))
        }
        Tickers::Two(first, second) => {
            info!(
                "Stock prices requested for {} and {} (like: {})",
                first, second, parameters.like
            );

            let (first_quote, second_quote) = try_join!(
                quotes_client.fetch_quote(first.as_str()),
                quotes_client.fetch_quote(second.as_str()),
            )?;

            // A like applies to both tickers from the same liker.
            let (first_likes, second_likes) = try_join!(
                like_count(likes_client, &first, &liker, parameters.like),
                like_count(likes_client, &second, &liker, parameters.like),
            )?;

            let relative_likes = first_likes as i64 - second_likes as i64;

            Ok(HttpResponse::Ok().json(StockPrices {
                stock_data: [
                    RelativeStockData {
                        stock: first.to_string(),
                        price: first_quote.price,
                        rel_likes: relative_likes,
                    },
                    RelativeStockData {
                        stock: second.to_string(),
                        price: second_quote.price,
                        rel_likes: -relative_likes,
                    },
                ],
            }))
        }
    }
}
