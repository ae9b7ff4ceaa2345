use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use stockchecker::likes::Error as LikesError;
use stockchecker::quotes::Error as QuotesError;
use thiserror::Error as ThisError;

pub const VALIDATION_MESSAGE: &str = "Stock is required";

pub const SERVER_ERROR_MESSAGE: &str = "Invalid stock or server error";

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Stock is required")]
    Validation,
    #[error("Quote unavailable: {0}")]
    QuoteUnavailable(#[from] QuotesError),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] LikesError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation => StatusCode::BAD_REQUEST,
            Error::QuoteUnavailable(_) | Error::StoreUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // Upstream and store details stay in the logs.
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Error::Validation => VALIDATION_MESSAGE,
            _ => {
                error!("Stock prices request failed: {}", self);
                SERVER_ERROR_MESSAGE
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
