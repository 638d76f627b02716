use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::SheetError;

/// Errors surfaced at the HTTP boundary.
///
/// Every variant renders as the `{ result, description }` envelope the API
/// speaks; nothing propagates past the handler. The fetch and mutation
/// messages depend on which operation was in flight, so the handler supplies
/// them at the point where the spreadsheet call failed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("can't find key")]
    KeyNotFound,

    #[error("Problem connecting to spreadsheet")]
    Connection(#[source] SheetError),

    #[error("{message}")]
    Fetch {
        message: &'static str,
        #[source]
        source: SheetError,
    },

    #[error("{message}")]
    Mutation {
        message: &'static str,
        #[source]
        source: SheetError,
    },

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorEnvelope {
            result: u16,
            description: String,
        }

        let status = match &self {
            ApiError::InvalidInput | ApiError::KeyNotFound => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorEnvelope {
                result: status.as_u16(),
                description: self.to_string(),
            }),
        )
            .into_response()
    }
}
