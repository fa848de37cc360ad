// src/error.rs
//! Errors raised while running and decoding the external disk tools.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = CollectorError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum CollectorError {
    /// The program could not be started at all (missing binary, permissions).
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but its exit status and output carry no usable data.
    #[error("`{command}` failed ({status}): {message}")]
    Exit {
        command: String,
        status: String,
        message: String,
    },

    /// Stdout was not the JSON document we expected.
    #[error("failed to parse output of `{command}`: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IntoResponse for CollectorError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
