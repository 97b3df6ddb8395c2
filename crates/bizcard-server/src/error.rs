//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error(transparent)]
  Store(#[from] bizcard_core::Error),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    use bizcard_core::Error as Store;
    match self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Error::Store(e) => match e {
        Store::MissingField(_) => StatusCode::BAD_REQUEST,
        Store::SlugTaken { .. } => StatusCode::CONFLICT,
        Store::Remote(_) => StatusCode::BAD_GATEWAY,
        Store::Mirror(_) | Store::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if matches!(self, Error::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"bizcard\""),
      );
    }
    res
  }
}
