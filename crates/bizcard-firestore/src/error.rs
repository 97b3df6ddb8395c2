//! Error type for `bizcard-firestore`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The API answered with a non-success status.
  #[error("firestore returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("invalid base url {url:?}: {reason}")]
  InvalidBaseUrl { url: String, reason: String },

  /// A Firestore typed value could not be turned back into JSON.
  #[error("malformed firestore value: {0}")]
  Decode(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
