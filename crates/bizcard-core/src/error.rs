//! Error types for `bizcard-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The remote collection rejected a write or could not be reached.
  #[error("remote store error: {0}")]
  Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("local mirror error: {0}")]
  Mirror(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("slug {slug:?} is already used by card {owner}")]
  SlugTaken { slug: String, owner: String },

  #[error("card is missing required field `{0}`")]
  MissingField(&'static str),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn remote<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Remote(Box::new(e))
  }

  pub(crate) fn mirror<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Mirror(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
