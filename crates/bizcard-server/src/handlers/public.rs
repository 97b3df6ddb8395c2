//! Handlers backing the public card page.
//!
//! These never 404: a missing, default or unknown slug resolves to the
//! built-in default card.

use axum::{
  Json,
  extract::{Path, State},
};
use bizcard_core::{
  CardRecord,
  store::{MirrorBlob, RemoteCollection},
};

use crate::AppState;

/// `GET /api/public`
pub async fn root<R, M>(State(state): State<AppState<R, M>>) -> Json<CardRecord>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  Json(state.store.public_card(None).await)
}

/// `GET /api/public/{slug}`
pub async fn by_slug<R, M>(
  State(state): State<AppState<R, M>>,
  Path(slug): Path<String>,
) -> Json<CardRecord>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  Json(state.store.public_card(Some(&slug)).await)
}
