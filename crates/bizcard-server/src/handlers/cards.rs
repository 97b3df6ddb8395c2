//! Handlers for `/api/cards` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/cards` | Every card; `x-card-source` names the tier |
//! | `GET`  | `/api/cards/{slug}` | 404 if no card uses the slug |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderName, HeaderValue},
  response::{IntoResponse, Response},
};
use bizcard_core::{
  CardRecord,
  store::{MirrorBlob, RemoteCollection},
};

use crate::{AppState, error::Error};

/// Response header naming the tier a listing came from.
pub const SOURCE_HEADER: HeaderName = HeaderName::from_static("x-card-source");

/// `GET /api/cards`
pub async fn list<R, M>(State(state): State<AppState<R, M>>) -> Response
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let listing = state.store.list_all_with_source().await;
  (
    [(SOURCE_HEADER, HeaderValue::from_static(listing.source.as_str()))],
    Json(listing.cards),
  )
    .into_response()
}

/// `GET /api/cards/{slug}`
pub async fn get_one<R, M>(
  State(state): State<AppState<R, M>>,
  Path(slug): Path<String>,
) -> Result<Json<CardRecord>, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  state
    .store
    .get_by_slug(&slug)
    .await
    .map(Json)
    .ok_or_else(|| Error::NotFound(format!("no card with slug {slug:?}")))
}
