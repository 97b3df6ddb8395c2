//! Admin dashboard write calls. Every handler requires [`Authenticated`].
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/api/admin/cards/template` | Unsaved new card |
//! | `PUT`    | `/api/admin/cards/{id}` | Whole-record replace; path and body ids must match |
//! | `DELETE` | `/api/admin/cards/{id}` | 204 |
//! | `POST`   | `/api/admin/cards/{id}/services` | Appends a placeholder service |
//! | `DELETE` | `/api/admin/cards/{id}/services/{service_id}` | |
//! | `POST`   | `/api/admin/cards/{id}/projects` | Appends a placeholder project |
//! | `DELETE` | `/api/admin/cards/{id}/projects/{project_id}` | |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
};
use bizcard_core::{
  CardRecord, ProjectRecord, ServiceRecord,
  defaults::new_record_id,
  store::{MirrorBlob, RemoteCollection},
};
use chrono::Utc;

use crate::{AppState, auth::Authenticated, error::Error};

async fn load<R, M>(state: &AppState<R, M>, id: &str) -> Result<CardRecord, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  state
    .store
    .get_by_id(id)
    .await
    .ok_or_else(|| Error::NotFound(format!("no card with id {id:?}")))
}

// ─── Cards ───────────────────────────────────────────────────────────────────

/// `POST /api/admin/cards/template`
pub async fn template<R, M>(
  _: Authenticated,
  State(_): State<AppState<R, M>>,
) -> Json<CardRecord>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  Json(CardRecord::new_template(Utc::now()))
}

/// `PUT /api/admin/cards/{id}`
pub async fn save<R, M>(
  _: Authenticated,
  State(state): State<AppState<R, M>>,
  Path(id): Path<String>,
  payload: Result<Json<CardRecord>, JsonRejection>,
) -> Result<Json<CardRecord>, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let Json(card) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
  if card.id != id {
    return Err(Error::BadRequest(format!(
      "path id {id:?} does not match body id {:?}",
      card.id
    )));
  }
  Ok(Json(state.store.save(card).await?))
}

/// `DELETE /api/admin/cards/{id}`
pub async fn delete<R, M>(
  _: Authenticated,
  State(state): State<AppState<R, M>>,
  Path(id): Path<String>,
) -> Result<StatusCode, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  state.store.delete(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Services ────────────────────────────────────────────────────────────────

/// `POST /api/admin/cards/{id}/services`
pub async fn add_service<R, M>(
  _: Authenticated,
  State(state): State<AppState<R, M>>,
  Path(id): Path<String>,
) -> Result<(StatusCode, Json<CardRecord>), Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let mut card = load(&state, &id).await?;
  card.push_service(ServiceRecord::placeholder(new_record_id(Utc::now())));
  let stored = state.store.save(card).await?;
  Ok((StatusCode::CREATED, Json(stored)))
}

/// `DELETE /api/admin/cards/{id}/services/{service_id}`
pub async fn remove_service<R, M>(
  _: Authenticated,
  State(state): State<AppState<R, M>>,
  Path((id, service_id)): Path<(String, String)>,
) -> Result<Json<CardRecord>, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let mut card = load(&state, &id).await?;
  if !card.remove_service(&service_id) {
    return Err(Error::NotFound(format!("no service with id {service_id:?}")));
  }
  Ok(Json(state.store.save(card).await?))
}

// ─── Projects ────────────────────────────────────────────────────────────────

/// `POST /api/admin/cards/{id}/projects`
pub async fn add_project<R, M>(
  _: Authenticated,
  State(state): State<AppState<R, M>>,
  Path(id): Path<String>,
) -> Result<(StatusCode, Json<CardRecord>), Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let mut card = load(&state, &id).await?;
  card.push_project(ProjectRecord::placeholder(new_record_id(Utc::now())));
  let stored = state.store.save(card).await?;
  Ok((StatusCode::CREATED, Json(stored)))
}

/// `DELETE /api/admin/cards/{id}/projects/{project_id}`
pub async fn remove_project<R, M>(
  _: Authenticated,
  State(state): State<AppState<R, M>>,
  Path((id, project_id)): Path<(String, String)>,
) -> Result<Json<CardRecord>, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let mut card = load(&state, &id).await?;
  if !card.remove_project(&project_id) {
    return Err(Error::NotFound(format!("no project with id {project_id:?}")));
  }
  Ok(Json(state.store.save(card).await?))
}
