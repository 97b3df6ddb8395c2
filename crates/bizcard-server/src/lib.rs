//! HTTP surface for the bizcard service.
//!
//! Exposes an axum [`Router`] serving the public card page data, vCard
//! downloads and the admin dashboard's write calls, all backed by one
//! [`CardStore`].

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use bizcard_core::{
  CardStore, StoreOptions,
  store::{MirrorBlob, RemoteCollection},
};
use bizcard_firestore::FirestoreConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use handlers::{admin, cards, public, vcard};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BIZCARD_*` environment variables.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// Origin the public page is served from; used for the link inside
  /// exported vCards.
  pub public_origin:       String,
  pub mirror_path:         PathBuf,
  pub admin_username:      String,
  pub admin_password_hash: String,
  pub store:               StoreOptions,
  /// Absent or unconfigured means offline mode.
  pub firestore:           Option<FirestoreConfig>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8080,
      public_origin:       "http://localhost:8080".to_string(),
      mirror_path:         PathBuf::from("bizcard.db"),
      admin_username:      "admin".to_string(),
      admin_password_hash: String::new(),
      store:               StoreOptions::default(),
      firestore:           None,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<R, M> {
  pub store:  Arc<CardStore<R, M>>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

impl<R, M> Clone for AppState<R, M> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
      auth:   Arc::clone(&self.auth),
    }
  }
}

impl<R, M> AppState<R, M> {
  pub fn new(store: CardStore<R, M>, config: ServerConfig) -> Self {
    let auth = AuthConfig {
      username:      config.admin_username.clone(),
      password_hash: config.admin_password_hash.clone(),
    };
    Self {
      store:  Arc::new(store),
      config: Arc::new(config),
      auth:   Arc::new(auth),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the whole service.
pub fn router<R, M>(state: AppState<R, M>) -> Router
where
  R: RemoteCollection + 'static,
  M: MirrorBlob + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Public reads
    .route("/api/cards",               get(cards::list::<R, M>))
    .route("/api/cards/{slug}",        get(cards::get_one::<R, M>))
    .route("/api/cards/{slug}/vcard",  get(vcard::download::<R, M>))
    .route("/api/public",              get(public::root::<R, M>))
    .route("/api/public/{slug}",       get(public::by_slug::<R, M>))
    // Admin
    .route("/api/admin/cards/template", post(admin::template::<R, M>))
    .route(
      "/api/admin/cards/{id}",
      put(admin::save::<R, M>).delete(admin::delete::<R, M>),
    )
    .route("/api/admin/cards/{id}/services", post(admin::add_service::<R, M>))
    .route(
      "/api/admin/cards/{id}/services/{service_id}",
      delete(admin::remove_service::<R, M>),
    )
    .route("/api/admin/cards/{id}/projects", post(admin::add_project::<R, M>))
    .route(
      "/api/admin/cards/{id}/projects/{project_id}",
      delete(admin::remove_project::<R, M>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn health() -> &'static str { "ok" }

#[cfg(test)]
mod tests;
