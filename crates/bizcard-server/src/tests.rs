//! Router tests driven through `tower::ServiceExt::oneshot`.

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use bizcard_core::{
  CardRecord, CardStore, StoreOptions,
  defaults::{DEFAULT_ID, DEFAULT_SLUG, builtin_default},
  memory::MemoryCollection,
  store::{DEFAULT_MIRROR_KEY, MirrorBlob},
};
use bizcard_store_sqlite::SqliteMirror;
use rand_core::OsRng;
use serde_json::Value;
use tower::ServiceExt as _;

use crate::{AppState, ServerConfig, router};

const PASSWORD: &str = "hunter2";

type State = AppState<MemoryCollection, SqliteMirror>;

async fn make_state(remote: Option<MemoryCollection>) -> State {
  let mirror = SqliteMirror::open_in_memory().await.unwrap();
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(PASSWORD.as_bytes(), &salt)
    .unwrap()
    .to_string();

  let config = ServerConfig {
    public_origin: "https://cards.example.com".to_string(),
    admin_username: "admin".to_string(),
    admin_password_hash: hash,
    ..ServerConfig::default()
  };
  AppState::new(
    CardStore::new(remote, mirror, StoreOptions::default()),
    config,
  )
}

fn auth() -> String {
  format!("Basic {}", B64.encode(format!("admin:{PASSWORD}")))
}

async fn send(
  state: &State,
  method: &str,
  uri: &str,
  authed: bool,
  body: Option<&Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if authed {
    builder = builder.header(header::AUTHORIZATION, auth());
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap()
}

async fn body_text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> Value {
  serde_json::from_str(&body_text(resp).await).unwrap()
}

fn card(id: &str, slug: &str) -> CardRecord {
  CardRecord {
    id: id.to_string(),
    slug: slug.to_string(),
    full_name: "Ann Smith".to_string(),
    ..builtin_default()
  }
}

fn json(card: &CardRecord) -> Value { serde_json::to_value(card).unwrap() }

// ─── Public reads ────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok() {
  let state = make_state(None).await;
  let resp = send(&state, "GET", "/health", false, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_text(resp).await, "ok");
}

#[tokio::test]
async fn empty_store_lists_builtin_default() {
  let state = make_state(None).await;
  let resp = send(&state, "GET", "/api/cards", false, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()["x-card-source"], "builtin_default");
  let cards = body_json(resp).await;
  assert_eq!(cards[0]["id"], DEFAULT_ID);
}

#[tokio::test]
async fn listing_names_the_remote_tier() {
  let remote = MemoryCollection::with_cards(vec![card("1", "ann")]);
  let state = make_state(Some(remote)).await;
  let resp = send(&state, "GET", "/api/cards", false, None).await;
  assert_eq!(resp.headers()["x-card-source"], "remote");
  assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_slug_is_404_with_json_error() {
  let state = make_state(None).await;
  let resp = send(&state, "GET", "/api/cards/nobody", false, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body = body_json(resp).await;
  assert!(body["error"].as_str().unwrap().contains("nobody"));
}

#[tokio::test]
async fn public_page_falls_back_to_default() {
  let remote = MemoryCollection::with_cards(vec![card("1", "ann")]);
  let state = make_state(Some(remote)).await;

  let root = body_json(send(&state, "GET", "/api/public", false, None).await).await;
  assert_eq!(root["slug"], DEFAULT_SLUG);

  let ann = body_json(send(&state, "GET", "/api/public/ann", false, None).await).await;
  assert_eq!(ann["id"], "1");

  let resp = send(&state, "GET", "/api/public/ghost", false, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await["id"], DEFAULT_ID);
}

// ─── vCard ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn vcard_download_has_headers_and_link() {
  let remote = MemoryCollection::with_cards(vec![card("1", "ann")]);
  let state = make_state(Some(remote)).await;

  let resp = send(&state, "GET", "/api/cards/ann/vcard", false, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/vcard; charset=utf-8");
  let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
  assert!(disposition.contains("filename*=UTF-8''Ann%20Smith.vcf"), "{disposition}");

  let body = body_text(resp).await;
  assert!(body.starts_with("BEGIN:VCARD\r\n"));
  assert!(body.contains("FN:Ann Smith\r\n"));
  assert!(body.contains("https://cards.example.com/#/ann"));
}

#[tokio::test]
async fn vcard_secondary_language() {
  let state = make_state(None).await;
  let resp = send(
    &state,
    "GET",
    &format!("/api/cards/{DEFAULT_SLUG}/vcard?lang=secondary"),
    false,
    None,
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("FN:Salem Mohammed Al-Salem\r\n"));
}

#[tokio::test]
async fn vcard_for_default_slug_works_when_other_cards_exist() {
  let remote = MemoryCollection::with_cards(vec![card("1", "ann")]);
  let state = make_state(Some(remote)).await;
  let resp = send(&state, "GET", &format!("/api/cards/{DEFAULT_SLUG}/vcard"), false, None).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = send(&state, "GET", "/api/cards/ghost/vcard", false, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ─── Admin gate ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_require_credentials() {
  let state = make_state(None).await;
  for (method, uri) in [
    ("POST", "/api/admin/cards/template"),
    ("PUT", "/api/admin/cards/1"),
    ("DELETE", "/api/admin/cards/1"),
    ("POST", "/api/admin/cards/1/services"),
  ] {
    let resp = send(&state, method, uri, false, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], "Basic realm=\"bizcard\"");
  }
}

#[tokio::test]
async fn template_is_not_persisted() {
  let state = make_state(None).await;
  let resp = send(&state, "POST", "/api/admin/cards/template", true, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let template: CardRecord = serde_json::from_value(body_json(resp).await).unwrap();
  assert!(template.slug.starts_with("user-"));
  assert!(template.services.is_empty());
  assert!(template.id.chars().all(|c| c.is_ascii_digit()));

  assert!(state.store.mirror().read(DEFAULT_MIRROR_KEY).await.unwrap().is_none());
}

// ─── Admin writes ────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_then_get_round_trips() {
  let remote = MemoryCollection::new();
  let state = make_state(Some(remote.clone())).await;
  let ann = card("1", "ann");

  let resp = send(&state, "PUT", "/api/admin/cards/1", true, Some(&json(&ann))).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = send(&state, "GET", "/api/cards/ann", false, None).await;
  let got: CardRecord = serde_json::from_value(body_json(resp).await).unwrap();
  assert_eq!(got, ann);
  assert_eq!(remote.snapshot(), vec![ann]);
}

#[tokio::test]
async fn put_with_mismatched_id_is_400() {
  let state = make_state(None).await;
  let resp = send(&state, "PUT", "/api/admin/cards/2", true, Some(&json(&card("1", "ann")))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_with_bad_json_is_400() {
  let state = make_state(None).await;
  let resp = send(
    &state,
    "PUT",
    "/api/admin/cards/1",
    true,
    Some(&serde_json::json!({ "id": 1 })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn put_with_blank_slug_is_400() {
  let state = make_state(None).await;
  let resp = send(&state, "PUT", "/api/admin/cards/1", true, Some(&json(&card("1", " ")))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_with_taken_slug_is_409() {
  let remote = MemoryCollection::with_cards(vec![card("1", "ann")]);
  let state = make_state(Some(remote)).await;
  let resp = send(&state, "PUT", "/api/admin/cards/2", true, Some(&json(&card("2", "ann")))).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unreachable_remote_is_502_but_mirror_keeps_the_write() {
  let remote = MemoryCollection::new();
  remote.set_unreachable(true);
  let state = make_state(Some(remote)).await;

  let resp = send(&state, "PUT", "/api/admin/cards/1", true, Some(&json(&card("1", "ann")))).await;
  assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

  let resp = send(&state, "GET", "/api/cards", false, None).await;
  assert_eq!(resp.headers()["x-card-source"], "mirror");
  let cards = body_json(resp).await;
  assert!(cards.as_array().unwrap().iter().any(|c| c["slug"] == "ann"));
}

#[tokio::test]
async fn delete_removes_card() {
  let state = make_state(None).await;
  send(&state, "PUT", "/api/admin/cards/1", true, Some(&json(&card("1", "ann")))).await;

  let resp = send(&state, "DELETE", "/api/admin/cards/1", true, None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(&state, "GET", "/api/cards/ann", false, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn services_can_be_added_and_removed() {
  let state = make_state(None).await;
  let mut ann = card("1", "ann");
  ann.services.clear();
  send(&state, "PUT", "/api/admin/cards/1", true, Some(&json(&ann))).await;

  let resp = send(&state, "POST", "/api/admin/cards/1/services", true, None).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let stored: CardRecord = serde_json::from_value(body_json(resp).await).unwrap();
  assert_eq!(stored.services.len(), 1);
  assert_eq!(stored.services[0].name_en.as_deref(), Some("New Service"));

  let uri = format!("/api/admin/cards/1/services/{}", stored.services[0].id);
  let resp = send(&state, "DELETE", &uri, true, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(state.store.get_by_id("1").await.unwrap().services.is_empty());

  let resp = send(&state, "DELETE", &uri, true, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn projects_can_be_added_and_removed() {
  let state = make_state(None).await;
  let mut ann = card("1", "ann");
  ann.projects.clear();
  send(&state, "PUT", "/api/admin/cards/1", true, Some(&json(&ann))).await;

  let resp = send(&state, "POST", "/api/admin/cards/1/projects", true, None).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let stored: CardRecord = serde_json::from_value(body_json(resp).await).unwrap();
  assert_eq!(stored.projects[0].thumbnail_url, "https://via.placeholder.com/600x400");

  let uri = format!("/api/admin/cards/1/projects/{}", stored.projects[0].id);
  let resp = send(&state, "DELETE", &uri, true, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(state.store.get_by_id("1").await.unwrap().projects.is_empty());
}

#[tokio::test]
async fn nested_routes_404_for_unknown_card() {
  let state = make_state(None).await;
  let resp = send(&state, "POST", "/api/admin/cards/ghost/projects", true, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
