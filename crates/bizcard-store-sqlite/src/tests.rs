//! Integration tests for `SqliteMirror`.

use bizcard_core::{
  CardStore, Source, StoreOptions,
  defaults::builtin_default,
  store::{DEFAULT_MIRROR_KEY, MirrorBlob},
};

use crate::SqliteMirror;

async fn mirror() -> SqliteMirror {
  SqliteMirror::open_in_memory()
    .await
    .expect("in-memory mirror")
}

// ─── Blob access ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn read_missing_key_returns_none() {
  let m = mirror().await;
  assert!(m.read("nothing-here").await.unwrap().is_none());
  assert!(m.updated_at("nothing-here").await.unwrap().is_none());
}

#[tokio::test]
async fn write_then_read_returns_value() {
  let m = mirror().await;
  m.write("k", "[1,2,3]".to_string()).await.unwrap();
  assert_eq!(m.read("k").await.unwrap().as_deref(), Some("[1,2,3]"));
  assert!(m.updated_at("k").await.unwrap().is_some());
}

#[tokio::test]
async fn write_replaces_existing_value() {
  let m = mirror().await;
  m.write("k", "first".to_string()).await.unwrap();
  m.write("k", "second".to_string()).await.unwrap();
  assert_eq!(m.read("k").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn keys_are_independent() {
  let m = mirror().await;
  m.write("a", "1".to_string()).await.unwrap();
  m.write("b", "2".to_string()).await.unwrap();
  assert_eq!(m.read("a").await.unwrap().as_deref(), Some("1"));
  assert_eq!(m.read("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn contents_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("mirror.db");

  {
    let m = SqliteMirror::open(&path).await.unwrap();
    m.write(DEFAULT_MIRROR_KEY, "[]".to_string()).await.unwrap();
  }

  let m = SqliteMirror::open(&path).await.unwrap();
  assert_eq!(m.read(DEFAULT_MIRROR_KEY).await.unwrap().as_deref(), Some("[]"));
}

// ─── Behind a CardStore ──────────────────────────────────────────────────────

#[tokio::test]
async fn offline_card_store_persists_through_sqlite() {
  let m = mirror().await;
  let store = CardStore::offline(m.clone(), StoreOptions::default());

  let mut card = builtin_default();
  card.id = "42".to_string();
  card.slug = "forty-two".to_string();
  store.save(card.clone()).await.unwrap();

  let listing = store.list_all_with_source().await;
  assert_eq!(listing.source, Source::Mirror);
  assert_eq!(store.get_by_slug("forty-two").await, Some(card));

  let raw = m.read(DEFAULT_MIRROR_KEY).await.unwrap().unwrap();
  let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
  assert_eq!(stored.len(), 2);
  assert_eq!(stored[1]["fullName"], "سالم محمد ال سالم");
}
