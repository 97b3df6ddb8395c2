//! In-process implementations of the collaborator traits.
//!
//! Used as fakes in tests across the workspace and as a throwaway backend for
//! demos. Clones share state, so a test can keep a handle after moving one
//! into a [`CardStore`](crate::store::CardStore).

use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
  },
};

use thiserror::Error;

use crate::{
  card::CardRecord,
  store::{MirrorBlob, RemoteCollection},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("collection is unreachable")]
  Unreachable,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─── Remote ──────────────────────────────────────────────────────────────────

/// A remote collection held in memory, with a switch that makes every call
/// fail as if the network were down.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
  docs:        Arc<Mutex<Vec<CardRecord>>>,
  unreachable: Arc<AtomicBool>,
}

impl MemoryCollection {
  pub fn new() -> Self { Self::default() }

  pub fn with_cards(cards: Vec<CardRecord>) -> Self {
    let this = Self::default();
    *lock(&this.docs) = cards;
    this
  }

  pub fn set_unreachable(&self, unreachable: bool) {
    self.unreachable.store(unreachable, Ordering::SeqCst);
  }

  /// Current documents, bypassing the reachability switch.
  pub fn snapshot(&self) -> Vec<CardRecord> { lock(&self.docs).clone() }

  fn check(&self) -> Result<(), MemoryError> {
    if self.unreachable.load(Ordering::SeqCst) {
      Err(MemoryError::Unreachable)
    } else {
      Ok(())
    }
  }
}

impl RemoteCollection for MemoryCollection {
  type Error = MemoryError;

  async fn list(&self) -> Result<Vec<CardRecord>, MemoryError> {
    self.check()?;
    Ok(self.snapshot())
  }

  async fn upsert(&self, card: &CardRecord) -> Result<(), MemoryError> {
    self.check()?;
    let mut docs = lock(&self.docs);
    match docs.iter_mut().find(|c| c.id == card.id) {
      Some(existing) => *existing = card.clone(),
      None => docs.push(card.clone()),
    }
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<(), MemoryError> {
    self.check()?;
    lock(&self.docs).retain(|c| c.id != id);
    Ok(())
  }
}

// ─── Mirror ──────────────────────────────────────────────────────────────────

/// A key-value blob map held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryMirror {
  blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryMirror {
  pub fn new() -> Self { Self::default() }

  /// Seed `key` with a raw blob, valid JSON or not.
  pub fn insert_raw(&self, key: &str, value: &str) {
    lock(&self.blobs).insert(key.to_string(), value.to_string());
  }

  pub fn get_raw(&self, key: &str) -> Option<String> {
    lock(&self.blobs).get(key).cloned()
  }
}

impl MirrorBlob for MemoryMirror {
  type Error = std::convert::Infallible;

  async fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.get_raw(key))
  }

  async fn write(&self, key: &str, value: String) -> Result<(), Self::Error> {
    lock(&self.blobs).insert(key.to_string(), value);
    Ok(())
  }
}
