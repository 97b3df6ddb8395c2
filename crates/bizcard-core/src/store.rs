//! The tiered card store and the collaborator traits it is built on.
//!
//! Two tiers back every [`CardStore`]:
//!
//! - an optional remote document collection ([`RemoteCollection`]), which is
//!   authoritative for reads whenever it returns at least one card;
//! - a local mirror ([`MirrorBlob`]), a single JSON array stored under one
//!   key, rewritten wholesale after every write.
//!
//! Reads never fail: they degrade remote → mirror → built-in default card.
//! Writes surface remote failures to the caller, but only after the mirror
//! has been rewritten from whatever data was readable.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  card::CardRecord,
  defaults::{DEFAULT_SLUG, builtin_default},
};

/// Mirror key used when none is configured.
pub const DEFAULT_MIRROR_KEY: &str = "awjtech_cards";

// ─── Collaborator traits ─────────────────────────────────────────────────────

/// A remote collection of card documents keyed by card `id`.
pub trait RemoteCollection: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every document in the collection.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<CardRecord>, Self::Error>> + Send + '_;

  /// Create or wholly replace the document for `card.id`.
  fn upsert<'a>(
    &'a self,
    card: &'a CardRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the document for `id`. Removing a missing document is not an
  /// error.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// A client-scoped key-value blob store.
pub trait MirrorBlob: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn read<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  fn write<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// Stand-in remote for stores running in offline/demo mode. Uninhabited, so
/// a `CardStore<NoRemote, _>` can never hold a remote tier.
#[derive(Debug, Clone, Copy)]
pub enum NoRemote {}

impl RemoteCollection for NoRemote {
  type Error = std::convert::Infallible;

  async fn list(&self) -> Result<Vec<CardRecord>, Self::Error> { match *self {} }

  async fn upsert(&self, _: &CardRecord) -> Result<(), Self::Error> { match *self {} }

  async fn delete(&self, _: &str) -> Result<(), Self::Error> { match *self {} }
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// What `save` does when another card already uses the slug.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SlugPolicy {
  /// Fail with [`Error::SlugTaken`].
  #[default]
  Reject,
  /// Append `-2`, `-3`, … until the slug is free.
  AutoSuffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
  pub mirror_key:  String,
  pub slug_policy: SlugPolicy,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      mirror_key:  DEFAULT_MIRROR_KEY.to_string(),
      slug_policy: SlugPolicy::default(),
    }
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// The tier a listing was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
  Remote,
  Mirror,
  BuiltinDefault,
}

impl Source {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Remote => "remote",
      Self::Mirror => "mirror",
      Self::BuiltinDefault => "builtin_default",
    }
  }
}

#[derive(Debug, Clone)]
pub struct Listing {
  pub source: Source,
  /// Cards in storage order.
  pub cards:  Vec<CardRecord>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Uniform read/write/delete over the remote and mirror tiers.
pub struct CardStore<R, M> {
  remote:  Option<R>,
  mirror:  M,
  options: StoreOptions,
}

impl<M: MirrorBlob> CardStore<NoRemote, M> {
  /// A store without a remote tier.
  pub fn offline(mirror: M, options: StoreOptions) -> Self {
    Self::new(None, mirror, options)
  }
}

impl<R, M> CardStore<R, M>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  /// `remote = None` is offline/demo mode and is fully supported.
  pub fn new(remote: Option<R>, mirror: M, options: StoreOptions) -> Self {
    Self { remote, mirror, options }
  }

  pub fn is_remote_configured(&self) -> bool { self.remote.is_some() }

  pub fn options(&self) -> &StoreOptions { &self.options }

  pub fn remote(&self) -> Option<&R> { self.remote.as_ref() }

  pub fn mirror(&self) -> &M { &self.mirror }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All cards and the tier they came from.
  ///
  /// A non-empty remote result is returned as-is; the mirror is not
  /// consulted. Otherwise the mirror is used, and if that is empty too, the
  /// built-in default card.
  pub async fn list_all_with_source(&self) -> Listing {
    if let Some(remote) = &self.remote {
      match remote.list().await {
        Ok(cards) if !cards.is_empty() => {
          tracing::debug!(count = cards.len(), "serving cards from remote");
          return Listing { source: Source::Remote, cards };
        }
        Ok(_) => tracing::debug!("remote collection is empty"),
        Err(e) => {
          tracing::warn!(error = %e, "remote fetch failed; falling back to mirror");
        }
      }
    }

    match self.read_mirror().await {
      Ok(Some(cards)) if !cards.is_empty() => {
        tracing::debug!(count = cards.len(), "serving cards from mirror");
        return Listing { source: Source::Mirror, cards };
      }
      Ok(_) => {}
      Err(e) => tracing::warn!(error = %e, "mirror unreadable; ignoring it"),
    }

    Listing {
      source: Source::BuiltinDefault,
      cards:  vec![builtin_default()],
    }
  }

  /// All cards in storage order. Never fails.
  pub async fn list_all(&self) -> Vec<CardRecord> {
    self.list_all_with_source().await.cards
  }

  /// The first card whose slug matches, in storage order.
  pub async fn get_by_slug(&self, slug: &str) -> Option<CardRecord> {
    self.list_all().await.into_iter().find(|c| c.slug == slug)
  }

  pub async fn get_by_id(&self, id: &str) -> Option<CardRecord> {
    self.list_all().await.into_iter().find(|c| c.id == id)
  }

  /// The card the public page shows for `slug`.
  ///
  /// A missing slug or the default slug short-circuits to the built-in
  /// default card; an unknown slug falls back to it.
  pub async fn public_card(&self, slug: Option<&str>) -> CardRecord {
    match slug {
      None => builtin_default(),
      Some(s) if s.is_empty() || s == DEFAULT_SLUG => builtin_default(),
      Some(s) => self.get_by_slug(s).await.unwrap_or_else(builtin_default),
    }
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Upsert `card` remotely (if configured), then resync the mirror.
  ///
  /// Returns the card as stored, which differs from the input only when
  /// [`SlugPolicy::AutoSuffix`] rewrote the slug. The slug policy only runs
  /// for new cards and changed slugs. An unreadable mirror blob is left in
  /// place and its error returned, as with [`delete`](Self::delete).
  pub async fn save(&self, mut card: CardRecord) -> Result<CardRecord> {
    card.check_required()?;

    let current = self.list_all_with_source().await;
    self.apply_slug_policy(&mut card, &current.cards)?;

    let remote_result = match &self.remote {
      Some(remote) => remote.upsert(&card).await.map_err(|e| {
        tracing::error!(id = %card.id, error = %e, "remote save failed");
        Error::remote(e)
      }),
      None => Ok(()),
    };

    // The listing is re-read so the mirror picks up the remote's full state.
    let listing = if self.remote.is_some() {
      self.list_all_with_source().await
    } else {
      current
    };
    let mirror_result = match self.check_overwrite(listing.source).await {
      Ok(()) => {
        let mut cards = listing.cards;
        match cards.iter().position(|c| c.id == card.id) {
          Some(idx) => cards[idx] = card.clone(),
          None => cards.push(card.clone()),
        }
        self.write_mirror(&cards).await
      }
      Err(e) => Err(e),
    };

    remote_result?;
    mirror_result?;
    tracing::info!(id = %card.id, slug = %card.slug, "card saved");
    Ok(card)
  }

  /// Delete remotely (if configured), then drop `id` from the mirror.
  ///
  /// An absent mirror blob is rewritten as an empty array. An unreadable one
  /// is left untouched and its read or parse error is returned.
  pub async fn delete(&self, id: &str) -> Result<()> {
    let remote_result = match &self.remote {
      Some(remote) => remote.delete(id).await.map_err(|e| {
        tracing::error!(id, error = %e, "remote delete failed");
        Error::remote(e)
      }),
      None => Ok(()),
    };

    let mirror_result = match self.read_mirror().await {
      Ok(cards) => {
        let mut cards = cards.unwrap_or_default();
        cards.retain(|c| c.id != id);
        self.write_mirror(&cards).await
      }
      Err(e) => Err(e),
    };

    remote_result?;
    mirror_result?;
    tracing::info!(id, "card deleted");
    Ok(())
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  async fn read_mirror(&self) -> Result<Option<Vec<CardRecord>>> {
    let blob = self
      .mirror
      .read(&self.options.mirror_key)
      .await
      .map_err(Error::mirror)?;
    match blob {
      Some(s) if !s.trim().is_empty() => Ok(Some(serde_json::from_str(&s)?)),
      _ => Ok(None),
    }
  }

  /// A listing that fell back to the built-in default may be hiding an
  /// unreadable mirror blob. Such a blob is never overwritten.
  async fn check_overwrite(&self, source: Source) -> Result<()> {
    if source != Source::BuiltinDefault {
      return Ok(());
    }
    self.read_mirror().await.map(|_| ()).inspect_err(|e| {
      tracing::error!(error = %e, "mirror unreadable; refusing to overwrite it");
    })
  }

  async fn write_mirror(&self, cards: &[CardRecord]) -> Result<()> {
    let blob = serde_json::to_string(cards)?;
    self
      .mirror
      .write(&self.options.mirror_key, blob)
      .await
      .map_err(|e| {
        tracing::error!(error = %e, "mirror write failed");
        Error::mirror(e)
      })
  }

  fn apply_slug_policy(
    &self,
    card: &mut CardRecord,
    current: &[CardRecord],
  ) -> Result<()> {
    // Keeping the stored slug is always allowed, even if another card
    // already shares it.
    if current.iter().any(|c| c.id == card.id && c.slug == card.slug) {
      return Ok(());
    }

    let owner_of = |slug: &str| {
      current
        .iter()
        .find(|c| c.id != card.id && c.slug == slug)
        .map(|c| c.id.clone())
    };

    let Some(owner) = owner_of(&card.slug) else {
      return Ok(());
    };

    match self.options.slug_policy {
      SlugPolicy::Reject => Err(Error::SlugTaken {
        slug: card.slug.clone(),
        owner,
      }),
      SlugPolicy::AutoSuffix => {
        let mut n = 2u32;
        let free = loop {
          let candidate = format!("{}-{n}", card.slug);
          if owner_of(&candidate).is_none() {
            break candidate;
          }
          n += 1;
        };
        tracing::info!(id = %card.id, from = %card.slug, to = %free, "slug taken; suffixed");
        card.slug = free;
        Ok(())
      }
    }
  }
}
