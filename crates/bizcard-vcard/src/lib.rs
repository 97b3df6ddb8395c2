//! vCard 3.0 export for business cards.
//!
//! Turns one [`CardRecord`] into the contact block a phone imports when the
//! visitor taps "save contact". Pure and synchronous; no HTTP or storage
//! dependencies.
//!
//! # Quick start
//!
//! ```
//! use bizcard_core::defaults::builtin_default;
//! use bizcard_vcard::{ExportOptions, serialize};
//!
//! let card = builtin_default();
//! let vcard = serialize(&card, &ExportOptions::new("https://cards.example.com"));
//! assert!(vcard.starts_with("BEGIN:VCARD\r\n"));
//! ```

mod parse;
mod serialize;

use bizcard_core::{CardRecord, Lang};
use serde::{Deserialize, Serialize};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Labels used inside the `NOTE` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLabels {
  pub services: String,
  pub link:     String,
}

impl NoteLabels {
  /// Labels matching the primary (Arabic) card text.
  pub fn primary() -> Self {
    Self {
      services: "خدماتنا".to_string(),
      link:     "رابط المشاريع والملف الرقمي".to_string(),
    }
  }

  pub fn english() -> Self {
    Self {
      services: "Our services".to_string(),
      link:     "Projects & digital card".to_string(),
    }
  }
}

impl Default for NoteLabels {
  fn default() -> Self { Self::primary() }
}

/// Everything the serializer needs beyond the card itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
  /// Scheme and host the public page is served from, e.g.
  /// `https://cards.example.com`. The card link is `{origin}/#/{slug}`.
  pub origin: String,
  pub lang:   Lang,
  pub labels: NoteLabels,
}

impl ExportOptions {
  pub fn new(origin: impl Into<String>) -> Self {
    Self {
      origin: origin.into(),
      lang:   Lang::Primary,
      labels: NoteLabels::primary(),
    }
  }

  /// Export the secondary-language text with English note labels.
  pub fn secondary(origin: impl Into<String>) -> Self {
    Self {
      origin: origin.into(),
      lang:   Lang::Secondary,
      labels: NoteLabels::english(),
    }
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Serialize `card` as a vCard 3.0 string (CRLF line endings, folded at 75
/// octets, text values escaped).
pub fn serialize(card: &CardRecord, options: &ExportOptions) -> String {
  serialize::serialize(card, options)
}

/// The canonical public link for `card` under `origin`.
pub fn card_url(origin: &str, slug: &str) -> String {
  format!("{}/#/{}", origin.trim_end_matches('/'), slug)
}

/// Split a full name the way the `N` property is built: the first token is
/// the given name and the last token the family name. Middle tokens are
/// dropped.
pub fn split_name(full_name: &str) -> (&str, &str) {
  let mut tokens = full_name.split_whitespace();
  let given = tokens.next().unwrap_or_default();
  let family = tokens.next_back().unwrap_or(given);
  (given, family)
}

/// Read the `(given, family)` pair back out of a serialized vCard's `N`
/// property. Returns `None` if there is no `N` line.
pub fn parse_name(vcard: &str) -> Option<(String, String)> {
  parse::parse_name(vcard)
}

/// File name offered for download: the primary full name plus `.vcf`.
///
/// Path separators and control characters become `_`; a blank name yields
/// `card.vcf`.
pub fn export_file_name(card: &CardRecord) -> String {
  let stem: String = card
    .full_name
    .trim()
    .chars()
    .map(|c| match c {
      '/' | '\\' => '_',
      c if c.is_control() => '_',
      c => c,
    })
    .collect();
  if stem.is_empty() {
    "card.vcf".to_string()
  } else {
    format!("{stem}.vcf")
  }
}

// ─── Round-trip tests ────────────────────────────────────────────────────────
