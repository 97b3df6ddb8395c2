//! `GET /api/cards/{slug}/vcard` — the "save contact" download.

use axum::{
  extract::{Path, Query, State},
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use bizcard_core::{
  Lang,
  defaults::{DEFAULT_SLUG, builtin_default},
  store::{MirrorBlob, RemoteCollection},
};
use bizcard_vcard::{ExportOptions, export_file_name, serialize};
use serde::Deserialize;

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
pub struct VcardParams {
  #[serde(default)]
  pub lang: Lang,
}

pub async fn download<R, M>(
  State(state): State<AppState<R, M>>,
  Path(slug): Path<String>,
  Query(params): Query<VcardParams>,
) -> Result<Response, Error>
where
  R: RemoteCollection,
  M: MirrorBlob,
{
  let card = match state.store.get_by_slug(&slug).await {
    Some(card) => card,
    None if slug == DEFAULT_SLUG => builtin_default(),
    None => return Err(Error::NotFound(format!("no card with slug {slug:?}"))),
  };

  let origin = state.config.public_origin.as_str();
  let options = match params.lang {
    Lang::Primary => ExportOptions::new(origin),
    Lang::Secondary => ExportOptions::secondary(origin),
  };
  let body = serialize(&card, &options);

  let disposition = HeaderValue::from_str(&content_disposition(&export_file_name(&card)))
    .map_err(|e| Error::Internal(e.to_string()))?;

  Ok(
    (
      [
        (header::CONTENT_TYPE, HeaderValue::from_static("text/vcard; charset=utf-8")),
        (header::CONTENT_DISPOSITION, disposition),
      ],
      body,
    )
      .into_response(),
  )
}

// ─── Content-Disposition ─────────────────────────────────────────────────────

/// `attachment` with a plain ASCII `filename` for old clients and the exact
/// name as an RFC 5987 `filename*`.
pub fn content_disposition(file_name: &str) -> String {
  let fallback: String = file_name
    .chars()
    .map(|c| match c {
      '"' | '\\' => '_',
      c if c.is_ascii() && !c.is_ascii_control() => c,
      _ => '_',
    })
    .collect();
  format!(
    "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
    encode_ext_value(file_name)
  )
}

/// Percent-encode everything outside RFC 5987 `attr-char`.
fn encode_ext_value(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for b in s.bytes() {
    match b {
      b'A'..=b'Z'
      | b'a'..=b'z'
      | b'0'..=b'9'
      | b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~' => {
        out.push(b as char)
      }
      _ => out.push_str(&format!("%{b:02X}")),
    }
  }
  out
}
