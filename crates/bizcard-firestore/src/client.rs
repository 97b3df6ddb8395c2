//! [`FirestoreCollection`] — the Firestore REST implementation of
//! [`RemoteCollection`].

use std::time::Duration;

use bizcard_core::{CardRecord, store::RemoteCollection};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::{
  Error, FirestoreConfig, Result,
  value::{decode_fields, encode_fields},
};

const PAGE_SIZE: u32 = 300;

#[derive(Debug, Deserialize)]
struct Document {
  name:   String,
  #[serde(default)]
  fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
  #[serde(default)]
  documents:       Vec<Document>,
  next_page_token: Option<String>,
}

/// One Firestore collection holding a document per card.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct FirestoreCollection {
  client: Client,
  base:   Url,
  config: FirestoreConfig,
}

impl FirestoreCollection {
  pub fn new(config: FirestoreConfig) -> Result<Self> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
      url: config.base_url.clone(),
      reason,
    };
    let base = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
      return Err(invalid("not a hierarchical url".to_string()));
    }

    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, base, config })
  }

  pub fn config(&self) -> &FirestoreConfig { &self.config }

  /// `{base}/projects/{p}/databases/{d}/documents/{collection}[/{id}]`, with
  /// every segment percent-encoded.
  fn documents_url(&self, id: Option<&str>) -> Result<Url> {
    let mut url = self.base.clone();
    {
      let mut segments = url.path_segments_mut().map_err(|()| Error::InvalidBaseUrl {
        url:    self.config.base_url.clone(),
        reason: "not a hierarchical url".to_string(),
      })?;
      segments.pop_if_empty().extend([
        "projects",
        self.config.project_id.as_str(),
        "databases",
        self.config.database.as_str(),
        "documents",
        self.config.collection.as_str(),
      ]);
      if let Some(id) = id {
        segments.push(id);
      }
    }
    Ok(url)
  }

  fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
    let req = req.query(&[("key", &self.config.api_key)]);
    match &self.config.bearer_token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  async fn send(&self, req: RequestBuilder) -> Result<Response> {
    let resp = self.authorize(req).send().await?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Status { status: status.as_u16(), body })
  }

  /// Decode one document. A document without an `id` field takes the last
  /// segment of its resource name.
  fn decode_document(doc: &Document) -> Result<CardRecord> {
    let mut fields = decode_fields(&doc.fields)?;
    if !fields.contains_key("id") {
      if let Some(id) = doc.name.rsplit('/').next() {
        fields.insert("id".to_string(), Value::String(id.to_string()));
      }
    }
    Ok(serde_json::from_value(Value::Object(fields))?)
  }
}

// ─── RemoteCollection impl ───────────────────────────────────────────────────

impl RemoteCollection for FirestoreCollection {
  type Error = Error;

  async fn list(&self) -> Result<Vec<CardRecord>> {
    let url = self.documents_url(None)?;
    let mut cards = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
      let mut req = self
        .client
        .get(url.clone())
        .query(&[("pageSize", PAGE_SIZE)]);
      if let Some(token) = &page_token {
        req = req.query(&[("pageToken", token)]);
      }
      let page: ListPage = self.send(req).await?.json().await?;

      for doc in &page.documents {
        match Self::decode_document(doc) {
          Ok(card) => cards.push(card),
          Err(e) => tracing::warn!(document = %doc.name, error = %e, "skipping undecodable card document"),
        }
      }

      match page.next_page_token {
        Some(token) if !token.is_empty() => page_token = Some(token),
        _ => break,
      }
    }

    tracing::debug!(count = cards.len(), "listed firestore documents");
    Ok(cards)
  }

  async fn upsert(&self, card: &CardRecord) -> Result<()> {
    let url = self.documents_url(Some(&card.id))?;
    let fields = match serde_json::to_value(card)? {
      Value::Object(map) => encode_fields(&map),
      other => return Err(Error::Decode(format!("card did not encode as an object: {other}"))),
    };

    // No update mask: the stored document is replaced wholesale.
    self
      .send(self.client.patch(url).json(&json!({ "fields": fields })))
      .await?;
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<()> {
    let url = self.documents_url(Some(id))?;
    match self.send(self.client.delete(url)).await {
      Ok(_) => Ok(()),
      Err(Error::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(()),
      Err(e) => Err(e),
    }
  }
}
