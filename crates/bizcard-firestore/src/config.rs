use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection settings for one Firestore collection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
  pub project_id:   String,
  pub api_key:      String,
  pub database:     String,
  pub collection:   String,
  /// Everything before `/projects/...`. Point this at an emulator for local
  /// runs.
  pub base_url:     String,
  /// Sent as `Authorization: Bearer ...` when present.
  pub bearer_token: Option<String>,
}

impl Default for FirestoreConfig {
  fn default() -> Self {
    Self {
      project_id:   String::new(),
      api_key:      String::new(),
      database:     "(default)".to_string(),
      collection:   "cards".to_string(),
      base_url:     "https://firestore.googleapis.com/v1".to_string(),
      bearer_token: None,
    }
  }
}

impl FirestoreConfig {
  /// Whether the settings look real enough to use. Anything else runs the
  /// store in offline mode.
  pub fn is_configured(&self) -> bool {
    !self.project_id.trim().is_empty() && self.api_key.len() > 10
  }
}

impl fmt::Debug for FirestoreConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FirestoreConfig")
      .field("project_id", &self.project_id)
      .field("api_key", &"<redacted>")
      .field("database", &self.database)
      .field("collection", &self.collection)
      .field("base_url", &self.base_url)
      .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}
