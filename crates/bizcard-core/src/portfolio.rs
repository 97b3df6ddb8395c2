//! Nested service and project entries of a card.
//!
//! Both lists keep insertion order and are edited by `id`.

use serde::{Deserialize, Serialize};

use crate::card::Localized;

/// An offered service shown on the public card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
  pub id:             String,
  pub name:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name_en:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description_en: Option<String>,
  /// Icon image URL.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon:           Option<String>,
  /// Attached document (brochure) URL.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_url:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link_url:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub images:         Option<Vec<String>>,
}

impl ServiceRecord {
  /// A fresh entry as added from the admin dashboard.
  pub fn placeholder(id: impl Into<String>) -> Self {
    Self {
      id:             id.into(),
      name:           "خدمة جديدة".to_string(),
      name_en:        Some("New Service".to_string()),
      description:    None,
      description_en: None,
      icon:           Some(String::new()),
      pdf_url:        None,
      link_url:       None,
      images:         Some(Vec::new()),
    }
  }

  pub fn name(&self) -> Localized<'_> {
    Localized::new(&self.name, self.name_en.as_deref())
  }

  pub fn description(&self) -> Localized<'_> {
    Localized::new(
      self.description.as_deref().unwrap_or_default(),
      self.description_en.as_deref(),
    )
  }
}

/// A gallery entry on the public card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
  pub id:             String,
  pub title:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title_en:       Option<String>,
  #[serde(default)]
  pub description:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description_en: Option<String>,
  #[serde(default)]
  pub thumbnail_url:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub video_url:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pdf_url:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link_url:       Option<String>,
  #[serde(default)]
  pub images:         Vec<String>,
}

impl ProjectRecord {
  pub const PLACEHOLDER_THUMBNAIL: &'static str =
    "https://via.placeholder.com/600x400";

  /// A fresh entry as added from the admin dashboard.
  pub fn placeholder(id: impl Into<String>) -> Self {
    Self {
      id:             id.into(),
      title:          "مشروع جديد".to_string(),
      title_en:       Some("New Project".to_string()),
      description:    String::new(),
      description_en: Some(String::new()),
      thumbnail_url:  Self::PLACEHOLDER_THUMBNAIL.to_string(),
      video_url:      None,
      pdf_url:        None,
      link_url:       None,
      images:         Vec::new(),
    }
  }

  pub fn title(&self) -> Localized<'_> {
    Localized::new(&self.title, self.title_en.as_deref())
  }

  pub fn description(&self) -> Localized<'_> {
    Localized::new(&self.description, self.description_en.as_deref())
  }
}
