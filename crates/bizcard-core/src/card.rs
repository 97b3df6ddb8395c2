//! The card record — the unit of storage.
//!
//! A card is stored and replaced as a whole document. Field names serialise in
//! camelCase so remote documents and mirror blobs share one shape.

use serde::{Deserialize, Serialize};

use crate::portfolio::{ProjectRecord, ServiceRecord};

// ─── Language ────────────────────────────────────────────────────────────────

/// Which half of a bilingual text pair a reader wants.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
  #[default]
  Primary,
  Secondary,
}

/// A borrowed view over a bilingual pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized<'a> {
  pub primary:   &'a str,
  pub secondary: Option<&'a str>,
}

impl<'a> Localized<'a> {
  pub fn new(primary: &'a str, secondary: Option<&'a str>) -> Self {
    Self { primary, secondary }
  }

  /// The secondary value wins only when asked for and non-empty.
  pub fn get(&self, lang: Lang) -> &'a str {
    match (lang, self.secondary) {
      (Lang::Secondary, Some(s)) if !s.is_empty() => s,
      _ => self.primary,
    }
  }
}

// ─── Contact / social ────────────────────────────────────────────────────────

/// Phone numbers, email and location shown on the card. Empty strings are
/// allowed everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
  pub personal_phone: String,
  pub work_phone:     String,
  pub email:          String,
  pub company_phone:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location_en:    Option<String>,
}

impl ContactInfo {
  pub fn location(&self) -> Localized<'_> {
    Localized::new(
      self.location.as_deref().unwrap_or_default(),
      self.location_en.as_deref(),
    )
  }
}

/// Website plus the three fixed profile platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
  pub website:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub linkedin:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub twitter:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instagram: Option<String>,
}

// ─── CardRecord ──────────────────────────────────────────────────────────────

/// One person's digital business card.
///
/// `id` is assigned at creation and never reassigned; it is the write key for
/// both storage tiers. `slug` is the public URL key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
  pub id:                String,
  pub slug:              String,

  #[serde(default)]
  pub full_name:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub full_name_en:      Option<String>,
  #[serde(default)]
  pub title:             String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title_en:          Option<String>,
  #[serde(default)]
  pub company_name:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub company_name_en:   Option<String>,
  #[serde(default)]
  pub tagline:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tagline_en:        Option<String>,

  /// Opaque URL; never validated.
  #[serde(default)]
  pub profile_image_url: String,
  /// Opaque URL; never validated.
  #[serde(default)]
  pub company_logo_url:  String,

  #[serde(default)]
  pub about:             String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub about_en:          Option<String>,

  #[serde(default)]
  pub contact:           ContactInfo,
  #[serde(default)]
  pub social:            SocialLinks,
  #[serde(default)]
  pub services:          Vec<ServiceRecord>,
  #[serde(default)]
  pub projects:          Vec<ProjectRecord>,
}

impl CardRecord {
  pub fn name(&self) -> Localized<'_> {
    Localized::new(&self.full_name, self.full_name_en.as_deref())
  }

  pub fn title(&self) -> Localized<'_> {
    Localized::new(&self.title, self.title_en.as_deref())
  }

  pub fn company_name(&self) -> Localized<'_> {
    Localized::new(&self.company_name, self.company_name_en.as_deref())
  }

  pub fn tagline(&self) -> Localized<'_> {
    Localized::new(&self.tagline, self.tagline_en.as_deref())
  }

  pub fn about(&self) -> Localized<'_> {
    Localized::new(&self.about, self.about_en.as_deref())
  }

  // ── Services ──────────────────────────────────────────────────────────────

  pub fn push_service(&mut self, service: ServiceRecord) {
    self.services.push(service);
  }

  /// Drop every service with `id`. Returns `true` if anything was removed.
  pub fn remove_service(&mut self, id: &str) -> bool {
    let before = self.services.len();
    self.services.retain(|s| s.id != id);
    self.services.len() != before
  }

  pub fn service_mut(&mut self, id: &str) -> Option<&mut ServiceRecord> {
    self.services.iter_mut().find(|s| s.id == id)
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  pub fn push_project(&mut self, project: ProjectRecord) {
    self.projects.push(project);
  }

  /// Drop every project with `id`. Returns `true` if anything was removed.
  pub fn remove_project(&mut self, id: &str) -> bool {
    let before = self.projects.len();
    self.projects.retain(|p| p.id != id);
    self.projects.len() != before
  }

  pub fn project_mut(&mut self, id: &str) -> Option<&mut ProjectRecord> {
    self.projects.iter_mut().find(|p| p.id == id)
  }

  /// The only validation the store performs: `id` and `slug` must be present.
  pub fn check_required(&self) -> crate::Result<()> {
    if self.id.trim().is_empty() {
      return Err(crate::Error::MissingField("id"));
    }
    if self.slug.trim().is_empty() {
      return Err(crate::Error::MissingField("slug"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::defaults::builtin_default;

  #[test]
  fn secondary_falls_back_to_primary_when_empty() {
    let pair = Localized::new("سالم", Some(""));
    assert_eq!(pair.get(Lang::Secondary), "سالم");
    let pair = Localized::new("سالم", None);
    assert_eq!(pair.get(Lang::Secondary), "سالم");
    let pair = Localized::new("سالم", Some("Salem"));
    assert_eq!(pair.get(Lang::Secondary), "Salem");
    assert_eq!(pair.get(Lang::Primary), "سالم");
  }

  #[test]
  fn json_uses_camel_case_and_omits_absent_options() {
    let mut card = builtin_default();
    card.full_name_en = None;
    let json = serde_json::to_value(&card).unwrap();
    assert!(json.get("fullName").is_some());
    assert!(json.get("fullNameEn").is_none());
    assert!(json["contact"].get("personalPhone").is_some());
    assert!(json["social"].get("linkedin").is_none());
  }

  #[test]
  fn decodes_sparse_document() {
    let json = serde_json::json!({
      "id": "42",
      "slug": "someone",
    });
    let card: CardRecord = serde_json::from_value(json).unwrap();
    assert_eq!(card.id, "42");
    assert_eq!(card.full_name, "");
    assert_eq!(card.title, "");
    assert_eq!(card.company_name, "");
    assert!(card.services.is_empty());
    assert_eq!(card.contact, ContactInfo::default());
  }

  #[test]
  fn remove_service_filters_by_id_and_keeps_order() {
    let mut card = builtin_default();
    assert!(card.remove_service("2"));
    let ids: Vec<_> = card.services.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "3", "4"]);
    assert!(!card.remove_service("missing"));
  }

  #[test]
  fn project_mut_edits_in_place() {
    let mut card = builtin_default();
    card.project_mut("p2").unwrap().title = "Renamed".into();
    assert_eq!(card.projects[1].title, "Renamed");
    assert!(card.project_mut("nope").is_none());
  }

  #[test]
  fn check_required_rejects_blank_slug() {
    let mut card = builtin_default();
    card.slug = "  ".into();
    assert!(matches!(
      card.check_required(),
      Err(crate::Error::MissingField("slug"))
    ));
  }
}
