//! The built-in default card and the templates used to create new records.
//!
//! The default card is served when neither storage tier has any data, and its
//! slug doubles as the site root.

use chrono::{DateTime, Utc};

use crate::{
  card::{CardRecord, ContactInfo, SocialLinks},
  portfolio::{ProjectRecord, ServiceRecord},
};

/// Identifier of the built-in default card.
pub const DEFAULT_ID: &str = "default_001";

/// Slug of the built-in default card; the public root resolves to it.
pub const DEFAULT_SLUG: &str = "salem-alsalem";

/// A timestamp-derived identifier (unix milliseconds, decimal).
pub fn new_record_id(now: DateTime<Utc>) -> String {
  now.timestamp_millis().to_string()
}

fn service(id: &str, name: &str, name_en: &str, desc: &str, desc_en: &str, icon: &str) -> ServiceRecord {
  ServiceRecord {
    id:             id.to_string(),
    name:           name.to_string(),
    name_en:        Some(name_en.to_string()),
    description:    Some(desc.to_string()),
    description_en: Some(desc_en.to_string()),
    icon:           Some(icon.to_string()),
    pdf_url:        None,
    link_url:       None,
    images:         Some(Vec::new()),
  }
}

fn project(
  id: &str,
  title: &str,
  title_en: &str,
  desc: &str,
  desc_en: &str,
  images: &[&str],
) -> ProjectRecord {
  ProjectRecord {
    id:             id.to_string(),
    title:          title.to_string(),
    title_en:       Some(title_en.to_string()),
    description:    desc.to_string(),
    description_en: Some(desc_en.to_string()),
    thumbnail_url:  format!("https://picsum.photos/seed/{id}/600/400"),
    video_url:      None,
    pdf_url:        None,
    link_url:       None,
    images:         images.iter().map(|s| s.to_string()).collect(),
  }
}

/// The built-in default card.
pub fn builtin_default() -> CardRecord {
  CardRecord {
    id:                DEFAULT_ID.to_string(),
    slug:              DEFAULT_SLUG.to_string(),
    full_name:         "سالم محمد ال سالم".to_string(),
    full_name_en:      Some("Salem Mohammed Al-Salem".to_string()),
    title:             "المدير التنفيذي".to_string(),
    title_en:          Some("Chief Executive Officer".to_string()),
    company_name:      "أوج تك".to_string(),
    company_name_en:   Some("Awj Tech".to_string()),
    tagline:           "شريك ومؤسس لشركة أوج تك".to_string(),
    tagline_en:        Some("Co-founder & Partner at Awj Tech".to_string()),
    profile_image_url: "https://i.pravatar.cc/300?img=11".to_string(),
    company_logo_url:  "https://picsum.photos/200/200?blur=2".to_string(),
    about:             "رائد أعمال شغوف بالتقنية والابتكار، أسعى لتقديم حلول رقمية متكاملة تساهم في تطوير بيئة الأعمال من خلال شركة أوج تك.".to_string(),
    about_en:          Some("A tech-savvy entrepreneur passionate about innovation, striving to provide integrated digital solutions that contribute to business ecosystem development through Awj Tech.".to_string()),
    contact:           ContactInfo {
      personal_phone: "0580100070".to_string(),
      work_phone:     "0580100070".to_string(),
      email:          "salem.alsalem@awijtech.com".to_string(),
      company_phone:  "920051099".to_string(),
      location:       Some("الرياض، المملكة العربية السعودية".to_string()),
      location_en:    Some("Riyadh, Kingdom of Saudi Arabia".to_string()),
    },
    social:            SocialLinks {
      website:   "https://www.awijtech.com/".to_string(),
      linkedin:  None,
      twitter:   None,
      instagram: None,
    },
    services:          vec![
      service(
        "1",
        "تطوير البرمجيات",
        "Software Development",
        "بناء تطبيقات ومواقع مخصصة.",
        "Building custom web and mobile applications.",
        "https://cdn-icons-png.flaticon.com/512/2920/2920277.png",
      ),
      service(
        "2",
        "التحول الرقمي",
        "Digital Transformation",
        "مساعدة الشركات في تبني التقنية.",
        "Helping businesses adopt technology efficiently.",
        "https://cdn-icons-png.flaticon.com/512/10842/10842408.png",
      ),
      service(
        "3",
        "استشارات تقنية",
        "Tech Consultancy",
        "تقديم المشورة للحلول التقنية المعقدة.",
        "Providing advice for complex technical solutions.",
        "https://cdn-icons-png.flaticon.com/512/1584/1584892.png",
      ),
      service(
        "4",
        "حلول السحابة",
        "Cloud Solutions",
        "إدارة واستضافة الخدمات السحابية.",
        "Managing and hosting cloud services.",
        "https://cdn-icons-png.flaticon.com/512/2316/2316021.png",
      ),
    ],
    projects:          vec![
      project(
        "p1",
        "نظام إدارة الموارد",
        "ERP System",
        "نظام متكامل لإدارة موارد المؤسسات الكبيرة مع لوحات تحكم ذكية.",
        "Integrated Enterprise Resource Planning system with smart dashboards.",
        &[
          "https://picsum.photos/seed/p1-1/800/600",
          "https://picsum.photos/seed/p1-2/800/600",
        ],
      ),
      project(
        "p2",
        "تطبيق التوصيل الذكي",
        "Smart Delivery App",
        "منصة توصيل تعتمد على الذكاء الاصطناعي لتحسين المسارات.",
        "AI-powered delivery platform for route optimization.",
        &["https://picsum.photos/seed/p2-1/800/600"],
      ),
      project(
        "p3",
        "بوابة الدفع الإلكتروني",
        "Payment Gateway",
        "حلول دفع آمنة وسريعة للمتاجر الإلكترونية.",
        "Secure and fast payment solutions for e-commerce.",
        &["https://picsum.photos/seed/p3-1/800/600"],
      ),
    ],
  }
}

impl CardRecord {
  /// A new, unsaved card: the default card's contact details with a fresh
  /// timestamp id, a derived `user-XXXX` slug, placeholder name and title,
  /// and no services or projects.
  pub fn new_template(now: DateTime<Utc>) -> Self {
    let id = new_record_id(now);
    let tail_start = id
      .char_indices()
      .rev()
      .nth(3)
      .map(|(i, _)| i)
      .unwrap_or(0);
    let slug = format!("user-{}", &id[tail_start..]);

    Self {
      id,
      slug,
      full_name: "اسم جديد".to_string(),
      full_name_en: Some("New Name".to_string()),
      title: "المسمى الوظيفي".to_string(),
      title_en: Some("Job Title".to_string()),
      services: Vec::new(),
      projects: Vec::new(),
      ..builtin_default()
    }
  }
}
