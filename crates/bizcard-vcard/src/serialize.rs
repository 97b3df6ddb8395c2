//! vCard 3.0 serializer.
//!
//! Produces CRLF line endings and folds at 75 octets per RFC 6350 §3.2.

use bizcard_core::CardRecord;

use crate::{ExportOptions, card_url, split_name};

// ─── RFC 6350 line folding ────────────────────────────────────────────────────

/// Emit `s` as one logical line, folding at 75 octets with CRLF + SP continuation.
pub(crate) fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{}\r\n", s);
  }

  let mut result = String::new();
  let total = s.len();
  let mut pos = 0usize;
  let mut first = true;

  while pos < total {
    let limit = if first { 75 } else { 74 };
    let end   = if pos + limit >= total {
      total
    } else {
      // Walk back to the nearest valid UTF-8 char boundary
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      e
    };

    if !first {
      result.push(' ');
    }
    result.push_str(&s[pos..end]);
    result.push_str("\r\n");
    pos   = end;
    first = false;
  }

  result
}

// ─── Value escaping ───────────────────────────────────────────────────────────

/// Escape a text value or one component of a structured value (N / ADR):
/// `\`, `,`, `;`, newline. A bare CR is folded into the newline escape too.
fn escape_value(s: &str) -> String {
  s.replace('\\', "\\\\")
   .replace(',', "\\,")
   .replace(';', "\\;")
   .replace("\r\n", "\\n")
   .replace(['\r', '\n'], "\\n")
}

/// Keep only digits and `+`.
fn clean_phone(number: &str) -> String {
  number.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

// ─── Serializer ───────────────────────────────────────────────────────────────

fn note(card: &CardRecord, options: &ExportOptions) -> String {
  let services = card
    .services
    .iter()
    .map(|s| s.name().get(options.lang))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "{} | {}: {} | {}: {}",
    card.tagline().get(options.lang),
    options.labels.services,
    services,
    options.labels.link,
    card_url(&options.origin, &card.slug),
  )
}

pub fn serialize(card: &CardRecord, options: &ExportOptions) -> String {
  let lang = options.lang;
  let full_name = card.name().get(lang);
  let (given, family) = split_name(full_name);

  let mut out = String::new();
  out.push_str("BEGIN:VCARD\r\n");
  out.push_str("VERSION:3.0\r\n");
  out.push_str(&fold_line(&format!("FN:{}", escape_value(full_name))));
  out.push_str(&fold_line(&format!(
    "N:{};{};;;",
    escape_value(family),
    escape_value(given)
  )));
  out.push_str(&fold_line(&format!("ORG:{}", escape_value(card.company_name().get(lang)))));
  out.push_str(&fold_line(&format!("TITLE:{}", escape_value(card.title().get(lang)))));
  out.push_str(&fold_line(&format!(
    "TEL;TYPE=CELL:{}",
    clean_phone(&card.contact.personal_phone)
  )));
  out.push_str(&fold_line(&format!(
    "TEL;TYPE=WORK:{}",
    clean_phone(&card.contact.company_phone)
  )));
  out.push_str(&fold_line(&format!("EMAIL:{}", escape_value(&card.contact.email))));
  out.push_str(&fold_line(&format!("URL:{}", escape_value(&card.social.website))));
  out.push_str(&fold_line(&format!("NOTE:{}", escape_value(&note(card, options)))));
  out.push_str(&fold_line(&format!(
    "ADR;TYPE=WORK:;;{};;;;",
    escape_value(card.contact.location().get(lang))
  )));
  out.push_str("END:VCARD\r\n");
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
