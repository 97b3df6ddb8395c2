//! Minimal content-line reader.
//!
//! Only what is needed to read an exported card back: unfolding, splitting a
//! structured value into components and unescaping them.

/// Join CRLF+SP (or LF+SP / LF+HT) continuation lines (RFC 6350 §3.2).
/// Tolerates bare LF line endings for real-world robustness.
pub(crate) fn unfold_lines(s: &str) -> Vec<String> {
  let mut lines: Vec<String> = Vec::new();
  for raw in s.split('\n') {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    if line.starts_with(' ') || line.starts_with('\t') {
      if let Some(last) = lines.last_mut() {
        last.push_str(&line[1..]);
      }
      // else: leading continuation with no prior line — discard
    } else {
      lines.push(line.to_string());
    }
  }
  lines.retain(|l| !l.is_empty());
  lines
}

/// Find the first `:` that is not inside a double-quoted parameter value.
fn find_unquoted_colon(s: &str) -> Option<usize> {
  let mut in_quotes = false;
  for (i, c) in s.char_indices() {
    match c {
      '"' => in_quotes = !in_quotes,
      ':' if !in_quotes => return Some(i),
      _ => {}
    }
  }
  None
}

/// Split a structured value on `;` that is not backslash-escaped, and
/// unescape each component.
fn split_components(value: &str) -> Vec<String> {
  let mut parts = Vec::new();
  let mut current = String::new();
  let mut chars = value.chars();

  while let Some(c) = chars.next() {
    match c {
      '\\' => match chars.next() {
        Some('n') | Some('N') => current.push('\n'),
        Some(other) => current.push(other),
        None => current.push('\\'),
      },
      ';' => parts.push(std::mem::take(&mut current)),
      c => current.push(c),
    }
  }
  parts.push(current);
  parts
}

/// `(given, family)` from the first `N` property.
pub(crate) fn parse_name(vcard: &str) -> Option<(String, String)> {
  unfold_lines(vcard).into_iter().find_map(|line| {
    let colon = find_unquoted_colon(&line)?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);
    let name = head.split(';').next().unwrap_or_default();
    if !name.eq_ignore_ascii_case("N") {
      return None;
    }
    let mut components = split_components(value).into_iter();
    let family = components.next().unwrap_or_default();
    let given = components.next().unwrap_or_default();
    Some((given, family))
  })
}
