//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore wraps every value in a single-key object naming its type, e.g.
//! `{"stringValue": "x"}` or `{"mapValue": {"fields": {...}}}`. Integers travel
//! as decimal strings.

use serde_json::{Map, Value, json};

use crate::{Error, Result};

// ─── Encoding ────────────────────────────────────────────────────────────────

pub fn encode_value(value: &Value) -> Value {
  match value {
    Value::Null => json!({ "nullValue": null }),
    Value::Bool(b) => json!({ "booleanValue": b }),
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        json!({ "integerValue": i.to_string() })
      } else if let Some(u) = n.as_u64() {
        json!({ "integerValue": u.to_string() })
      } else {
        json!({ "doubleValue": n })
      }
    }
    Value::String(s) => json!({ "stringValue": s }),
    Value::Array(items) => {
      let values: Vec<Value> = items.iter().map(encode_value).collect();
      if values.is_empty() {
        json!({ "arrayValue": {} })
      } else {
        json!({ "arrayValue": { "values": values } })
      }
    }
    Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
  }
}

/// Encode the members of a JSON object as a Firestore `fields` map.
pub fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
  map
    .iter()
    .map(|(k, v)| (k.clone(), encode_value(v)))
    .collect()
}

// ─── Decoding ────────────────────────────────────────────────────────────────

fn malformed(kind: &str, inner: &Value) -> Error {
  Error::Decode(format!("{kind}: {inner}"))
}

pub fn decode_value(value: &Value) -> Result<Value> {
  let (kind, inner) = value
    .as_object()
    .and_then(|obj| obj.iter().next())
    .ok_or_else(|| Error::Decode(format!("not a typed value: {value}")))?;

  match kind.as_str() {
    "nullValue" => Ok(Value::Null),
    "booleanValue" => inner
      .as_bool()
      .map(Value::Bool)
      .ok_or_else(|| malformed(kind, inner)),
    "integerValue" => match inner {
      Value::String(s) => s
        .parse::<i64>()
        .map(Value::from)
        .map_err(|_| malformed(kind, inner)),
      Value::Number(n) => Ok(Value::Number(n.clone())),
      _ => Err(malformed(kind, inner)),
    },
    "doubleValue" => match inner {
      Value::Number(n) => Ok(Value::Number(n.clone())),
      // "NaN" / "Infinity" have no JSON form.
      Value::String(_) => Ok(Value::Null),
      _ => Err(malformed(kind, inner)),
    },
    "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
      .as_str()
      .map(|s| Value::String(s.to_string()))
      .ok_or_else(|| malformed(kind, inner)),
    "geoPointValue" => Ok(inner.clone()),
    "arrayValue" => {
      let values = match inner.get("values") {
        None => return Ok(Value::Array(Vec::new())),
        Some(Value::Array(values)) => values,
        Some(_) => return Err(malformed(kind, inner)),
      };
      values
        .iter()
        .map(decode_value)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
    }
    "mapValue" => match inner.get("fields") {
      None => Ok(Value::Object(Map::new())),
      Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
      Some(_) => Err(malformed(kind, inner)),
    },
    other => Err(Error::Decode(format!("unknown value type {other:?}"))),
  }
}

/// Decode a Firestore `fields` map back into a plain JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>> {
  fields
    .iter()
    .map(|(k, v)| Ok((k.clone(), decode_value(v)?)))
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn encodes_scalars_and_containers() {
    let encoded = encode_value(&json!({
      "name": "Ann",
      "age": 41,
      "score": 2.5,
      "active": true,
      "tags": ["a"],
      "none": null,
      "empty": [],
    }));
    assert_eq!(
      encoded,
      json!({ "mapValue": { "fields": {
        "name":   { "stringValue": "Ann" },
        "age":    { "integerValue": "41" },
        "score":  { "doubleValue": 2.5 },
        "active": { "booleanValue": true },
        "tags":   { "arrayValue": { "values": [{ "stringValue": "a" }] } },
        "none":   { "nullValue": null },
        "empty":  { "arrayValue": {} },
      } } })
    );
  }

  #[test]
  fn decode_inverts_encode() {
    let original = json!({
      "id": "1712345678901",
      "services": [{ "name": "x", "images": [] }],
      "nested": { "deep": { "n": -3 } },
    });
    assert_eq!(decode_value(&encode_value(&original)).unwrap(), original);
  }

  #[test]
  fn decodes_server_only_types_leniently() {
    let fields = json!({
      "createdAt": { "timestampValue": "2024-01-01T00:00:00Z" },
      "owner":     { "referenceValue": "projects/p/databases/d/documents/u/1" },
      "where":     { "geoPointValue": { "latitude": 24.7, "longitude": 46.7 } },
      "emptyMap":  { "mapValue": {} },
      "weird":     { "doubleValue": "NaN" },
    });
    let decoded = decode_fields(fields.as_object().unwrap()).unwrap();
    assert_eq!(decoded["createdAt"], "2024-01-01T00:00:00Z");
    assert_eq!(decoded["where"]["latitude"], 24.7);
    assert_eq!(decoded["emptyMap"], json!({}));
    assert!(decoded["weird"].is_null());
  }

  #[test]
  fn rejects_unknown_and_malformed_values() {
    assert!(matches!(
      decode_value(&json!({ "blobValue": "x" })),
      Err(Error::Decode(_))
    ));
    assert!(matches!(
      decode_value(&json!({ "integerValue": "twelve" })),
      Err(Error::Decode(_))
    ));
    assert!(matches!(decode_value(&json!("bare")), Err(Error::Decode(_))));
  }
}
