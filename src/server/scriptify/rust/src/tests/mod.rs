/* src/server/scriptify/rust/src/tests/mod.rs */

use serde::de::DeserializeOwned;
use serde_json::Map;

use super::*;

mod scenarios;

/// What the injected client `unescape` does, applied to a parsed value.
fn client_unescape(value: serde_json::Value) -> serde_json::Value {
  match value {
    serde_json::Value::String(s) => serde_json::Value::String(unescape_html(&s)),
    serde_json::Value::Array(items) => items.into_iter().map(client_unescape).collect(),
    serde_json::Value::Object(map) => {
      serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, client_unescape(v))).collect())
    }
    other => other,
  }
}

/// Read one JSON value off the front of `s`, returning it and the rest.
fn read_json<T: DeserializeOwned>(s: &str) -> (T, &str) {
  let mut stream = serde_json::Deserializer::from_str(s).into_iter::<T>();
  let value = stream.next().unwrap().unwrap();
  let offset = stream.byte_offset();
  (value, &s[offset..])
}

/// Evaluate one emitted expression: a literal or `JSON.parse("<json>")`.
fn read_expression(s: &str) -> (serde_json::Value, &str) {
  if let Some(body) = s.strip_prefix("JSON.parse(") {
    let (text, rest) = read_json::<String>(body);
    return (serde_json::from_str(&text).unwrap(), rest.strip_prefix(')').unwrap());
  }
  if s.starts_with('"') {
    return read_json(s);
  }
  // numbers, booleans and null stop at the closing paren or separator
  let end = s.find([')', ',']).unwrap();
  (serde_json::from_str(&s[..end]).unwrap(), &s[end..])
}

/// Evaluate the `window.<namespace> = { ... }` object of a rendered tag
/// entry by entry, applying `unescape` where the tag does.
fn evaluate_locals(html: &str, namespace: &str) -> Map<String, serde_json::Value> {
  let open = format!("window.{namespace} = {{ ");
  let start = html.find(&open).unwrap() + open.len();
  let mut rest = &html[start..];
  let mut out = Map::new();
  while let Some(entry) = rest.strip_prefix('[') {
    let (key, after_key) = read_json::<String>(entry);
    let body = after_key.strip_prefix("]: ").unwrap();
    let (value, after_value) = match body.strip_prefix("unescape(") {
      Some(inner) => {
        let (value, after) = read_expression(inner);
        (client_unescape(value), after.strip_prefix(')').unwrap())
      }
      None => read_expression(body),
    };
    assert!(!out.contains_key(&key), "{key} emitted twice");
    out.insert(key, value);
    rest = after_value.strip_prefix(", ").unwrap();
  }
  assert_eq!(rest, "}; })();</script>");
  out
}

/// Render `value` as a single local and evaluate it back.
fn round_trip(value: &Value) -> serde_json::Value {
  let mut data = Locals::new();
  data.insert("v".into(), value.clone());
  let html = render_script_tag(&data, &ScriptifyOptions::default()).unwrap();
  evaluate_locals(&html, DEFAULT_NAMESPACE).remove("v").unwrap()
}

fn render(data: serde_json::Value, options: &ScriptifyOptions) -> String {
  render_script_tag(&locals_from_json(data).unwrap(), options).unwrap()
}
