/* src/server/scriptify/rust/src/render.rs */

use std::collections::HashSet;

use crate::errors::ScriptifyError;
use crate::escape::{ENTITIES, escape_html_deep_with};
use crate::literal::{compile_expression, compile_key, script_safe_json};
use crate::options::ScriptifyOptions;
use crate::value::{Locals, Value, locals_from_json};

/// Entity names as matched by the client regex: `&lt;` -> `lt`.
fn entity_names() -> impl Iterator<Item = (&'static str, char)> {
  ENTITIES.iter().map(|&(entity, ch)| (entity.trim_start_matches('&').trim_end_matches(';'), ch))
}

/// Client-side inverse of `escape_html`, applied recursively to arrays and
/// plain objects. One regex pass, so `&amp;lt;` decodes to `&lt;`. Object
/// entries are copied with `Object.defineProperty` so a `__proto__` key stays
/// an own property.
fn client_unescape() -> String {
  let names: Vec<&str> = entity_names().map(|(name, _)| name).collect();
  let table: serde_json::Map<String, serde_json::Value> =
    entity_names().map(|(name, ch)| (name.to_string(), ch.to_string().into())).collect();
  let table = script_safe_json(&serde_json::Value::Object(table).to_string(), false);
  format!(
    "function unescape(v) {{ \
     if (typeof v === 'string') {{ var e = {table}; return v.replace(/&({pattern});/g, function (m, n) {{ return e[n]; }}); }} \
     if (Array.isArray(v)) {{ return v.map(function (x) {{ return unescape(x); }}); }} \
     if (v !== null && typeof v === 'object') {{ var o = {{}}; Object.keys(v).forEach(function (k) {{ \
     Object.defineProperty(o, k, {{ value: unescape(v[k]), enumerable: true, writable: true, configurable: true }}); }}); return o; }} \
     return v; }}",
    pattern = names.join("|"),
  )
}

/// Render `data` as a `<script>` tag that assigns the exposed locals to
/// `window[options.namespace]`.
///
/// Undefined locals, and locals that dehydrate to nothing, are dropped. Every
/// other local is HTML-escaped, compiled to an expression and (unless
/// `dont_unescape_on_client` is set) wrapped in the injected `unescape`.
pub fn render_script_tag(data: &Locals, options: &ScriptifyOptions) -> Result<String, ScriptifyError> {
  options.validate()?;

  let mut html = String::from(r#"<script type="text/javascript">(function () { "#);
  if !options.dont_unescape_on_client {
    html.push_str(&client_unescape());
    html.push(' ');
  }
  html.push_str(&format!("window.{} = {{ ", options.namespace));

  for (key, value) in select_locals(data, options.keys.as_deref()) {
    let Some(entry) = render_entry(key, value, options) else { continue };
    html.push_str(&entry);
  }

  html.push_str("}; })();</script>");
  Ok(html)
}

/// JSON-string entry point for cross-language callers.
/// `data_json` must be an object; `options_json` may be empty for defaults.
pub fn render_script_tag_json(data_json: &str, options_json: &str) -> Result<String, ScriptifyError> {
  let data: serde_json::Value = serde_json::from_str(data_json)
    .map_err(|e| ScriptifyError::invalid_data(format!("failed to parse data: {e}")))?;
  let locals = locals_from_json(data)?;
  let options = ScriptifyOptions::from_json(options_json)?;
  render_script_tag(&locals, &options)
}

/// Locals to expose, in output order. With an allow list, its order wins,
/// repeated names count once and names missing from `data` are skipped.
pub fn select_locals<'a>(data: &'a Locals, keys: Option<&'a [String]>) -> Vec<(&'a str, &'a Value)> {
  match keys {
    Some(keys) => {
      let mut seen = HashSet::new();
      keys
        .iter()
        .filter(|k| seen.insert(k.as_str()))
        .filter_map(|k| data.get_key_value(k.as_str()))
        .map(|(k, v)| (k.as_str(), v))
        .collect()
    }
    None => data.iter().map(|(k, v)| (k.as_str(), v)).collect(),
  }
}

/// One `["key"]: expr, ` entry, or `None` when the local is dropped. Keys are
/// computed names so `__proto__` is defined rather than assigned.
fn render_entry(key: &str, value: &Value, options: &ScriptifyOptions) -> Option<String> {
  if value.is_undefined() {
    tracing::debug!(key, "skipping undefined local");
    return None;
  }
  tracing::debug!(key, kind = value.kind(), "scriptifying local");

  let Some(escaped) = escape_html_deep_with(value, options.max_depth) else {
    tracing::debug!(key, kind = value.kind(), "local has no serializable form, dropping");
    return None;
  };
  let expr = compile_expression(&escaped, options.ascii_only)?;
  let key_literal = compile_key(key, options.ascii_only)?;

  if options.dont_unescape_on_client {
    Some(format!("[{key_literal}]: {expr}, "))
  } else {
    Some(format!("[{key_literal}]: unescape({expr}), "))
  }
}
