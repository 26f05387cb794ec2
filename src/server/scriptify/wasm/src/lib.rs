/* src/server/scriptify/wasm/src/lib.rs */

use serde_json::Value;
use wasm_bindgen::prelude::*;

fn error_json(err: &scriptify::ScriptifyError) -> String {
  serde_json::json!({ "error": err.to_string() }).to_string()
}

/// Render the `<script>` tag for `data_json` (an object) with optional
/// `options_json`. Failures come back as `{"error": "CODE: message"}`.
#[wasm_bindgen]
pub fn scriptify(data_json: &str, options_json: &str) -> String {
  match scriptify::render_script_tag_json(data_json, options_json) {
    Ok(html) => html,
    Err(e) => error_json(&e),
  }
}

#[wasm_bindgen]
pub fn escape_html(s: &str) -> String {
  scriptify::escape_html(s)
}

#[wasm_bindgen]
pub fn unescape_html(s: &str) -> String {
  scriptify::unescape_html(s)
}

/// Escape every string in `value_json` and return a script-safe expression
/// for it. Undefined-like input (empty string) yields `"undefined"`.
#[wasm_bindgen]
pub fn scriptify_value(value_json: &str, ascii_only: bool) -> String {
  if value_json.trim().is_empty() {
    return "undefined".to_string();
  }
  let value: Value = match serde_json::from_str(value_json) {
    Ok(v) => v,
    Err(e) => return error_json(&scriptify::ScriptifyError::invalid_data(e.to_string())),
  };
  scriptify::escape_html_deep(&scriptify::Value::from(value))
    .and_then(|escaped| scriptify::compile_expression(&escaped, ascii_only))
    .unwrap_or_else(|| "undefined".to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_reports_errors_as_json() {
    let out = scriptify("[]", "");
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["error"], "INVALID_DATA: data must be a JSON object, got an array");
  }

  #[test]
  fn render_default_options() {
    let out = scriptify(r#"{"a":"<b>"}"#, "");
    assert!(out.contains(r#"["a"]: unescape("&lt;b&gt;")"#));
  }

  #[test]
  fn scriptify_value_escapes() {
    assert_eq!(scriptify_value(r#"{"t":"<x>"}"#, false), r#"JSON.parse("{\"t\":\"&lt;x&gt;\"}")"#);
    assert_eq!(scriptify_value(r#""<x>""#, false), r#""&lt;x&gt;""#);
    assert_eq!(scriptify_value("", false), "undefined");
  }
}
