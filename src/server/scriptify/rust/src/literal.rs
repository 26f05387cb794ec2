/* src/server/scriptify/rust/src/literal.rs */

//! Compile an escaped JSON tree into a JavaScript literal expression.
//!
//! JSON text is already a valid expression. What it is not, on its own, is
//! safe inside `<script>`: keys are never HTML-escaped, and U+2028/U+2029 are
//! line terminators in older engines. Both are handled by rewriting string
//! contents after serialization.

use serde_json::Value as Json;

/// Serialize `value` as a literal that is safe to inline in a script body.
///
/// `<`, `>`, U+2028 and U+2029 inside strings become `\uXXXX` escapes.
/// With `ascii_only`, every non-ASCII codepoint is escaped as well.
/// Returns `None` only if serialization itself fails.
pub fn compile_literal(value: &Json, ascii_only: bool) -> Option<String> {
  match serde_json::to_string(value) {
    Ok(json) => Some(script_safe_json(&json, ascii_only)),
    Err(err) => {
      tracing::debug!(error = %err, "failed to serialize escaped value");
      None
    }
  }
}

/// String literal for an object key.
pub fn compile_key(key: &str, ascii_only: bool) -> Option<String> {
  compile_literal(&Json::String(key.to_string()), ascii_only)
}

/// Script expression that evaluates to `value` on the client.
///
/// Scalars are plain literals. Arrays and objects are shipped as
/// `JSON.parse("<json>")`: in an object literal a `"__proto__"` entry sets the
/// prototype, while `JSON.parse` always creates an own property.
pub fn compile_expression(value: &Json, ascii_only: bool) -> Option<String> {
  if !matches!(value, Json::Array(_) | Json::Object(_)) {
    return compile_literal(value, ascii_only);
  }
  let text = value.to_string();
  match serde_json::to_string(&text) {
    Ok(quoted) => Some(format!("JSON.parse({})", script_safe_json(&quoted, ascii_only))),
    Err(err) => {
      tracing::debug!(error = %err, "failed to quote escaped value");
      None
    }
  }
}

fn needs_escape(ch: char, ascii_only: bool) -> bool {
  matches!(ch, '<' | '>' | '\u{2028}' | '\u{2029}') || (ascii_only && ch as u32 > 0x7F)
}

fn push_unicode_escape(out: &mut String, ch: char) {
  let code = ch as u32;
  if code > 0xFFFF {
    let adjusted = code - 0x1_0000;
    let hi = (adjusted >> 10) + 0xD800;
    let lo = (adjusted & 0x3FF) + 0xDC00;
    out.push_str(&format!("\\u{hi:04x}\\u{lo:04x}"));
  } else {
    out.push_str(&format!("\\u{code:04x}"));
  }
}

/// Walks JSON text tracking whether the current position is inside a string
/// (honouring `\"` and `\\`) and rewrites unsafe characters found there.
/// Characters outside strings are left untouched.
pub fn script_safe_json(json: &str, ascii_only: bool) -> String {
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if in_string {
      if ch == '\\' {
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
        continue;
      }
      if ch == '"' {
        in_string = false;
        out.push(ch);
        continue;
      }
      if needs_escape(ch, ascii_only) {
        push_unicode_escape(&mut out, ch);
        continue;
      }
      out.push(ch);
    } else {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
    }
  }
  out
}
