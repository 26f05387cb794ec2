/* src/cli/core/src/check.rs */

use std::collections::HashSet;

use scriptify::{Locals, ScriptifyOptions};

/// Per-key outcome of a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyReport {
  Exposed { key: String, bytes: usize },
  Dropped { key: String, reason: &'static str },
  Missing { key: String },
}

/// Classify what `render_script_tag` would do with each local.
pub fn check_locals(data: &Locals, options: &ScriptifyOptions) -> Vec<KeyReport> {
  let mut reports = Vec::new();
  if let Some(ref keys) = options.keys {
    let mut seen = HashSet::new();
    for key in keys.iter().filter(|k| seen.insert(k.as_str()) && !data.contains_key(k.as_str())) {
      reports.push(KeyReport::Missing { key: key.clone() });
    }
  }
  for (key, value) in scriptify::select_locals(data, options.keys.as_deref()) {
    if value.is_undefined() {
      reports.push(KeyReport::Dropped { key: key.to_string(), reason: "undefined" });
      continue;
    }
    let literal = scriptify::escape_html_deep_with(value, options.max_depth)
      .and_then(|escaped| scriptify::compile_expression(&escaped, options.ascii_only));
    match literal {
      Some(lit) => reports.push(KeyReport::Exposed { key: key.to_string(), bytes: lit.len() }),
      None => {
        reports.push(KeyReport::Dropped { key: key.to_string(), reason: "not serializable" });
      }
    }
  }
  reports
}
