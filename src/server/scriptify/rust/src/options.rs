/* src/server/scriptify/rust/src/options.rs */

use serde::{Deserialize, Serialize};

use crate::errors::ScriptifyError;
use crate::escape::DEFAULT_MAX_DEPTH;

pub const DEFAULT_NAMESPACE: &str = "SAILS_LOCALS";

/// Rendering options, passed as JSON (`camelCase`) from non-Rust callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptifyOptions {
  /// Keys to expose, in output order. `None` exposes every key.
  pub keys: Option<Vec<String>>,
  /// Property of `window` that receives the exposed object.
  pub namespace: String,
  /// Leave values HTML-escaped on the client instead of injecting `unescape`.
  pub dont_unescape_on_client: bool,
  /// Escape every non-ASCII codepoint in string literals.
  pub ascii_only: bool,
  pub max_depth: usize,
}

impl Default for ScriptifyOptions {
  fn default() -> Self {
    Self {
      keys: None,
      namespace: DEFAULT_NAMESPACE.to_string(),
      dont_unescape_on_client: false,
      ascii_only: false,
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

impl ScriptifyOptions {
  pub fn validate(&self) -> Result<(), ScriptifyError> {
    if !is_js_identifier(&self.namespace) {
      return Err(ScriptifyError::invalid_namespace(format!(
        "namespace {:?} is not a valid JavaScript identifier",
        self.namespace
      )));
    }
    if self.max_depth == 0 {
      return Err(ScriptifyError::invalid_options("maxDepth must be at least 1"));
    }
    Ok(())
  }

  /// Parse options JSON; an empty string means defaults.
  pub fn from_json(json: &str) -> Result<Self, ScriptifyError> {
    if json.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_json::from_str(json)
      .map_err(|e| ScriptifyError::invalid_options(format!("failed to parse options: {e}")))
  }
}

/// ASCII identifier check: `[A-Za-z_$][A-Za-z0-9_$]*`.
fn is_js_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  let Some(first) = chars.next() else { return false };
  (first.is_ascii_alphabetic() || first == '_' || first == '$')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
