/* src/cli/core/src/config/types.rs */

use anyhow::{Context, Result};
use serde::Deserialize;

use scriptify::{DEFAULT_MAX_DEPTH, DEFAULT_NAMESPACE, ScriptifyOptions};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptifyConfig {
  #[serde(default)]
  pub script: ScriptSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptSection {
  #[serde(default = "default_namespace")]
  pub namespace: String,
  #[serde(default)]
  pub keys: Option<Vec<String>>,
  #[serde(default)]
  pub dont_unescape_on_client: bool,
  #[serde(default)]
  pub ascii_only: bool,
  #[serde(default = "default_max_depth")]
  pub max_depth: usize,
}

impl Default for ScriptSection {
  fn default() -> Self {
    Self {
      namespace: default_namespace(),
      keys: None,
      dont_unescape_on_client: false,
      ascii_only: false,
      max_depth: default_max_depth(),
    }
  }
}

fn default_namespace() -> String {
  DEFAULT_NAMESPACE.to_string()
}

fn default_max_depth() -> usize {
  DEFAULT_MAX_DEPTH
}

impl ScriptSection {
  pub fn to_options(&self) -> ScriptifyOptions {
    ScriptifyOptions {
      keys: self.keys.clone(),
      namespace: self.namespace.clone(),
      dont_unescape_on_client: self.dont_unescape_on_client,
      ascii_only: self.ascii_only,
      max_depth: self.max_depth,
    }
  }

  pub fn validate(&self) -> Result<()> {
    self.to_options().validate().context("invalid [script] section")
  }
}
