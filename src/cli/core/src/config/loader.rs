/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::ScriptifyConfig;

pub const CONFIG_FILE: &str = "scriptify.toml";

/// Nearest `scriptify.toml` in `start` or one of its ancestors.
pub fn find_scriptify_config(start: &Path) -> Result<Option<PathBuf>> {
  let start =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  Ok(start.ancestors().map(|dir| dir.join(CONFIG_FILE)).find(|candidate| candidate.is_file()))
}

pub fn load_scriptify_config(path: &Path) -> Result<ScriptifyConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: ScriptifyConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.script.validate()?;
  Ok(config)
}

/// Explicit path must exist; otherwise search from `cwd` and fall back to
/// defaults when nothing is found.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<(Option<PathBuf>, ScriptifyConfig)> {
  if let Some(path) = explicit {
    let config = load_scriptify_config(path)?;
    return Ok((Some(path.to_path_buf()), config));
  }
  match find_scriptify_config(cwd)? {
    Some(path) => {
      let config = load_scriptify_config(&path)?;
      Ok((Some(path), config))
    }
    None => {
      tracing::debug!(cwd = %cwd.display(), "no {CONFIG_FILE} found, using defaults");
      Ok((None, ScriptifyConfig::default()))
    }
  }
}
