/* src/cli/core/src/input.rs */

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use scriptify::Locals;

/// Read locals from a JSON file, or from stdin when the path is `-`.
pub fn read_locals(path: &Path) -> Result<Locals> {
  let content = if path.as_os_str() == "-" {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).context("failed to read data from stdin")?;
    buf
  } else {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
  };
  parse_locals(&content).with_context(|| format!("invalid data in {}", path.display()))
}

pub fn parse_locals(content: &str) -> Result<Locals> {
  let json: serde_json::Value = serde_json::from_str(content).context("failed to parse JSON")?;
  Ok(scriptify::locals_from_json(json)?)
}
