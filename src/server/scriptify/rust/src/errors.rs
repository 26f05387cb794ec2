/* src/server/scriptify/rust/src/errors.rs */

use std::fmt;

/// Usage error raised before any output is produced.
///
/// Per-key problems never surface here: a local that cannot be rendered is
/// dropped from the script instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptifyError {
  code: String,
  message: String,
}

impl ScriptifyError {
  pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self { code: code.into(), message: message.into() }
  }

  pub fn invalid_data(msg: impl Into<String>) -> Self {
    Self::new("INVALID_DATA", msg)
  }

  pub fn invalid_options(msg: impl Into<String>) -> Self {
    Self::new("INVALID_OPTIONS", msg)
  }

  pub fn invalid_namespace(msg: impl Into<String>) -> Self {
    Self::new("INVALID_NAMESPACE", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for ScriptifyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for ScriptifyError {}
