/* src/server/scriptify/rust/src/lib.rs */

//! Expose server-side locals to client-side JavaScript through a single,
//! self-contained `<script>` tag.
//!
//! Pipeline per local: [`escape_html_deep`] (entity-escape every string,
//! cut cycles) -> [`compile_expression`] (script-safe literal or `JSON.parse`) ->
//! [`render_script_tag`] (IIFE assigning `window.<namespace>`).

pub mod errors;
pub mod escape;
pub mod literal;
pub mod options;
pub mod render;
pub mod value;

// Public API re-exports
pub use errors::ScriptifyError;
pub use escape::{
  CIRCULAR_MARKER, DEFAULT_MAX_DEPTH, MAX_DEPTH_MARKER, VisitedSet, escape_html, escape_html_deep,
  escape_html_deep_with, unescape_html,
};
pub use literal::{compile_expression, compile_key, compile_literal, script_safe_json};
pub use options::{DEFAULT_NAMESPACE, ScriptifyOptions};
pub use render::{render_script_tag, render_script_tag_json, select_locals};
pub use value::{ArrayNode, Locals, ObjectNode, Opaque, Value, locals_from_json};

#[cfg(test)]
mod tests;
