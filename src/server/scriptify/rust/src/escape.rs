/* src/server/scriptify/rust/src/escape.rs */

//! Deep HTML-entity escaping of a value graph.
//!
//! The walk dehydrates the graph into a `serde_json::Value` tree, which is
//! acyclic by construction: any node already on the current ancestor path is
//! replaced with [`CIRCULAR_MARKER`] instead of being entered again.

use std::collections::HashSet;
use std::rc::Rc;

use serde_json::Value as Json;

use crate::value::{Opaque, Value};

/// Stands in for a node that contains itself.
pub const CIRCULAR_MARKER: &str = "[Circular ~]";
/// Stands in for a node nested deeper than the configured limit.
pub const MAX_DEPTH_MARKER: &str = "[Max depth]";
pub const DEFAULT_MAX_DEPTH: usize = 512;

pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

/// Entities produced by [`escape_html`], shared with the client `unescape`.
pub(crate) const ENTITIES: &[(&str, char)] =
  &[("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"'), ("&#39;", '\'')];

/// Inverse of [`escape_html`]. Decodes in a single left-to-right pass, so
/// `&amp;lt;` becomes `&lt;` and never `<`. Unknown entities are kept as-is.
pub fn unescape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut rest = s;
  while let Some(pos) = rest.find('&') {
    out.push_str(&rest[..pos]);
    let tail = &rest[pos..];
    match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
      Some((entity, ch)) => {
        out.push(*ch);
        rest = &tail[entity.len()..];
      }
      None => {
        out.push('&');
        rest = &tail[1..];
      }
    }
  }
  out.push_str(rest);
  out
}

/// Identities of the composite nodes on the current ancestor path.
/// Lives for one top-level traversal only.
#[derive(Debug, Default)]
pub struct VisitedSet {
  path: HashSet<usize>,
}

impl VisitedSet {
  fn enter(&mut self, id: usize) -> bool {
    self.path.insert(id)
  }

  fn leave(&mut self, id: usize) {
    self.path.remove(&id);
  }

  pub fn is_empty(&self) -> bool {
    self.path.is_empty()
  }
}

fn node_id<T>(node: &Rc<T>) -> usize {
  Rc::as_ptr(node).cast::<()>() as usize
}

/// Escape every string in `value` and dehydrate it to JSON.
///
/// Returns `None` when the value itself is undefined (or an opaque handle
/// with no string form); callers drop such locals.
pub fn escape_html_deep(value: &Value) -> Option<Json> {
  escape_html_deep_with(value, DEFAULT_MAX_DEPTH)
}

pub fn escape_html_deep_with(value: &Value, max_depth: usize) -> Option<Json> {
  let mut visited = VisitedSet::default();
  let escaped = escape_node(value, &mut visited, 0, max_depth);
  debug_assert!(visited.is_empty());
  escaped
}

fn escape_node(value: &Value, visited: &mut VisitedSet, depth: usize, max_depth: usize) -> Option<Json> {
  match value {
    Value::Undefined => None,
    Value::Null => Some(Json::Null),
    Value::Bool(b) => Some(Json::Bool(*b)),
    Value::Number(n) => Some(number_to_json(*n)),
    Value::String(s) => Some(Json::String(escape_html(s))),
    Value::Opaque(opaque) => escape_opaque(opaque),
    Value::Array(node) => {
      let id = node_id(node);
      if depth >= max_depth {
        return Some(Json::String(MAX_DEPTH_MARKER.to_string()));
      }
      if !visited.enter(id) {
        return Some(Json::String(CIRCULAR_MARKER.to_string()));
      }
      let escaped = match node.try_borrow() {
        Ok(items) => Some(Json::Array(
          items
            .iter()
            // Undefined array slots keep their index as null.
            .map(|item| escape_node(item, visited, depth + 1, max_depth).unwrap_or(Json::Null))
            .collect(),
        )),
        Err(_) => {
          tracing::warn!("array node is mutably borrowed during escaping, treating as undefined");
          None
        }
      };
      visited.leave(id);
      escaped
    }
    Value::Object(node) => {
      let id = node_id(node);
      if depth >= max_depth {
        return Some(Json::String(MAX_DEPTH_MARKER.to_string()));
      }
      if !visited.enter(id) {
        return Some(Json::String(CIRCULAR_MARKER.to_string()));
      }
      let escaped = match node.try_borrow() {
        Ok(entries) => Some(Json::Object(
          entries
            .iter()
            .filter_map(|(k, v)| {
              escape_node(v, visited, depth + 1, max_depth).map(|escaped| (k.clone(), escaped))
            })
            .collect(),
        )),
        Err(_) => {
          tracing::warn!("object node is mutably borrowed during escaping, treating as undefined");
          None
        }
      };
      visited.leave(id);
      escaped
    }
  }
}

fn escape_opaque(opaque: &Opaque) -> Option<Json> {
  opaque.dehydrate().map(|s| Json::String(escape_html(&s)))
}

/// Whole numbers in the safe-integer range render without a fraction;
/// NaN and infinities become 0.
fn number_to_json(n: f64) -> Json {
  const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
  if !n.is_finite() {
    return Json::from(0);
  }
  if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
    return Json::from(n as i64);
  }
  serde_json::Number::from_f64(n).map_or(Json::from(0), Json::Number)
}
