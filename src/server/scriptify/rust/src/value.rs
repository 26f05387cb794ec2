/* src/server/scriptify/rust/src/value.rs */

//! Host-side value graph handed to the escaper.
//!
//! Arrays and objects are shared `Rc<RefCell<..>>` nodes so callers can hand
//! over graphs that reference themselves. Node identity is the allocation
//! address of the shared cell.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::errors::ScriptifyError;

pub type ArrayNode = Rc<RefCell<Vec<Value>>>;
pub type ObjectNode = Rc<RefCell<BTreeMap<String, Value>>>;

/// Top-level locals: key -> value, rendered in key order.
pub type Locals = BTreeMap<String, Value>;

#[derive(Clone, Default)]
pub enum Value {
  /// Absent value. Dropped at the top level and inside objects.
  #[default]
  Undefined,
  Null,
  Bool(bool),
  Number(f64),
  String(String),
  Array(ArrayNode),
  Object(ObjectNode),
  Opaque(Opaque),
}

/// Host values with no direct JSON form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opaque {
  Function { source: String },
  Date { iso: String },
  Error { message: String, stack: Option<String> },
  RegExp { pattern: String, flags: String },
  /// Anything that cannot be dehydrated at all (sockets, DOM nodes, ...).
  Handle { type_name: String },
}

impl Opaque {
  /// String form used when the value is exposed to the client, or `None`
  /// when the value has to be treated as undefined.
  pub fn dehydrate(&self) -> Option<String> {
    match self {
      Self::Function { source } => Some(source.clone()),
      Self::Date { iso } => Some(iso.clone()),
      Self::Error { message, stack } => Some(stack.clone().unwrap_or_else(|| message.clone())),
      Self::RegExp { pattern, flags } => Some(format!("/{pattern}/{flags}")),
      Self::Handle { .. } => None,
    }
  }
}

impl Value {
  pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
    Self::Array(Rc::new(RefCell::new(items.into_iter().collect())))
  }

  pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
    Self::Object(Rc::new(RefCell::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())))
  }

  /// Convert any serde-serializable value. Serialization failures map to
  /// `Undefined` so the local is dropped rather than aborting the render.
  pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
    match serde_json::to_value(value) {
      Ok(json) => Self::from(json),
      Err(err) => {
        tracing::debug!(error = %err, "value is not serializable, treating as undefined");
        Self::Undefined
      }
    }
  }

  /// Append to an array node. Returns `false` when `self` is not an array.
  pub fn push(&self, item: Value) -> bool {
    match self {
      Self::Array(node) => {
        node.borrow_mut().push(item);
        true
      }
      _ => false,
    }
  }

  /// Insert into an object node. Returns `false` when `self` is not an object.
  pub fn insert(&self, key: impl Into<String>, item: Value) -> bool {
    match self {
      Self::Object(node) => {
        node.borrow_mut().insert(key.into(), item);
        true
      }
      _ => false,
    }
  }

  pub fn is_undefined(&self) -> bool {
    matches!(self, Self::Undefined)
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::Undefined => "undefined",
      Self::Null => "null",
      Self::Bool(_) => "boolean",
      Self::Number(_) => "number",
      Self::String(_) => "string",
      Self::Array(_) => "array",
      Self::Object(_) => "object",
      Self::Opaque(_) => "opaque",
    }
  }
}

// Shallow on purpose: a derived impl would recurse forever on cyclic graphs.
impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Undefined => f.write_str("Undefined"),
      Self::Null => f.write_str("Null"),
      Self::Bool(b) => write!(f, "Bool({b})"),
      Self::Number(n) => write!(f, "Number({n})"),
      Self::String(s) => write!(f, "String({s:?})"),
      Self::Array(node) => match node.try_borrow() {
        Ok(items) => write!(f, "Array(len={})", items.len()),
        Err(_) => f.write_str("Array(<borrowed>)"),
      },
      Self::Object(node) => match node.try_borrow() {
        Ok(entries) => f.debug_set().entries(entries.keys()).finish(),
        Err(_) => f.write_str("Object(<borrowed>)"),
      },
      Self::Opaque(o) => write!(f, "Opaque({o:?})"),
    }
  }
}

impl From<serde_json::Value> for Value {
  fn from(json: serde_json::Value) -> Self {
    match json {
      serde_json::Value::Null => Self::Null,
      serde_json::Value::Bool(b) => Self::Bool(b),
      // u64/i64 beyond 2^53 lose precision, same as on the client.
      serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
      serde_json::Value::String(s) => Self::String(s),
      serde_json::Value::Array(items) => Self::array(items.into_iter().map(Self::from)),
      serde_json::Value::Object(map) => Self::object(map.into_iter().map(|(k, v)| (k, Self::from(v)))),
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Self::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Self::Bool(b)
  }
}

impl From<f64> for Value {
  fn from(n: f64) -> Self {
    Self::Number(n)
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Self::Number(n as f64)
  }
}

impl From<i32> for Value {
  fn from(n: i32) -> Self {
    Self::Number(f64::from(n))
  }
}

impl From<u32> for Value {
  fn from(n: u32) -> Self {
    Self::Number(f64::from(n))
  }
}

impl From<Opaque> for Value {
  fn from(o: Opaque) -> Self {
    Self::Opaque(o)
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Self::array(items)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(opt: Option<T>) -> Self {
    opt.map_or(Self::Undefined, Into::into)
  }
}

/// Turn parsed JSON into top-level locals. Anything other than an object is
/// a usage error.
pub fn locals_from_json(json: serde_json::Value) -> Result<Locals, ScriptifyError> {
  let kind = match json {
    serde_json::Value::Object(map) => {
      return Ok(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect());
    }
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "a boolean",
    serde_json::Value::Number(_) => "a number",
    serde_json::Value::String(_) => "a string",
    serde_json::Value::Array(_) => "an array",
  };
  Err(ScriptifyError::invalid_data(format!("data must be a JSON object, got {kind}")))
}
