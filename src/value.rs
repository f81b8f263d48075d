use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::path::Scope;

/// An inline helper: invoked at a `{{path}}` site with no arguments beyond
/// its scope; its return string is appended to the output as-is.
pub type InlineFn = dyn Fn(&Scope) -> String + Send + Sync;

/// A block helper: invoked at a `{{#path}}` site with a render continuation.
/// Calling the continuation with a value renders the block body against
/// that value and returns the substring; the helper's own return string is
/// what ends up in the output.
pub type BlockFn = dyn Fn(&Scope, &mut dyn FnMut(&Value) -> String) -> String + Send + Sync;

/// A host-supplied callable stored as a data value. The shape must match
/// the marker site that invokes it: `Inline` for `{{path}}`, `Block` for
/// `{{#path}}...{{/path}}`.
#[derive(Clone)]
pub enum Helper {
    Inline(Arc<InlineFn>),
    Block(Arc<BlockFn>),
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Helper::Inline(_) => f.write_str("Helper::Inline(..)"),
            Helper::Block(_) => f.write_str("Helper::Block(..)"),
        }
    }
}

impl PartialEq for Helper {
    fn eq(&self, other: &Self) -> bool {
        // Helpers have no structural identity; compare by pointer.
        match (self, other) {
            (Helper::Inline(a), Helper::Inline(b)) => Arc::ptr_eq(a, b),
            (Helper::Block(a), Helper::Block(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A runtime data value. The renderer dispatches exhaustively on this, so
/// every kind has a defined behavior at every marker site.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
    Helper(Helper),
}

impl Value {
    pub fn inline_helper<F>(f: F) -> Self
    where
        F: Fn(&Scope) -> String + Send + Sync + 'static,
    {
        Value::Helper(Helper::Inline(Arc::new(f)))
    }

    pub fn block_helper<F>(f: F) -> Self
    where
        F: Fn(&Scope, &mut dyn FnMut(&Value) -> String) -> String + Send + Sync + 'static,
    {
        Value::Helper(Helper::Block(Arc::new(f)))
    }

    /// Field lookup. Only objects have fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(m) => !m.is_empty(),
            Value::Helper(_) => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(_) | Value::Helper(_) => Ok(()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_matches_host_expectations() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(2_i64).to_string(), "2");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(
            Value::from(vec![Value::from("a"), Value::from("b")]).to_string(),
            "a,b"
        );
    }

    #[test]
    fn json_conversion_preserves_structure() {
        let value = Value::from(json!({"name": "Alan", "tags": ["x", "y"], "n": 3}));
        assert_eq!(value.get("name"), Some(&Value::from("Alan")));
        assert_eq!(
            value.get("tags"),
            Some(&Value::Array(vec![Value::from("x"), Value::from("y")]))
        );
        assert_eq!(value.get("n"), Some(&Value::from(3_i64)));
    }

    #[test]
    fn truthiness() {
        assert!(Value::from(true).is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(!Value::Null.is_truthy());
    }
}
