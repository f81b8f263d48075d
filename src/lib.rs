//! tinybars: minimal logic-less double-brace template engine.
//!
//! This crate does one job: compile a template string containing `{{...}}`
//! markers into a reusable [`Template`], then render it against data. There
//! is no expression language and no user-defined control flow; all logic
//! lives in the data, which may include callable helper values.
//!
//! Supported markers:
//! - `{{path}}` — value interpolation, silent when the path misses.
//! - `{{! comment}}` — discarded.
//! - `{{#path}}...{{/path}}` — block: booleans gate the body, arrays
//!   iterate it with each element pushed as the current context, and
//!   callable values drive it through a render continuation. An optional
//!   argument (`{{#path arg}}`) selects the context handed to a callable.
//! - `{{>name}}` — partial reference; recognized but not resolved (the
//!   host owns partial registration).
//!
//! Paths are `/`-separated: `..` addresses the enclosing context, `.` and
//! a leading `this` address the current one. A path may not move back up
//! after entering a property; that is a compile-time error.
//!
//! The engine performs no escaping and inserts no separators; output is
//! exactly the template text with markers replaced. Rendering never fails:
//! a lookup miss renders nothing. Only grammar violations surface, as
//! [`ParseError`] at compile time.
//!
//! ```rust
//! use tinybars::{compile, Value};
//!
//! let template = compile("Goodbye\n{{cruel}}\n{{world}}!").unwrap();
//! let data = Value::from(serde_json::json!({"cruel": "cruel", "world": "world"}));
//! assert_eq!(template.apply(&data), "Goodbye\ncruel\nworld!");
//! ```

mod ast;
mod lexer;
mod parser;
mod path;
mod render;
mod value;

pub use ast::{Node, PathExpr, PathSegment};
pub use path::Scope;
pub use value::{BlockFn, Helper, InlineFn, Value};

use path::{Frame, Stack};
use thiserror::Error;

/// A grammar violation found while compiling a template. `position` is the
/// byte offset of the offending marker in the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte {position})")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Compile a template string into a reusable render procedure.
///
/// All path expressions are parsed and validated here; no work besides
/// lookup and dispatch happens per render.
pub fn compile(source: &str) -> Result<Template, ParseError> {
    Ok(Template {
        root: parser::parse(source)?,
    })
}

/// A compiled template. Immutable, so one instance can be rendered
/// repeatedly and shared across threads; every render call owns its own
/// context stack and output buffer.
#[derive(Debug, Clone)]
pub struct Template {
    root: Vec<Node>,
}

impl Template {
    pub fn apply(&self, root: &Value) -> String {
        self.apply_with_fallbacks(root, &[])
    }

    /// Render with additional fallback values, consulted in order whenever
    /// a property lookup misses on the data itself.
    pub fn apply_with_fallbacks(&self, root: &Value, fallbacks: &[Value]) -> String {
        let mut stack = Stack::new(Frame::new(root.clone(), fallbacks.to_vec()));
        let mut out = String::new();
        render::render_nodes(&self.root, &mut stack, &mut out);
        out
    }
}
