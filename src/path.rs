//! Path grammar and the context stack the paths resolve against.
//!
//! A path string is split on `/`: `..` moves one frame toward the root,
//! `.` stays put, a leading `this` stays put (and is valid alone), and any
//! other token is a property lookup. Validation runs at parse time: once a
//! path has entered a property, it may not move back up the stack.

use crate::ast::{PathExpr, PathSegment};
use crate::value::Value;
use crate::ParseError;

pub(crate) fn parse_path(raw: &str, position: usize) -> Result<PathExpr, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::new("empty path expression", position));
    }

    let mut segments = Vec::new();
    for (i, token) in raw.split('/').enumerate() {
        let segment = match token {
            "" => {
                return Err(ParseError::new(
                    format!("empty segment in path `{raw}`"),
                    position,
                ))
            }
            ".." => PathSegment::Up,
            "." => PathSegment::Here,
            "this" if i == 0 => PathSegment::This,
            _ => PathSegment::Name(token.to_string()),
        };
        segments.push(segment);
    }

    validate(&segments, raw, position)?;
    Ok(PathExpr::new(segments))
}

/// Rejects any `Up` segment appearing after a `Name` segment. `Here` is a
/// no-op for addressing and is legal anywhere.
fn validate(segments: &[PathSegment], raw: &str, position: usize) -> Result<(), ParseError> {
    let mut entered = false;
    for segment in segments {
        match segment {
            PathSegment::Name(_) => entered = true,
            PathSegment::Up if entered => {
                return Err(ParseError::new(
                    format!(
                        "invalid path `{raw}`: cannot move to a previous context \
                         after moving into a nested context"
                    ),
                    position,
                ))
            }
            _ => {}
        }
    }
    Ok(())
}

/// One level of the context stack: a primary value plus the fallback values
/// consulted when a property misses on the primary.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    value: Value,
    fallbacks: Vec<Value>,
}

impl Frame {
    pub fn new(value: Value, fallbacks: Vec<Value>) -> Self {
        Self { value, fallbacks }
    }

    /// A frame with no fallback chain, as pushed during block rendering.
    pub fn bare(value: Value) -> Self {
        Self::new(value, Vec::new())
    }
}

/// The result of a successful resolution: the value, plus the index of the
/// frame the path landed on after its `..`/`.` prefix. The frame index is
/// what inline helpers get bound to as their receiver.
pub(crate) struct Resolved<'a> {
    pub frame: usize,
    pub value: &'a Value,
}

/// The context stack for one render call. Owned exclusively by that call;
/// cloned only to hand helper continuations their entry-time snapshot.
#[derive(Debug, Clone)]
pub(crate) struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    pub fn new(root: Frame) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Primary value of the innermost frame.
    pub fn current(&self) -> &Value {
        &self.frames[self.frames.len() - 1].value
    }

    pub fn frame_value(&self, index: usize) -> &Value {
        &self.frames[index].value
    }

    pub fn resolve(&self, path: &PathExpr) -> Option<Resolved<'_>> {
        let mut frame = self.frames.len().checked_sub(1)?;
        let mut value: Option<&Value> = None;

        for segment in path.segments() {
            match segment {
                PathSegment::Up => {
                    // Moving past the root frame is a miss, not a crash.
                    frame = frame.checked_sub(1)?;
                }
                PathSegment::Here | PathSegment::This => {}
                PathSegment::Name(name) => {
                    value = Some(match value.take() {
                        None => self.lookup_first(frame, name)?,
                        // Below the first segment only plain field lookup
                        // applies; no fallback chain.
                        Some(v) => v.get(name)?,
                    });
                }
            }
        }

        let value = value.unwrap_or_else(|| &self.frames[frame].value);
        Some(Resolved { frame, value })
    }

    /// First-segment lookup: the frame's primary, then its own fallback
    /// chain, then the render call's fallback chain on the root frame. The
    /// primary always wins, so an explicit value shadows any fallback.
    fn lookup_first(&self, frame: usize, name: &str) -> Option<&Value> {
        let f = &self.frames[frame];
        if let Some(v) = f.value.get(name) {
            return Some(v);
        }
        for fallback in &f.fallbacks {
            if let Some(v) = fallback.get(name) {
                return Some(v);
            }
        }
        if frame != 0 {
            for fallback in &self.frames[0].fallbacks {
                if let Some(v) = fallback.get(name) {
                    return Some(v);
                }
            }
        }
        None
    }
}

/// The lookup capability handed to helpers: the receiver value plus the
/// context stack active at invocation time. Borrowed for the duration of
/// the helper call only.
pub struct Scope<'a> {
    stack: &'a Stack,
    this: &'a Value,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(stack: &'a Stack, this: &'a Value) -> Self {
        Self { stack, this }
    }

    /// The value the helper is bound to: the resolved frame's primary for
    /// inline helpers, the argument context for block helpers.
    pub fn this(&self) -> &Value {
        self.this
    }

    /// Resolve a relative path string against the stack active when the
    /// helper was invoked. Malformed paths and misses both yield `None`.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let parsed = parse_path(path, 0).ok()?;
        self.stack.resolve(&parsed).map(|r| r.value.clone())
    }
}
