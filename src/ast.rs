/// One segment of a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// `..` — move one frame toward the root of the context stack.
    Up,
    /// `.` — stay on the current frame.
    Here,
    /// Leading `this` — stay on the current frame; also valid as a whole path.
    This,
    /// A named property lookup on the current frame's value.
    Name(String),
}

/// A validated sequence of path segments, e.g. `../name` or `this/text`.
///
/// All `Up`/`Here` segments appear before the first `Name`; a path that
/// moves back up after entering a property is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<PathSegment>,
}

impl PathExpr {
    pub(crate) fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    /// `{{! ...}}`. Carried in the tree but has no runtime effect.
    Comment(String),
    /// `{{path}}` — simple value interpolation.
    Mustache(PathExpr),
    /// `{{>name}}` — recognized by the grammar; resolution is the host's
    /// concern, so the engine renders nothing for it.
    Partial(String),
    /// `{{#path arg?}}body{{/path}}`.
    Block {
        path: PathExpr,
        argument: Option<PathExpr>,
        body: Vec<Node>,
    },
}

pub type Ast = Vec<Node>;
