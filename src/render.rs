use crate::ast::{Node, PathExpr};
use crate::path::{Frame, Scope, Stack};
use crate::value::{Helper, Value};

/// Depth-first walk of the AST, appending to `out`. Resolution misses
/// render nothing; nothing here can fail.
pub(crate) fn render_nodes(nodes: &[Node], stack: &mut Stack, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Comment(_) => {}
            // Partial resolution is the host's concern.
            Node::Partial(_) => {}
            Node::Mustache(path) => render_mustache(path, stack, out),
            Node::Block {
                path,
                argument,
                body,
            } => render_block(path, argument.as_ref(), body, stack, out),
        }
    }
}

fn render_mustache(path: &PathExpr, stack: &Stack, out: &mut String) {
    let Some(resolved) = stack.resolve(path) else {
        return;
    };
    match resolved.value {
        Value::Helper(Helper::Inline(f)) => {
            // Receiver is the frame the path resolved from, even when the
            // helper itself came out of a fallback value.
            let scope = Scope::new(stack, stack.frame_value(resolved.frame));
            out.push_str(&f(&scope));
        }
        // A block-shaped helper at an interpolation site renders nothing.
        Value::Helper(Helper::Block(_)) => {}
        value => out.push_str(&value.to_string()),
    }
}

fn render_block(
    path: &PathExpr,
    argument: Option<&PathExpr>,
    body: &[Node],
    stack: &mut Stack,
    out: &mut String,
) {
    let Some(resolved) = stack.resolve(path) else {
        return;
    };
    match resolved.value.clone() {
        Value::Bool(true) => render_nodes(body, stack, out),
        Value::Bool(false) | Value::Null => {}
        Value::Array(items) => {
            for item in items {
                stack.push(Frame::bare(item));
                render_nodes(body, stack, out);
                stack.pop();
            }
        }
        Value::Helper(Helper::Block(f)) => {
            let context = match argument {
                Some(p) => stack
                    .resolve(p)
                    .map(|r| r.value.clone())
                    .unwrap_or(Value::Null),
                None => stack.current().clone(),
            };
            let entry: &Stack = stack;
            let scope = Scope::new(entry, &context);
            // The continuation renders the body against the stack as it
            // stood when the block was entered, plus the supplied value.
            let mut render_body = |value: &Value| {
                let mut inner = entry.clone();
                inner.push(Frame::bare(value.clone()));
                let mut buf = String::new();
                render_nodes(body, &mut inner, &mut buf);
                buf
            };
            out.push_str(&f(&scope, &mut render_body));
        }
        // An inline-shaped helper at a block site renders nothing.
        Value::Helper(Helper::Inline(_)) => {}
        // Any other truthy value renders the body once with the value
        // pushed as the new innermost frame.
        other => {
            if other.is_truthy() {
                stack.push(Frame::bare(other));
                render_nodes(body, stack, out);
                stack.pop();
            }
        }
    }
}
