use std::collections::HashMap;

use serde_json::json;
use tinybars::{compile, Scope, Value};

fn compile_to(template: &str, data: serde_json::Value, expected: &str) {
    let compiled = compile(template).unwrap();
    assert_eq!(compiled.apply(&Value::from(data)), expected);
}

fn object(pairs: Vec<(&str, Value)>) -> Value {
    Value::Object(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<HashMap<_, _>>(),
    )
}

#[test]
fn booleans_gate_the_body() {
    let template = "{{#goodbye}}GOODBYE {{/goodbye}}cruel {{world}}!";
    compile_to(
        template,
        json!({"goodbye": true, "world": "world"}),
        "GOODBYE cruel world!",
    );
    compile_to(template, json!({"goodbye": false, "world": "world"}), "cruel world!");
}

#[test]
fn arrays_iterate_in_order() {
    let template = "{{#goodbyes}}{{text}}! {{/goodbyes}}cruel {{world}}!";
    compile_to(
        template,
        json!({
            "goodbyes": [{"text": "goodbye"}, {"text": "Goodbye"}, {"text": "GOODBYE"}],
            "world": "world"
        }),
        "goodbye! Goodbye! GOODBYE! cruel world!",
    );
    compile_to(
        template,
        json!({"goodbyes": [], "world": "world"}),
        "cruel world!",
    );
}

#[test]
fn relative_paths_reach_the_enclosing_context() {
    compile_to(
        "{{#goodbyes}}{{text}} cruel {{../name}}! {{/goodbyes}}",
        json!({
            "name": "Alan",
            "goodbyes": [{"text": "goodbye"}, {"text": "Goodbye"}, {"text": "GOODBYE"}]
        }),
        "goodbye cruel Alan! Goodbye cruel Alan! GOODBYE cruel Alan! ",
    );
}

#[test]
fn deep_nested_relative_paths() {
    compile_to(
        "{{#outer}}Goodbye {{#inner}}cruel {{../../omg}}{{/inner}}{{/outer}}",
        json!({"omg": "OMG!", "outer": [{"inner": [{"text": "goodbye"}]}]}),
        "Goodbye cruel OMG!",
    );
}

#[test]
fn block_helper_renders_the_body_against_an_arbitrary_value() {
    let data = object(vec![
        (
            "goodbyes",
            Value::block_helper(|_scope: &Scope, body: &mut dyn FnMut(&Value) -> String| {
                body(&Value::from(json!({"text": "GOODBYE"})))
            }),
        ),
        ("world", Value::from("world")),
    ]);
    let compiled = compile("{{#goodbyes}}{{text}}! {{/goodbyes}}cruel {{world}}!").unwrap();
    assert_eq!(compiled.apply(&data), "GOODBYE! cruel world!");
}

#[test]
fn block_helper_staying_in_the_same_context() {
    let data = object(vec![
        (
            "form",
            Value::block_helper(|scope: &Scope, body: &mut dyn FnMut(&Value) -> String| {
                format!("<form>{}</form>", body(scope.this()))
            }),
        ),
        ("name", Value::from("Yehuda")),
    ]);
    let compiled = compile("{{#form}}<p>{{name}}</p>{{/form}}").unwrap();
    assert_eq!(compiled.apply(&data), "<form><p>Yehuda</p></form>");
}

#[test]
fn block_helper_passing_a_new_context() {
    let data = object(vec![
        (
            "form",
            Value::block_helper(|scope: &Scope, body: &mut dyn FnMut(&Value) -> String| {
                format!("<form>{}</form>", body(scope.this()))
            }),
        ),
        ("yehuda", Value::from(json!({"name": "Yehuda"}))),
    ]);
    let compiled = compile("{{#form yehuda}}<p>{{name}}</p>{{/form}}").unwrap();
    assert_eq!(compiled.apply(&data), "<form><p>Yehuda</p></form>");
}

#[test]
fn block_helper_passing_a_complex_path_context() {
    let data = object(vec![
        (
            "form",
            Value::block_helper(|scope: &Scope, body: &mut dyn FnMut(&Value) -> String| {
                format!("<form>{}</form>", body(scope.this()))
            }),
        ),
        (
            "yehuda",
            Value::from(json!({"name": "Yehuda", "cat": {"name": "Harold"}})),
        ),
    ]);
    let compiled = compile("{{#form yehuda/cat}}<p>{{name}}</p>{{/form}}").unwrap();
    assert_eq!(compiled.apply(&data), "<form><p>Harold</p></form>");
}

#[test]
fn nested_block_helpers() {
    let yehuda = object(vec![
        ("name", Value::from("Yehuda")),
        (
            "link",
            Value::block_helper(|scope: &Scope, body: &mut dyn FnMut(&Value) -> String| {
                let name = scope.this().get("name").cloned().unwrap_or(Value::Null);
                format!("<a href='{}'>{}</a>", name, body(scope.this()))
            }),
        ),
    ]);
    let data = object(vec![
        (
            "form",
            Value::block_helper(|scope: &Scope, body: &mut dyn FnMut(&Value) -> String| {
                format!("<form>{}</form>", body(scope.this()))
            }),
        ),
        ("yehuda", yehuda),
    ]);
    let compiled =
        compile("{{#form yehuda}}<p>{{name}}</p>{{#link}}Hello{{/link}}{{/form}}").unwrap();
    assert_eq!(
        compiled.apply(&data),
        "<form><p>Yehuda</p><a href='Yehuda'>Hello</a></form>"
    );
}

#[test]
fn inline_helper_with_bound_lookup() {
    let hash = Value::from(json!({
        "prefix": "/root",
        "goodbyes": [{"text": "Goodbye", "url": "goodbye"}]
    }));
    let fallback = object(vec![(
        "link",
        Value::inline_helper(|scope: &Scope| {
            let prefix = scope.lookup("../prefix").unwrap_or(Value::Null);
            let url = scope.this().get("url").cloned().unwrap_or(Value::Null);
            let text = scope.this().get("text").cloned().unwrap_or(Value::Null);
            format!("<a href='{prefix}/{url}'>{text}</a>")
        }),
    )]);
    let compiled = compile("{{#goodbyes}}{{link}}{{/goodbyes}}").unwrap();
    assert_eq!(
        compiled.apply_with_fallbacks(&hash, &[fallback]),
        "<a href='/root/goodbye'>Goodbye</a>"
    );
}

#[test]
fn fallback_values_fill_top_level_misses() {
    let compiled = compile("Goodbye {{cruel}} {{world}}!").unwrap();
    let root = Value::from(json!({"cruel": "cruel"}));
    let fallback = Value::from(json!({"world": "world"}));
    assert_eq!(
        compiled.apply_with_fallbacks(&root, &[fallback]),
        "Goodbye cruel world!"
    );
}

#[test]
fn fallback_values_are_visible_inside_blocks() {
    let compiled = compile("Goodbye {{#iter}}{{cruel}} {{world}}{{/iter}}!").unwrap();
    let root = Value::from(json!({"iter": [{"cruel": "cruel"}]}));
    let fallback = Value::from(json!({"world": "world"}));
    assert_eq!(
        compiled.apply_with_fallbacks(&root, &[fallback]),
        "Goodbye cruel world!"
    );
}

#[test]
fn fallback_chain_is_consulted_in_order() {
    let compiled = compile("{{b}}").unwrap();
    let root = Value::from(json!({"a": 1}));
    assert_eq!(
        compiled.apply_with_fallbacks(&root, &[Value::from(json!({"b": 2}))]),
        "2"
    );
    // An earlier fallback wins over a later one.
    assert_eq!(
        compiled.apply_with_fallbacks(
            &root,
            &[Value::from(json!({"b": "first"})), Value::from(json!({"b": "second"}))]
        ),
        "first"
    );
}

#[test]
fn explicit_values_win_over_fallbacks() {
    let compiled = compile("{{a}}").unwrap();
    let root = Value::from(json!({"a": "explicit"}));
    assert_eq!(
        compiled.apply_with_fallbacks(&root, &[Value::from(json!({"a": "fallback"}))]),
        "explicit"
    );
}
