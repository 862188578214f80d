//! Two-pass template rendering engine.
//!
//! Pass one substitutes `{{variable}}` placeholders for every supplied
//! variable. Placeholders with no matching variable are left literally in
//! the output. Pass two resolves single-level `{{#key}}...{{/key}}`
//! conditional blocks against the truthiness of `variables[key]`: a truthy
//! value keeps the block content, a falsy or absent one drops it. Because
//! substitution runs first, any placeholder inside a block is already
//! resolved (or left literal) before the block decision is made. Nested
//! blocks are not supported.

use serde_json::Value;

/// Variable bag supplied by callers alongside a send request
pub type VariableMap = serde_json::Map<String, Value>;

/// Render a template string against a variable bag.
///
/// Rendering is deterministic: the same template and variables always
/// yield byte-identical output.
pub fn render(template: &str, variables: &VariableMap) -> String {
    let substituted = substitute(template, variables);
    apply_conditionals(&substituted, variables)
}

/// Substitution pass: replace every `{{key}}` occurrence globally for each
/// variable present in the bag.
fn substitute(template: &str, variables: &VariableMap) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let pattern = format!("{{{{{}}}}}", key);
        result = result.replace(&pattern, &value_to_string(value));
    }

    result
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // Arrays and objects render as their JSON representation
        _ => value.to_string(),
    }
}

/// Conditional pass: scan for `{{#key}}content{{/key}}` blocks and keep or
/// drop the content based on the truthiness of `variables[key]`.
fn apply_conditionals(input: &str, variables: &VariableMap) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("{{#") {
        let after_open = &rest[open + 3..];
        let Some(key_end) = after_open.find("}}") else {
            // Unterminated opening tag, emit the remainder as-is
            break;
        };
        let key = &after_open[..key_end];
        let content_start = open + 3 + key_end + 2;
        let closing = format!("{{{{/{}}}}}", key);

        let Some(close) = rest[content_start..].find(&closing) else {
            // No matching closing tag, keep the opening tag literally
            out.push_str(&rest[..content_start]);
            rest = &rest[content_start..];
            continue;
        };

        out.push_str(&rest[..open]);
        if is_truthy(variables.get(key)) {
            out.push_str(&rest[content_start..content_start + close]);
        }
        rest = &rest[content_start + close + closing.len()..];
    }

    out.push_str(rest);
    out
}

/// Truthiness for conditional blocks: present, non-empty string, non-zero
/// number, `true`. Arrays and objects count as present.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> VariableMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("test variables must be an object"),
        }
    }

    #[test]
    fn test_substitute_simple() {
        let out = render("Hello, {{name}}!", &vars(json!({"name": "World"})));
        assert_eq!(out, "Hello, World!");
    }

    #[test]
    fn test_substitute_multiple_occurrences() {
        let out = render(
            "{{position}} / apply for {{position}} at {{company}}",
            &vars(json!({"position": "Engineer", "company": "Acme"})),
        );
        assert_eq!(out, "Engineer / apply for Engineer at Acme");
    }

    #[test]
    fn test_unresolved_placeholders_stay_literal() {
        let out = render("{{x}} {{y}}", &vars(json!({"x": "A"})));
        assert_eq!(out, "A {{y}}");
    }

    #[test]
    fn test_number_and_bool_coercion() {
        let out = render(
            "{{count}} items, confirmed={{ok}}",
            &vars(json!({"count": 42, "ok": true})),
        );
        assert_eq!(out, "42 items, confirmed=true");
    }

    #[test]
    fn test_null_renders_empty() {
        let out = render("[{{gone}}]", &vars(json!({"gone": null})));
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_conditional_truthy_keeps_content() {
        let out = render("a{{#flag}}b{{/flag}}c", &vars(json!({"flag": true})));
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_conditional_falsy_removes_content() {
        let out = render("a{{#flag}}b{{/flag}}c", &vars(json!({"flag": false})));
        assert_eq!(out, "ac");
    }

    #[test]
    fn test_conditional_absent_removes_content() {
        let out = render("a{{#flag}}b{{/flag}}c", &vars(json!({})));
        assert_eq!(out, "ac");
    }

    #[test]
    fn test_conditional_empty_string_is_falsy() {
        let out = render("a{{#flag}}b{{/flag}}c", &vars(json!({"flag": ""})));
        assert_eq!(out, "ac");
    }

    #[test]
    fn test_conditional_zero_is_falsy() {
        let out = render("a{{#n}}b{{/n}}c", &vars(json!({"n": 0})));
        assert_eq!(out, "ac");
    }

    #[test]
    fn test_substitution_inside_conditional_block() {
        let out = render(
            "{{#meetingLink}}Join: {{meetingLink}}{{/meetingLink}}",
            &vars(json!({"meetingLink": "https://meet.example/abc"})),
        );
        assert_eq!(out, "Join: https://meet.example/abc");
    }

    #[test]
    fn test_multiple_conditional_blocks() {
        let out = render(
            "{{#a}}one {{/a}}{{#b}}two {{/b}}end",
            &vars(json!({"a": true, "b": false})),
        );
        assert_eq!(out, "one end");
    }

    #[test]
    fn test_unclosed_block_left_literal() {
        let out = render("x{{#flag}}y", &vars(json!({"flag": true})));
        assert_eq!(out, "x{{#flag}}y");
    }

    #[test]
    fn test_rendering_is_idempotent_across_calls() {
        let template = "{{#loc}}At {{loc}}{{/loc}}: {{who}}";
        let variables = vars(json!({"loc": "HQ", "who": "Dana"}));
        let first = render(template, &variables);
        let second = render(template, &variables);
        assert_eq!(first, second);
        assert_eq!(first, "At HQ: Dana");
    }
}
