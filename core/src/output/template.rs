use serde_json::{Map, Value};

/// Render a record through a user template. `{field}` references resolve against
/// the record, fields absent from the record resolve to the default value instead
/// of failing, provenance fields are only present on some record types. Literal
/// braces are escaped as `{{` and `}}`. Substituted values are never re-expanded
pub(crate) fn render_template(
    template: &str,
    record: &Map<String, Value>,
    default_value: &str,
) -> String {
    let mut rendered = String::new();
    let mut chars = template.chars().peekable();

    while let Some(entry) = chars.next() {
        if entry == '{' {
            if chars.peek() == Some(&'{') {
                chars.next();
                rendered.push('{');
                continue;
            }

            let mut field = String::new();
            let mut closed = false;
            for inner in chars.by_ref() {
                if inner == '}' {
                    closed = true;
                    break;
                }
                field.push(inner);
            }
            if !closed {
                // Unterminated reference, keep the text as is
                rendered.push('{');
                rendered.push_str(&field);
                break;
            }

            // Only the field name is resolved, a trailing format spec is dropped
            let name = field.split(':').next().unwrap_or_default();
            rendered.push_str(&field_value(record, name, default_value));
            continue;
        }

        if entry == '}' {
            if chars.peek() == Some(&'}') {
                chars.next();
            }
            rendered.push('}');
            continue;
        }

        rendered.push(entry);
    }

    rendered
}

fn field_value(record: &Map<String, Value>, name: &str, default_value: &str) -> String {
    match record.get(name) {
        Some(Value::String(result)) => result.to_string(),
        Some(result) => result.to_string(),
        None => default_value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::render_template;
    use serde_json::{json, Map, Value};

    fn record() -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(String::from("AppActivityId"), json!("ECB32AF3"));
        record.insert(String::from("ETag"), json!(100));
        record.insert(String::from("Tag"), Value::Null);
        record
    }

    #[test]
    fn test_render_template() {
        let result = render_template("{AppActivityId} tag:{ETag}", &record(), "");
        assert_eq!(result, "ECB32AF3 tag:100");
    }

    #[test]
    fn test_render_template_missing_field() {
        let result = render_template("user={_user} id={AppActivityId}", &record(), "");
        assert_eq!(result, "user= id=ECB32AF3");
    }

    #[test]
    fn test_render_template_missing_field_default() {
        let result = render_template("user={_user}", &record(), "unknown");
        assert_eq!(result, "user=unknown");
    }

    #[test]
    fn test_render_template_escaped_braces() {
        let result = render_template("{{literal}} {ETag}", &record(), "");
        assert_eq!(result, "{literal} 100");
    }

    #[test]
    fn test_render_template_null_field() {
        let result = render_template("{Tag}", &record(), "");
        assert_eq!(result, "null");
    }

    #[test]
    fn test_render_template_format_spec_dropped() {
        let result = render_template("{ETag:>10}", &record(), "");
        assert_eq!(result, "100");
    }

    #[test]
    fn test_render_template_unterminated() {
        let result = render_template("start {ETag", &record(), "");
        assert_eq!(result, "start {ETag");
    }
}
