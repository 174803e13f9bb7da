use super::template::render_template;
use log::error;
use serde_json::{Map, Value};

/// Emit one decoded record to stdout, either as a JSON line (field order
/// preserved) or through the user template. Diagnostics never share the
/// record stream
pub(crate) fn write_record(record: &Map<String, Value>, template: &Option<String>) {
    if let Some(format) = template {
        let default_value = "";
        println!("{}", render_template(format, record, default_value));
        return;
    }

    let line_result = serde_json::to_string(record);
    match line_result {
        Ok(result) => println!("{result}"),
        Err(err) => error!("[output] Failed to serialize record: {err:?}"),
    }
}
