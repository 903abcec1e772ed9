use serde_json::Value;

/// How each buffered record becomes one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// Compact JSON for every record.
    #[default]
    Json,
    /// JSON strings written without quotes, everything else as compact JSON.
    Plain,
}

/// Render records one per line, joined by `\n` with no trailing newline.
///
/// An empty slice renders to an empty string.
pub fn render_lines(records: &[Value], format: LineFormat) -> String {
    records
        .iter()
        .map(|record| render_line(record, format))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(record: &Value, format: LineFormat) -> String {
    match (format, record) {
        (LineFormat::Plain, Value::String(text)) => text.clone(),
        _ => record.to_string(),
    }
}
