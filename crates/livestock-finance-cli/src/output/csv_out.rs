use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout.
///
/// Headline scalars flatten to field,value pairs, with nested objects (the
/// annual summary) dotted into the same block; each per-month series
/// (points, rows, months) then follows as its own table. Record widths
/// vary between blocks, so the writer runs flexible.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => write_result_csv(&mut wtr, map),
        Value::Array(arr) => write_series_csv(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([render_field(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_result_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, result: &Map<String, Value>) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut series: Vec<&Vec<Value>> = Vec::new();

    for (key, val) in result {
        match val {
            Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))) => {
                series.push(arr);
            }
            Value::Object(nested) => {
                for (sub, v) in nested {
                    pairs.push((format!("{}.{}", key, sub), render_field(v)));
                }
            }
            other => pairs.push((key.clone(), render_field(other))),
        }
    }

    if !pairs.is_empty() {
        let _ = wtr.write_record(["field", "value"]);
        for (field, rendered) in &pairs {
            let _ = wtr.write_record([field, rendered]);
        }
    }

    for arr in series {
        write_series_csv(wtr, arr);
    }
}

fn write_series_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([render_field(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(render_field).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn render_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
