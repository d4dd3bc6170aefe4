use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Render output as text tables using the tabled crate.
///
/// Stage results share one shape: headline scalars, an optional nested
/// object (the annual summary), and a per-month series (points, rows,
/// months). Scalars print first as a field/value table, then each nested
/// piece under its own name, then the envelope's warnings and methodology.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    let result = envelope.and_then(|m| m.get("result")).unwrap_or(value);

    match result {
        Value::Object(map) => print_result_tables(map),
        Value::Array(arr) => print_series_table(arr),
        other => println!("{}", other),
    }

    if let Some(envelope) = envelope {
        print_envelope_notes(envelope);
    }
}

fn print_result_tables(result: &Map<String, Value>) {
    let headline: Vec<(&String, String)> = result
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k, render_cell(v)))
        .collect();

    if !headline.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, rendered) in &headline {
            builder.push_record([key.as_str(), rendered.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in result {
        match val {
            Value::Object(map) => {
                println!("\n{}:", key);
                print_field_value_table(map);
            }
            Value::Array(arr) => {
                println!("\n{}:", key);
                print_series_table(arr);
            }
            _ => {}
        }
    }
}

fn print_field_value_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &render_cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_series_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", render_cell(item));
        }
        return;
    };

    // Column order comes from the first row; every row shares the shape.
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());

    for item in arr {
        if let Value::Object(map) = item {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(*h).map(render_cell).unwrap_or_default()),
            );
        }
    }

    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".into(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
