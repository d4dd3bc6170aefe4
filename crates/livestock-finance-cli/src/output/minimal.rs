use serde_json::{Map, Value};

/// Print just the key answer value from the output.
///
/// Each stage has one headline figure: billing's gross revenue, feed's
/// final investment, weight's final kilograms, the day-count helper's
/// days, the cash-flow annual result, or the latest break-even price.
/// Anything else falls back to the first field of the result.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result else {
        println!("{}", render_minimal(result));
        return;
    };

    if let Some(headline) = headline_value(map) {
        println!("{}", render_minimal(headline));
    } else if let Some((key, val)) = map.iter().next() {
        println!("{}: {}", key, render_minimal(val));
    }
}

/// The stage's single most useful number, when the shape is recognized.
fn headline_value(map: &Map<String, Value>) -> Option<&Value> {
    for key in ["gross_revenue", "final_investment", "final_weight_kg", "days"] {
        match map.get(key) {
            Some(Value::Null) | None => {}
            Some(val) => return Some(val),
        }
    }

    // Cash-flow statements headline on the annual result.
    if let Some(val) = map.get("summary").and_then(|s| s.get("result")) {
        return Some(val);
    }

    // Break-even analyses headline on the latest month's price.
    map.get("rows")
        .and_then(Value::as_array)
        .and_then(|rows| rows.last())
        .and_then(|last| last.get("break_even_price"))
}

fn render_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
