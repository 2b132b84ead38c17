use serde_json::Value;

/// Fields tried in order when printing a single headline figure.
const PRIORITY_KEYS: [&str; 6] = [
    "net_monthly_income",
    "monthly_payment",
    "amount",
    "total_roi_pct",
    "roi_pct",
    "total_upfront_cost",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_net_income() {
        let v = json!({"result": {"actual_price": "5000000", "net_monthly_income": "-6133.56"}});
        assert_eq!(minimal_line(&v), "-6133.56");
    }

    #[test]
    fn test_skips_null_priority_fields() {
        let v = json!({"result": {"monthly_payment": null, "amount": "112500"}});
        assert_eq!(minimal_line(&v), "112500");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let v = json!({"result": {"band": 5}});
        assert_eq!(minimal_line(&v), "band: 5");
    }
}
