use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// A result envelope becomes two-column `field,value` rows; an array of
/// objects (e.g. an ROI timeline) becomes one row per element.
pub fn print_csv(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    write_csv(csv::Writer::from_writer(stdout.lock()), value)?;
    Ok(())
}

fn write_csv<W: io::Write>(mut wtr: csv::Writer<W>, value: &Value) -> Result<(), csv::Error> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_fields(&mut wtr, result)?,
            Some(Value::Array(rows)) => write_array_csv(&mut wtr, rows)?,
            _ => write_fields(&mut wtr, map)?,
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
    }
    Ok(())
}

fn write_array_csv<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    arr: &[Value],
) -> Result<(), csv::Error> {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
