use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the result envelope to stdout.
pub fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    write_json(io::stdout().lock(), value)
}

fn write_json<W: Write>(mut out: W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_is_newline_terminated() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({"result": {"amount": "112500"}})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"amount\": \"112500\""));
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        assert!(write_json(Closed, &json!({"result": 1})).is_err());
    }
}
