use log::debug;
use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a description piped on stdin into a typed struct.
///
/// Returns `None` when stdin is a TTY or the pipe is empty. A document
/// opening with `{` is parsed as JSON, anything else as YAML.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(
    buffer: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    debug!("parsing {} bytes of piped input", trimmed.len());

    let parsed: T = if trimmed.starts_with('{') {
        serde_json::from_str(trimmed)
            .map_err(|e| format!("Failed to parse stdin as JSON: {}", e))?
    } else {
        serde_yaml::from_str(trimmed)
            .map_err(|e| format!("Failed to parse stdin as YAML: {}", e))?
    };
    Ok(Some(parsed))
}
