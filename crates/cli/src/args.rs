//! Value parsers for the compound command-line flags.
//!
//! Each parser is plugged into clap through `value_parser = ...`, so a bad
//! value is reported as an argument error before any request is made.

use model::{Artifact, ModelError, MountMode, Volume};

/// Parses `CONTAINER_PATH:HOST_PATH[:MODE]`; the mode defaults to `RO`.
pub fn parse_volume(raw: &str) -> Result<Volume, String> {
    let pieces: Vec<&str> = raw.split(':').collect();
    let (container, host, mode) = match pieces.as_slice() {
        [container, host] => (*container, *host, MountMode::Ro),
        [container, host, mode] => (
            *container,
            *host,
            mode.parse::<MountMode>().map_err(|e| e.to_string())?,
        ),
        _ => {
            return Err(format!(
                "'{raw}' is not a volume: expected CONTAINER_PATH:HOST_PATH[:RO|RW]"
            ))
        }
    };
    Volume::new(container, host, mode).map_err(|e| e.to_string())
}

/// Parses `uri=... executable=... extract=... cache=...`.
///
/// Pairs are whitespace separated and may come in any order; `uri` is
/// required and the flags default to `false`.
pub fn parse_artifact(raw: &str) -> Result<Artifact, String> {
    let mut uri = None;
    let mut executable = false;
    let mut extract = false;
    let mut cache = false;

    for pair in raw.split_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("artifact field '{pair}' is not KEY=VALUE"))?;
        match key {
            "uri" => uri = Some(value),
            "executable" => executable = parse_bool(key, value)?,
            "extract" => extract = parse_bool(key, value)?,
            "cache" => cache = parse_bool(key, value)?,
            other => {
                return Err(format!(
                    "unknown artifact field '{other}': expected uri, executable, extract or cache"
                ))
            }
        }
    }

    let uri = uri.ok_or_else(|| ModelError::Required { field: "Artifact.uri" }.to_string())?;
    Ok(Artifact::new(uri)
        .map_err(|e| e.to_string())?
        .with_executable(executable)
        .with_extract(extract)
        .with_cache(cache))
}

/// Parses `KEY=VALUE`; the value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("'{raw}' is not KEY=VALUE")),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse()
        .map_err(|_| format!("artifact field '{key}' must be true or false, got '{value}'"))
}
