//! Input framing: a JSON array of logs, or an object with a `logs` array.

use anyhow::{bail, Context, Result};
use logdecode_core::event::RawLog;
use std::path::Path;

pub fn read_logs(path: &Path, limit: Option<usize>) -> Result<Vec<RawLog>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading input '{}'", path.display()))?;
    parse_logs(&content, limit).with_context(|| format!("parsing input '{}'", path.display()))
}

/// Parse the input document, keeping only the first `limit` logs if given.
pub fn parse_logs(json: &str, limit: Option<usize>) -> Result<Vec<RawLog>> {
    let doc: serde_json::Value = serde_json::from_str(json).context("input is not valid JSON")?;

    let list = match doc {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("logs") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => bail!("`logs` must be an array"),
            None => bail!("input object has no `logs` array"),
        },
        _ => bail!("input must be an array of logs or an object with a `logs` array"),
    };

    let take = limit.unwrap_or(list.len());
    list.into_iter()
        .take(take)
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value::<RawLog>(value).with_context(|| format!("log #{i} is malformed"))
        })
        .collect()
}
