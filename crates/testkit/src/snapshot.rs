//! Golden files for persisted block-entity documents and change logs.
//!
//! A golden is the value rendered as pretty JSON with keys sorted at every
//! level and a trailing newline, so files diff cleanly under review. Set
//! `MILLDUSTRY_UPDATE_SNAPSHOTS=1` to rewrite goldens from the current output.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that switches golden checks into rewrite mode.
pub const UPDATE_SNAPSHOTS_ENV: &str = "MILLDUSTRY_UPDATE_SNAPSHOTS";

/// Compare `value` with the golden file at `path`, or rewrite the golden when
/// [`UPDATE_SNAPSHOTS_ENV`] is set.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let rendered = canonical_json(value)?;

    if update_requested() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create golden directory {}", dir.display()))?;
        }
        return fs::write(path, &rendered)
            .with_context(|| format!("Failed to write golden {}", path.display()));
    }

    let golden = fs::read_to_string(path).with_context(|| {
        format!(
            "No golden at {} (set {UPDATE_SNAPSHOTS_ENV}=1 to record it)",
            path.display()
        )
    })?;
    let golden = golden.replace("\r\n", "\n");

    if golden != rendered {
        bail!(
            "{} is out of date (set {UPDATE_SNAPSHOTS_ENV}=1 to accept)\n--- golden\n{golden}\n--- current\n{rendered}",
            path.display()
        );
    }
    Ok(())
}

fn update_requested() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Render `value` the way goldens are stored.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let mut tree = serde_json::to_value(value).context("Failed to serialize golden value")?;
    sort_keys(&mut tree);
    let mut text = serde_json::to_string_pretty(&tree).context("Failed to format golden JSON")?;
    text.push('\n');
    Ok(text)
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}
