use anyhow::{Context, bail};
use serde_json::{Map, Value};
use std::path::Path;

/// Read a JSON object from `path`
pub fn load_object(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("ファイルを読み込めません: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("JSON として解析できません: {}", path.display()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}

/// Write `value` as pretty JSON to `path`
pub fn write_json(path: &Path, value: &impl serde::Serialize) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content + "\n")
        .with_context(|| format!("ファイルを書き込めません: {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
