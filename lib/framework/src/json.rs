use std::any;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

pub async fn load_file<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let name = path.to_string_lossy();
    let json = fs::read_to_string(path).await.with_context(|| format!("failed to read file, path={name}"))?;
    from_json(&json).with_context(|| format!("failed to load file, path={name}"))
}

/// Parse errors carry the position and the payload.
pub fn from_json<'a, T>(json: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str(json).map_err(|err| {
        anyhow!("failed to deserialize, line={}, column={}, error={err}, json={json}", err.line(), err.column())
    })
}

pub fn to_json<T>(object: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string(object)
        .map_err(|err| anyhow!("failed to serialize, type={}, error={err}", any::type_name::<T>()))
}
