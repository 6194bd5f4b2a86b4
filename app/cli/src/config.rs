use std::env;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use framework::json;
use tracing::info;
use voice::VoiceConfig;

pub async fn load(path: Option<&Path>) -> Result<VoiceConfig> {
    if let Some(path) = path {
        info!("load config, path={}", path.to_string_lossy());
        return json::load_file(path).await;
    }

    let Some(path) = default_path() else {
        return Ok(VoiceConfig::default());
    };
    if !path.exists() {
        info!("config not found, use defaults, path={}", path.to_string_lossy());
        return Ok(VoiceConfig::default());
    }
    info!("load config, path={}", path.to_string_lossy());
    json::load_file(&path).await
}

fn default_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/vaani/voice.json"))
}
