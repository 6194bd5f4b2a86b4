use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::warn;
use voice::VoiceService;

use crate::config;

#[derive(Args)]
pub struct Voices {
    #[arg(long, help = "conf path")]
    conf: Option<PathBuf>,
}

impl Voices {
    pub async fn execute(&self) -> Result<()> {
        let config = config::load(self.conf.as_deref()).await?;
        let service = VoiceService::from_config(config)?;
        if !service.is_remote_available() {
            warn!("elevenlabs api key not provided, no voices to list");
        }

        for voice in service.voices().await {
            println!("{}\t{}\t{}", voice.voice_id, voice.name, voice.category);
        }
        Ok(())
    }
}
