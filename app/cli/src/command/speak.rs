use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;
use voice::Language;
use voice::VoiceService;

use crate::config;

#[derive(Args)]
pub struct Speak {
    #[arg(long, help = "text")]
    text: String,

    #[arg(long, help = "language, en or hi", default_value = "en")]
    language: Language,

    #[arg(long, help = "voice id, overrides the language default")]
    voice: Option<String>,

    #[arg(long, help = "conf path")]
    conf: Option<PathBuf>,
}

impl Speak {
    pub async fn execute(&self) -> Result<()> {
        let mut config = config::load(self.conf.as_deref()).await?;
        if self.voice.is_some() {
            config.voice = self.voice.clone();
        }

        let service = VoiceService::from_config(config)?;
        info!("speak, service_type={}", service.service_type());
        service.speak(&self.text, self.language).await;
        Ok(())
    }
}
