use std::borrow::Cow;

use anyhow::Result;
use bytes::Bytes;
use framework::http_client::HTTP_CLIENT;
use framework::http_client::ResponseExt;
use framework::json;
use tracing::info;

use crate::elevenlabs_api::ENGLISH_VOICE;
use crate::elevenlabs_api::MULTILINGUAL_MODEL;
use crate::elevenlabs_api::MULTILINGUAL_VOICE;
use crate::elevenlabs_api::SynthesizeRequest;
use crate::elevenlabs_api::VoiceProfile;
use crate::elevenlabs_api::VoiceSettings;
use crate::elevenlabs_api::VoicesResponse;
use crate::language::Language;

pub struct ElevenLabs {
    pub base_url: String,
    pub api_key: String,
}

impl ElevenLabs {
    pub async fn voices(&self) -> Result<Vec<VoiceProfile>> {
        let url = format!("{}/voices", self.base_url);
        info!("call elevenlabs voices api, url={url}");
        let response = HTTP_CLIENT
            .get(&url)
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await?
            .ensure_success("elevenlabs")
            .await?;

        let response: VoicesResponse = json::from_json(&response.text().await?)?;
        Ok(response.voices)
    }

    pub async fn synthesize(&self, text: &str, language: Language, voice_id: Option<&str>) -> Result<Bytes> {
        let voice_id = voice_id.unwrap_or_else(|| default_voice(language));
        let url = format!("{}/text-to-speech/{voice_id}", self.base_url);
        info!("call elevenlabs synthesize api, url={url}, language={language}");

        let request = SynthesizeRequest {
            text: Cow::from(text),
            model_id: MULTILINGUAL_MODEL,
            voice_settings: VoiceSettings::default(),
        };
        let body = json::to_json(&request)?;

        let response = HTTP_CLIENT
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "audio/mpeg")
            .body(body)
            .send()
            .await?
            .ensure_success("elevenlabs")
            .await?;

        Ok(response.bytes().await?)
    }
}

pub fn default_voice(language: Language) -> &'static str {
    match language {
        Language::English => ENGLISH_VOICE,
        Language::Hindi => MULTILINGUAL_VOICE,
    }
}
