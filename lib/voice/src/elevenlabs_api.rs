use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

pub const BASE_URL: &str = "https://api.elevenlabs.io/v1";
pub const MULTILINGUAL_MODEL: &str = "eleven_multilingual_v2";

// public voices: adam for english, the multilingual voice pronounces hindi better
pub const ENGLISH_VOICE: &str = "pNInz6obpgDQGcFmaJgB";
pub const MULTILINGUAL_VOICE: &str = "pMsXgVXv3BLzUgSXRplE";

#[derive(Debug, Serialize)]
pub struct SynthesizeRequest<'a> {
    pub text: Cow<'a, str>,
    pub model_id: &'static str,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        VoiceSettings {
            stability: 0.75,
            similarity_boost: 0.75,
            style: Some(0.5),
            use_speaker_boost: Some(true),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoicesResponse {
    #[serde(default)]
    pub voices: Vec<VoiceProfile>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VoiceProfile {
    pub voice_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub labels: VoiceLabels,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VoiceLabels {
    pub accent: Option<String>,
    pub description: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub use_case: Option<String>,
}
