use std::env;

use anyhow::Result;
use serde::Deserialize;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::elevenlabs::ElevenLabs;
use crate::elevenlabs_api::BASE_URL;
use crate::elevenlabs_api::VoiceProfile;
use crate::language::Language;
use crate::native::NativeSpeech;
use crate::native::SystemSpeech;
use crate::native::Utterance;
use crate::player::AudioPlayer;
use crate::player::CommandPlayer;

pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
const PLACEHOLDER_API_KEY: &str = "your_elevenlabs_api_key_here";

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VoiceConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub voice: Option<String>,
    pub player: Option<Vec<String>>,
}

enum Mode {
    Remote(ElevenLabs),
    Native,
}

pub struct VoiceService<P = CommandPlayer, N = SystemSpeech> {
    mode: Mode,
    voice: Option<String>,
    player: P,
    native: N,
}

impl VoiceService {
    pub fn from_config(config: VoiceConfig) -> Result<Self> {
        let player = match config.player.as_deref() {
            Some(command) => CommandPlayer::from_command(command)?,
            None => CommandPlayer::default(),
        };
        Ok(VoiceService::new(config, player, SystemSpeech::new()))
    }
}

impl<P, N> VoiceService<P, N>
where
    P: AudioPlayer,
    N: NativeSpeech,
{
    pub fn new(config: VoiceConfig, player: P, native: N) -> Self {
        let mode = match credential(config.api_key.as_deref()) {
            Some(api_key) => {
                info!("elevenlabs voice service initialized");
                Mode::Remote(ElevenLabs {
                    base_url: config.base_url.unwrap_or_else(|| BASE_URL.to_string()),
                    api_key,
                })
            }
            None => {
                info!("using native speech synthesis, elevenlabs api key not provided");
                Mode::Native
            }
        };
        VoiceService {
            mode,
            voice: config.voice,
            player,
            native,
        }
    }

    pub async fn speak(&self, text: &str, language: Language) {
        if let Mode::Remote(elevenlabs) = &self.mode {
            info!("speak with elevenlabs, text={text}, language={language}");
            match self.speak_remote(elevenlabs, text, language).await {
                Ok(()) => return,
                Err(err) => warn!("elevenlabs failed, falling back to native speech, error={err:?}"),
            }
        }

        info!("speak with native speech, text={text}, language={language}");
        self.native.speak(Utterance::new(text, language));
    }

    async fn speak_remote(&self, elevenlabs: &ElevenLabs, text: &str, language: Language) -> Result<()> {
        let audio = elevenlabs.synthesize(text, language, self.voice.as_deref()).await?;
        self.player.play(audio).await
    }

    pub async fn voices(&self) -> Vec<VoiceProfile> {
        match &self.mode {
            Mode::Remote(elevenlabs) => elevenlabs.voices().await.unwrap_or_else(|err| {
                error!("failed to fetch voices, error={err:?}");
                vec![]
            }),
            Mode::Native => vec![],
        }
    }

    pub fn is_remote_available(&self) -> bool {
        matches!(self.mode, Mode::Remote(_))
    }

    pub fn service_type(&self) -> &'static str {
        match self.mode {
            Mode::Remote(_) => "ElevenLabs AI",
            Mode::Native => "Native Speech",
        }
    }
}

/// Resolves the api key, `None` means remote synthesis is unavailable.
///
/// An explicit key wins over the environment, `env:NAME` reads the key from the named variable.
fn credential(api_key: Option<&str>) -> Option<String> {
    resolve_credential(api_key, |name| env::var(name).ok())
}

fn resolve_credential(api_key: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    let api_key = match api_key {
        Some(api_key) if !api_key.is_empty() => match api_key.strip_prefix("env:") {
            Some(name) => lookup(name)?,
            None => api_key.to_string(),
        },
        _ => lookup(API_KEY_ENV)?,
    };
    usable(&api_key).then_some(api_key)
}

fn usable(api_key: &str) -> bool {
    let api_key = api_key.trim();
    !api_key.is_empty() && api_key != PLACEHOLDER_API_KEY
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use anyhow::anyhow;
    use axum::Json;
    use axum::Router;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::response::Response;
    use axum::routing::get;
    use axum::routing::post;
    use bytes::Bytes;
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingPlayer {
        played: Arc<Mutex<Vec<Bytes>>>,
        fail: bool,
    }

    impl AudioPlayer for RecordingPlayer {
        async fn play(&self, audio: Bytes) -> Result<()> {
            self.played.lock().unwrap().push(audio);
            if self.fail {
                return Err(anyhow!("failed to decode audio"));
            }
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSpeech {
        utterances: Arc<Mutex<Vec<Utterance>>>,
    }

    impl NativeSpeech for RecordingSpeech {
        fn speak(&self, utterance: Utterance) {
            self.utterances.lock().unwrap().push(utterance);
        }
    }

    impl RecordingSpeech {
        fn utterances(&self) -> Vec<Utterance> {
            self.utterances.lock().unwrap().clone()
        }
    }

    #[derive(Clone)]
    struct MockApi {
        calls: Arc<AtomicUsize>,
        status: StatusCode,
    }

    async fn synthesize(State(api): State<MockApi>) -> Response {
        api.calls.fetch_add(1, Ordering::SeqCst);
        if api.status.is_success() {
            (api.status, b"ID3mpeg".to_vec()).into_response()
        } else {
            (api.status, "quota exceeded").into_response()
        }
    }

    async fn voices(State(api): State<MockApi>) -> Response {
        api.calls.fetch_add(1, Ordering::SeqCst);
        if !api.status.is_success() {
            return api.status.into_response();
        }
        Json(json!({ "voices": [{ "voice_id": "v1", "name": "Adam", "category": "premade", "labels": {} }] }))
            .into_response()
    }

    async fn mock_api(status: StatusCode) -> (String, MockApi) {
        let api = MockApi {
            calls: Arc::new(AtomicUsize::new(0)),
            status,
        };
        let router = Router::new()
            .route("/text-to-speech/{voice_id}", post(synthesize))
            .route("/voices", get(voices))
            .with_state(api.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (format!("http://{address}"), api)
    }

    fn config(api_key: &str, base_url: &str) -> VoiceConfig {
        VoiceConfig {
            api_key: Some(api_key.to_string()),
            base_url: Some(base_url.to_string()),
            ..VoiceConfig::default()
        }
    }

    #[tokio::test]
    async fn speak_without_credential_uses_native_speech_only() {
        let (base_url, api) = mock_api(StatusCode::OK).await;
        let player = RecordingPlayer::default();
        let speech = RecordingSpeech::default();
        let service = VoiceService::new(config(PLACEHOLDER_API_KEY, &base_url), player.clone(), speech.clone());

        service.speak("hello", Language::English).await;
        service.speak("namaste", Language::Hindi).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(player.played.lock().unwrap().is_empty());
        let utterances = speech.utterances();
        assert_eq!(utterances.len(), 2);
        assert_eq!((utterances[0].text.as_str(), utterances[0].locale), ("hello", "en-US"));
        assert_eq!((utterances[1].text.as_str(), utterances[1].locale), ("namaste", "hi-IN"));
        assert!(!service.is_remote_available());
        assert_eq!(service.service_type(), "Native Speech");
    }

    #[tokio::test]
    async fn speak_plays_remote_audio() {
        let (base_url, api) = mock_api(StatusCode::OK).await;
        let player = RecordingPlayer::default();
        let speech = RecordingSpeech::default();
        let service = VoiceService::new(config("secret", &base_url), player.clone(), speech.clone());

        service.speak("hello", Language::English).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(player.played.lock().unwrap().as_slice(), [Bytes::from_static(b"ID3mpeg")]);
        assert!(speech.utterances().is_empty());
        assert!(service.is_remote_available());
        assert_eq!(service.service_type(), "ElevenLabs AI");
    }

    #[tokio::test]
    async fn speak_falls_back_when_synthesis_fails() {
        let (base_url, api) = mock_api(StatusCode::TOO_MANY_REQUESTS).await;
        let player = RecordingPlayer::default();
        let speech = RecordingSpeech::default();
        let service = VoiceService::new(config("secret", &base_url), player.clone(), speech.clone());

        service.speak("namaste", Language::Hindi).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert!(player.played.lock().unwrap().is_empty());
        assert_eq!(speech.utterances(), vec![Utterance::new("namaste", Language::Hindi)]);
    }

    #[tokio::test]
    async fn speak_falls_back_when_playback_fails() {
        let (base_url, _) = mock_api(StatusCode::OK).await;
        let player = RecordingPlayer {
            fail: true,
            ..RecordingPlayer::default()
        };
        let speech = RecordingSpeech::default();
        let service = VoiceService::new(config("secret", &base_url), player.clone(), speech.clone());

        service.speak("hello", Language::English).await;

        assert_eq!(player.played.lock().unwrap().len(), 1);
        assert_eq!(speech.utterances(), vec![Utterance::new("hello", Language::English)]);
    }

    #[tokio::test]
    async fn voices_lists_remote_profiles() {
        let (base_url, _) = mock_api(StatusCode::OK).await;
        let service =
            VoiceService::new(config("secret", &base_url), RecordingPlayer::default(), RecordingSpeech::default());

        let voices = service.voices().await;

        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].voice_id, "v1");
    }

    #[tokio::test]
    async fn voices_is_empty_on_fetch_failure() {
        let (base_url, api) = mock_api(StatusCode::INTERNAL_SERVER_ERROR).await;
        let service =
            VoiceService::new(config("secret", &base_url), RecordingPlayer::default(), RecordingSpeech::default());

        assert!(service.voices().await.is_empty());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn voices_is_empty_without_credential() {
        let (base_url, api) = mock_api(StatusCode::OK).await;
        let service =
            VoiceService::new(config("  ", &base_url), RecordingPlayer::default(), RecordingSpeech::default());

        assert!(!service.is_remote_available());
        assert!(service.voices().await.is_empty());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn credential_rejects_blank_and_placeholder_keys() {
        assert!(!usable(""));
        assert!(!usable("   "));
        assert!(!usable(PLACEHOLDER_API_KEY));
        assert!(usable("sk_123"));
        assert_eq!(credential(Some(PLACEHOLDER_API_KEY)), None);
        assert_eq!(credential(Some("sk_123")), Some("sk_123".to_string()));
        assert_eq!(credential(Some("  ")), None);
    }

    #[test]
    fn credential_reads_named_variable() {
        assert_eq!(credential(Some("env:VAANI_TEST_UNSET_VARIABLE")), None);
        assert_eq!(credential(Some("env:PATH")), env::var("PATH").ok());
    }

    fn environment(variables: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let variables: HashMap<String, String> =
            variables.iter().map(|(name, value)| (name.to_string(), value.to_string())).collect();
        move |name| variables.get(name).cloned()
    }

    #[test]
    fn missing_or_empty_key_reads_default_variable() {
        let with_key = environment(&[(API_KEY_ENV, "sk_from_env")]);
        assert_eq!(resolve_credential(None, &with_key), Some("sk_from_env".to_string()));
        assert_eq!(resolve_credential(Some(""), &with_key), Some("sk_from_env".to_string()));

        let without_key = environment(&[]);
        assert_eq!(resolve_credential(None, &without_key), None);
        assert_eq!(resolve_credential(Some(""), &without_key), None);
    }

    #[test]
    fn default_variable_is_judged_like_explicit_key() {
        let placeholder = environment(&[(API_KEY_ENV, PLACEHOLDER_API_KEY)]);
        assert_eq!(resolve_credential(None, &placeholder), None);

        let blank = environment(&[(API_KEY_ENV, "  ")]);
        assert_eq!(resolve_credential(Some(""), &blank), None);
    }

    #[test]
    fn explicit_key_ignores_default_variable() {
        let with_key = environment(&[(API_KEY_ENV, "sk_from_env")]);

        assert_eq!(resolve_credential(Some("sk_explicit"), &with_key), Some("sk_explicit".to_string()));
        assert_eq!(resolve_credential(Some("  "), &with_key), None);
        assert_eq!(resolve_credential(Some("env:OTHER"), &with_key), None);
    }
}
