use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::thread;

use anyhow::Result;
use anyhow::anyhow;
use tracing::debug;
use tracing::warn;
use tts::Tts;

use crate::language::Language;

pub const SPEECH_RATE: f32 = 0.8;
pub const SPEECH_PITCH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: &str, language: Language) -> Self {
        Utterance {
            text: text.to_string(),
            locale: language.locale(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        }
    }
}

/// The platform's own speech synthesizer. Submitting is fire-and-forget.
pub trait NativeSpeech: Send + Sync {
    fn speak(&self, utterance: Utterance);
}

/// Speaks through the `tts` crate on a dedicated thread, which owns the platform engine.
pub struct SystemSpeech {
    sender: Option<Sender<Utterance>>,
}

impl SystemSpeech {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new().name("native-speech".to_string()).spawn(move || run(receiver));
        match worker {
            Ok(_) => SystemSpeech { sender: Some(sender) },
            Err(err) => {
                warn!("failed to start native speech thread, error={err}");
                SystemSpeech { sender: None }
            }
        }
    }
}

impl Default for SystemSpeech {
    fn default() -> Self {
        SystemSpeech::new()
    }
}

impl NativeSpeech for SystemSpeech {
    fn speak(&self, utterance: Utterance) {
        debug!("submit utterance, locale={}, rate={}, pitch={}", utterance.locale, utterance.rate, utterance.pitch);
        let submitted = self.sender.as_ref().is_some_and(|sender| sender.send(utterance).is_ok());
        if !submitted {
            warn!("speech synthesis not supported on this platform");
        }
    }
}

fn run(receiver: Receiver<Utterance>) {
    let mut tts = match Tts::default() {
        Ok(tts) => tts,
        Err(err) => {
            warn!("speech synthesis not supported on this platform, error={err}");
            for utterance in receiver {
                debug!("drop utterance, locale={}", utterance.locale);
            }
            return;
        }
    };

    for utterance in receiver {
        if let Err(err) = speak(&mut tts, &utterance) {
            warn!("native speech failed, locale={}, error={err}", utterance.locale);
        }
    }
}

fn speak(tts: &mut Tts, utterance: &Utterance) -> Result<()> {
    let features = tts.supported_features();

    if features.voice {
        let voices = tts.voices().map_err(|err| anyhow!("failed to get voices, error={err}"))?;
        let languages: Vec<String> = voices.iter().map(|voice| voice.language().as_str().to_string()).collect();
        match voice_index(&languages, utterance.locale) {
            Some(index) => {
                debug!("select voice, index={index}, language={}", languages[index]);
                tts.set_voice(&voices[index]).map_err(|err| anyhow!("failed to set voice, error={err}"))?;
            }
            None => warn!("no voice for locale, keep default voice, locale={}", utterance.locale),
        }
    }

    if features.rate {
        let rate = scale(utterance.rate, tts.min_rate(), tts.normal_rate(), tts.max_rate());
        tts.set_rate(rate).map_err(|err| anyhow!("failed to set rate, error={err}"))?;
    }

    if features.pitch {
        let pitch = scale(utterance.pitch, tts.min_pitch(), tts.normal_pitch(), tts.max_pitch());
        tts.set_pitch(pitch).map_err(|err| anyhow!("failed to set pitch, error={err}"))?;
    }

    tts.speak(utterance.text.clone(), false).map_err(|err| anyhow!("speak failed, error={err}"))?;
    Ok(())
}

// rate and pitch are factors of the engine's normal value
fn scale(factor: f32, min: f32, normal: f32, max: f32) -> f32 {
    (normal * factor).clamp(min, max)
}

// exact locale first, then any voice sharing the primary language subtag
fn voice_index(languages: &[String], locale: &str) -> Option<usize> {
    let primary = |tag: &str| tag.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
    languages
        .iter()
        .position(|language| language.replace('_', "-").eq_ignore_ascii_case(locale))
        .or_else(|| languages.iter().position(|language| primary(language) == primary(locale)))
}
