pub mod elevenlabs;
pub mod elevenlabs_api;
pub mod language;
pub mod native;
pub mod player;
pub mod service;

pub use language::Language;
pub use service::VoiceConfig;
pub use service::VoiceService;
