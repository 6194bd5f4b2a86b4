pub mod client;
pub mod mymemory_api;
pub mod text;

pub use client::RetryPolicy;
pub use client::TranslationClient;
pub use text::TextError;
pub use text::prepare_text;
pub use text::validate_text;
