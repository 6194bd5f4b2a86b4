use serde::Deserialize;

pub const ENDPOINT: &str = "https://api.mymemory.translated.net/get";
pub const LANGUAGE_PAIR: &str = "en|hi";

#[derive(Debug, Deserialize)]
pub struct TranslationResponse {
    #[serde(rename = "responseData", default)]
    pub response_data: Option<ResponseData>,
    #[serde(rename = "responseStatus")]
    pub response_status: ResponseStatus,
    #[serde(rename = "responseDetails", default)]
    pub response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
    #[serde(rename = "match", default)]
    pub match_score: Option<f64>,
}

/// error responses sometimes carry the status as a string, e.g. `"403"`
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseStatus {
    Code(i64),
    Text(String),
}

impl ResponseStatus {
    pub fn is_ok(&self) -> bool {
        match self {
            ResponseStatus::Code(code) => *code == 200,
            ResponseStatus::Text(text) => text.trim() == "200",
        }
    }
}
