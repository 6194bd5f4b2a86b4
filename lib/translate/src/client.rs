use std::time::Duration;

use anyhow::Result;
use anyhow::anyhow;
use framework::http_client::HTTP_CLIENT;
use framework::json;
use reqwest::Url;
use tokio::time::sleep;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::mymemory_api::ENDPOINT;
use crate::mymemory_api::LANGUAGE_PAIR;
use crate::mymemory_api::TranslationResponse;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// delay after the failed attempt with zero-based index `attempt`, saturating at `Duration::MAX`
    pub fn backoff(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    // at least one request is always sent
    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

pub struct TranslationClient {
    endpoint: String,
    policy: RetryPolicy,
}

impl Default for TranslationClient {
    fn default() -> Self {
        TranslationClient::new(ENDPOINT.to_string(), RetryPolicy::default())
    }
}

impl TranslationClient {
    pub fn new(endpoint: String, policy: RetryPolicy) -> Self {
        let policy = RetryPolicy {
            max_attempts: policy.attempts(),
            ..policy
        };
        TranslationClient { endpoint, policy }
    }

    pub async fn translate(&self, text: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.call_api(text).await {
                Ok(translated_text) => {
                    info!("translated text, attempt={}, translated_text={translated_text}", attempt + 1);
                    return Ok(translated_text);
                }
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.policy.attempts() {
                        return Err(anyhow!("translation failed after {attempt} attempts: {err}"));
                    }
                    let delay = self.policy.backoff(attempt - 1);
                    warn!("translation attempt failed, attempt={attempt}, retry_in={delay:?}, error={err}");
                    sleep(delay).await;
                }
            }
        }
    }

    async fn call_api(&self, text: &str) -> Result<String> {
        let url = Url::parse_with_params(&self.endpoint, &[("q", text), ("langpair", LANGUAGE_PAIR)])?;
        debug!("call mymemory api, url={url}");

        let response = HTTP_CLIENT.get(url).header("Accept", "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error, status={status}"));
        }

        let response: TranslationResponse = json::from_json(&response.text().await?)?;
        if !response.response_status.is_ok() {
            let details = response.response_details.filter(|details| !details.is_empty());
            return Err(anyhow!(details.unwrap_or_else(|| "translation service error".to_string())));
        }

        match response.response_data.and_then(|data| data.translated_text) {
            Some(translated_text)
                if !translated_text.is_empty() && translated_text.to_lowercase() != text.to_lowercase() =>
            {
                Ok(translated_text)
            }
            _ => Err(anyhow!("translation service returned invalid result")),
        }
    }
}
