use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Result;
use anyhow::anyhow;
use reqwest::Response;
use tracing::debug;

pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(300))
        .build()
        .unwrap()
});

pub trait ResponseExt: Sized {
    /// Passes the response through when its status is 2xx, otherwise reads the body into the error.
    fn ensure_success(self, api: &str) -> impl Future<Output = Result<Self>> + Send;
}

impl ResponseExt for Response {
    async fn ensure_success(self, api: &str) -> Result<Self> {
        let status = self.status();
        debug!("{api} api responded, status={status}");
        if status.is_success() {
            return Ok(self);
        }
        let response_text = self.text().await.unwrap_or_default();
        Err(anyhow!("failed to call {api} api, status={status}, response={response_text}"))
    }
}
