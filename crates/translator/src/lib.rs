//! repowatch translation backend adapter.
//!
//! Implements [`domain::Translator`] for the DeepL API (v2). Each call
//! translates exactly one fragment; there is no batching.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, endpoint selection, and response
//! parsing live here. Failures are returned as [`domain::TranslationError`];
//! the engine's translation boundary turns them into "unavailable".
//!
//! ## Endpoint selection
//!
//! DeepL issues free-tier keys with a `:fx` suffix; those must be sent to
//! `api-free.deepl.com`, all others to `api.deepl.com`.

use async_trait::async_trait;
use domain::{TranslationError, Translator};
use serde::Deserialize;
use tracing::debug;

const FREE_ENDPOINT: &str = "https://api-free.deepl.com";
const PRO_ENDPOINT: &str = "https://api.deepl.com";

/// Target language used when none is configured.
pub const DEFAULT_TARGET_LANG: &str = "JA";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

/// DeepL-backed [`Translator`].
pub struct DeepLTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    target_lang: String,
}

impl DeepLTranslator {
    /// Creates a translator for `api_key`, picking the free or pro endpoint
    /// from the key's suffix.
    pub fn new(api_key: impl Into<String>, target_lang: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint_for_key(&api_key).to_owned(),
            api_key,
            target_lang: target_lang.into(),
        }
    }

    /// Overrides the API root (tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_owned();
        self
    }

    /// The API root requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let resp = self
            .client
            .post(format!("{}/v2/translate", self.endpoint))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[("text", text), ("target_lang", self.target_lang.as_str())])
            .send()
            .await
            .map_err(|e| TranslationError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TranslationError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse =
            serde_json::from_str(&body).map_err(|e| TranslationError::Decode(e.to_string()))?;
        let translated = parsed
            .translations
            .into_iter()
            .next()
            .ok_or(TranslationError::EmptyResponse)?;
        debug!(target_lang = %self.target_lang, "DeepL translation received");
        Ok(translated.text)
    }
}
