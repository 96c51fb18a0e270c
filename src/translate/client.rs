use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interface::{RemoteError, TranslationBackend};

/// Request body of the v2 translate endpoint
#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Client for a Google Cloud Translation v2 compatible endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GoogleTranslateClient {
    /// Create a new client; `timeout` bounds each HTTP exchange at the transport level
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    fn parse_response(body: &str) -> Result<String, RemoteError> {
        let response: TranslateResponse = serde_json::from_str(body)
            .map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

        response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                RemoteError::MalformedResponse("No translation received from API".to_string())
            })
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateClient {
    async fn call(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> Result<String, RemoteError> {
        let api_key = self.api_key.as_deref().ok_or(RemoteError::MissingCredential)?;

        let body = TranslateBody {
            q: text,
            source: source_lang.unwrap_or(""),
            target: target_lang,
            format: "text",
        };

        debug!(
            "Sending translation request: source={:?}, target={}, chars={}",
            source_lang,
            target_lang,
            text.chars().count()
        );

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
