use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time;

pub static WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";
pub static USER_AGENT: &str = "SX-URL-Generator/1.0";
pub static API_TIMEOUT_SECONDS: u64 = 10;

/// Read-only access to MediaWiki `api.php` endpoints.
///
/// Every failure mode (transport error, timeout, non-200 status, empty body,
/// malformed JSON, or a top-level `error` in the payload) comes back as `Err`.
#[async_trait]
pub trait WikiApi: Send + Sync {
    async fn get_json(&self, api_url: &str, params: &[(&str, &str)]) -> Result<Value>;
}

/// Returns the `api.php` URL of a language's Wikipedia.
pub fn wikipedia_api_url(lang: &str) -> String {
    format!("https://{lang}.wikipedia.org/w/api.php")
}

#[derive(Debug, Clone)]
pub struct HttpWikiApi {
    client: reqwest::Client,
}

impl HttpWikiApi {
    pub fn new() -> Result<Self> {
        let timeout = time::Duration::from_secs(API_TIMEOUT_SECONDS);
        let client = reqwest::ClientBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Only a plain 200 counts as an answer.
    pub fn check_status(api_url: &str, status: reqwest::StatusCode) -> Result<()> {
        if status != reqwest::StatusCode::OK {
            return Err(anyhow!("{api_url} returned HTTP {status}"));
        }
        Ok(())
    }

    /// Decodes a response body, rejecting empty bodies and API error payloads.
    pub fn parse_body(text: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Err(anyhow!("Empty response body"));
        }
        let v: Value = serde_json::from_str(text).map_err(|e| anyhow!("Malformed JSON: {e}"))?;
        if let Some(error) = v.get("error") {
            let code = error["code"].as_str().unwrap_or("unknown");
            return Err(anyhow!("API error '{code}'"));
        }
        Ok(v)
    }
}

#[async_trait]
impl WikiApi for HttpWikiApi {
    async fn get_json(&self, api_url: &str, params: &[(&str, &str)]) -> Result<Value> {
        let response = self.client.get(api_url).query(params).send().await?;
        Self::check_status(api_url, response.status())?;
        let text = response.text().await?;
        Self::parse_body(&text)
    }
}
