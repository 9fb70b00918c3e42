//! Quip thread fetching
//!
//! One authenticated GET per run, no retries. The thread JSON carries the
//! document body as an HTML string under `html`.

use learnmap_config::QuipConfig;
use log::info;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct Thread {
    html: String,
}

pub struct QuipClient<'a> {
    client: Client,
    config: &'a QuipConfig,
    token: String,
}

impl<'a> QuipClient<'a> {
    pub fn new(config: &'a QuipConfig, token: String) -> Self {
        Self {
            client: Client::new(),
            config,
            token,
        }
    }

    /// Fetch a document and return its HTML body.
    pub fn fetch_html(&self, document_id: &str) -> Result<String, FetchError> {
        let url = self.config.thread_url(document_id);
        info!("fetching {}", url);

        let request_error = |source| FetchError::Request {
            url: url.clone(),
            source,
        };
        let body = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(request_error)?;

        html_from_response(&body).map_err(|reason| FetchError::MalformedResponse { url, reason })
    }
}

/// Pull the `html` field out of a thread response body.
pub fn html_from_response(body: &str) -> Result<String, String> {
    serde_json::from_str::<Thread>(body)
        .map(|thread| thread.html)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_html_field() {
        let body = r#"{"thread": {"id": "AbC", "title": "Map"}, "html": "<h1>Map</h1>", "user_ids": []}"#;
        assert_eq!(html_from_response(body).unwrap(), "<h1>Map</h1>");
    }

    #[test]
    fn missing_html_field_is_an_error() {
        let body = r#"{"error": "Unauthorized", "error_code": 401}"#;
        let reason = html_from_response(body).unwrap_err();
        assert!(reason.contains("html"), "{}", reason);
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(html_from_response("<html>gateway timeout</html>").is_err());
    }
}
