//! Client for the generative guide ("Marcelle").

pub mod fallback;
pub mod prompt;

use crate::config::GuideConfig;
use crate::event::AppEvent;
use crate::session::store::GuideRequest;
use crate::ui::response::NavigationResponse;
use eframe::egui;
use serde::Deserialize;
use serde_json::json;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("guide returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("guide reply was empty")]
    EmptyReply,

    #[error("guide reply was not valid JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Removes markdown code fences the model sometimes wraps JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_reply(raw: &str) -> Result<NavigationResponse, GuideError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(GuideError::EmptyReply);
    }
    let response: NavigationResponse = serde_json::from_str(&cleaned)?;
    Ok(response.normalize())
}

#[derive(Clone)]
pub struct GuideClient {
    config: GuideConfig,
    http: reqwest::Client,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl GuideClient {
    pub fn new(
        config: GuideConfig,
        tx: mpsc::Sender<AppEvent>,
        runtime_handle: Handle,
    ) -> Result<Self, GuideError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            config,
            http,
            tx,
            runtime_handle,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Runs the request on the tokio runtime; the outcome comes back to the
    /// UI thread as [`AppEvent::GuideReplied`].
    pub fn send(&self, request: GuideRequest, ctx: &egui::Context) {
        let client = self.clone();
        let ctx = ctx.clone();
        tracing::debug!(
            generation = request.generation,
            screen_hint = request.screen_hint.as_ref().map(|screen| screen.as_str()),
            message_len = request.message.len(),
            "guide request"
        );

        self.runtime_handle.spawn(async move {
            let result = client.generate(&request).await;
            match &result {
                Ok(response) => tracing::debug!(
                    generation = request.generation,
                    screen = response.screen.as_str(),
                    "guide reply"
                ),
                Err(err) => tracing::warn!(
                    generation = request.generation,
                    %err,
                    "guide request failed"
                ),
            }
            let _ = client.tx.send(AppEvent::GuideReplied {
                generation: request.generation,
                message: request.message,
                result,
            });
            ctx.request_repaint();
        });
    }

    async fn generate(&self, request: &GuideRequest) -> Result<NavigationResponse, GuideError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GuideError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let text = prompt::build_prompt(
            &request.history,
            request.screen_hint.as_ref(),
            &request.message,
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GuideError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.first_text().ok_or(GuideError::EmptyReply)?;
        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::response::ScreenId;

    #[test]
    fn fenced_reply_is_parsed() {
        let raw = "```json\n{\"screen\":\"galerie\",\"voice\":\"Regarde!\",\"on_screen\":\"Galerie\",\"chips\":[\"A\",\"B\",\"C\"]}\n```";
        let response = parse_reply(raw).expect("fenced JSON should parse");
        assert_eq!(response.screen, ScreenId::Gallery);
        assert_eq!(response.chips.len(), 3);
    }

    #[test]
    fn prose_reply_is_malformed() {
        let err = parse_reply("Bonjour! Je suis Marcelle.").expect_err("prose should fail");
        assert!(matches!(err, GuideError::MalformedReply(_)));
    }

    #[test]
    fn blank_reply_is_empty() {
        let err = parse_reply("```json\n```").expect_err("blank reply should fail");
        assert!(matches!(err, GuideError::EmptyReply));
    }

    #[test]
    fn candidate_parts_are_joined() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"screen\":" }, { "text": "\"chat\"}" }] }
            }]
        }))
        .expect("payload should decode");
        let text = payload.first_text().expect("text should be present");
        let response = parse_reply(&text).expect("joined parts should parse");
        assert_eq!(response.screen, ScreenId::Chat);
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        let payload: GenerateContentResponse =
            serde_json::from_value(json!({})).expect("payload should decode");
        assert!(payload.first_text().is_none());
    }
}
