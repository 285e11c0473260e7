//! The runnable code snippet: a displayed fetch and the real request behind
//! its play button.
//!
//! The request has no retry and no timeout. When it fails the snippet stays
//! in `Loading`; the failure is only logged and returned to the caller.

use crate::error::Result;
use crate::highlight::{highlight, Token};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

/// Stylesheet the snippet fetches.
pub const DEFAULT_ASSET_URL: &str = "https://linuselvius.com/komplettering_/media-queries.css";

/// Output panel state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "body", rename_all = "snake_case")]
pub enum SnippetState {
    /// Never run; the panel is hidden
    Idle,
    Loading,
    Loaded(String),
}

/// What the snippet box shows.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetView<'a> {
    pub code: &'a str,
    pub tokens: Vec<Token<'a>>,
    pub output: SnippetState,
}

pub struct SnippetRunner {
    client: reqwest::Client,
    url: String,
    code: String,
    state: watch::Sender<SnippetState>,
}

impl SnippetRunner {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let code = format!(
            "\nconst response = await fetch('{}')\nconst css = await response.text()\nconsole.log(css)\n    ",
            url
        );
        Self {
            client: reqwest::Client::new(),
            url,
            code,
            state: watch::channel(SnippetState::Idle).0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Source shown in the box.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> SnippetState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SnippetState> {
        self.state.subscribe()
    }

    pub fn view(&self) -> SnippetView<'_> {
        SnippetView {
            code: &self.code,
            tokens: highlight(&self.code),
            output: self.state(),
        }
    }

    /// Fetch the asset and show its body verbatim.
    ///
    /// Non-success statuses are not errors: their body is shown like any
    /// other.
    pub async fn run(&self) -> Result<String> {
        self.state.send_replace(SnippetState::Loading);
        info!("Fetching {}", self.url);

        match self.fetch().await {
            Ok(body) => {
                self.state.send_replace(SnippetState::Loaded(body.clone()));
                Ok(body)
            }
            Err(e) => {
                warn!("Fetch of {} failed: {}", self.url, e);
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Colour;

    #[test]
    fn code_embeds_url() {
        let runner = SnippetRunner::new(DEFAULT_ASSET_URL);
        assert!(runner.code().contains(DEFAULT_ASSET_URL));
        assert!(runner.code().starts_with("\nconst response = await fetch('"));
        assert_eq!(runner.state(), SnippetState::Idle);
    }

    #[test]
    fn view_is_highlighted() {
        let runner = SnippetRunner::new("http://localhost/a.css");
        let view = runner.view();
        let first = view.tokens.iter().find(|t| t.colour.is_some()).unwrap();
        assert_eq!(first.text, "const");
        assert_eq!(first.colour, Some(Colour::Red));
        assert_eq!(
            view.tokens.iter().map(|t| t.text).collect::<String>(),
            view.code
        );
    }

    #[tokio::test]
    async fn failed_fetch_stays_loading() {
        // Nothing listens on the discard port
        let runner = SnippetRunner::new("http://127.0.0.1:9/missing.css");
        let mut rx = runner.subscribe();

        assert!(runner.run().await.is_err());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SnippetState::Loading);
        assert_eq!(runner.state(), SnippetState::Loading);
    }

    #[test]
    fn state_serializes_tagged() {
        let json = serde_json::to_value(SnippetState::Loaded("a{}".into())).unwrap();
        assert_eq!(json["state"], "loaded");
        assert_eq!(json["body"], "a{}");
        let json = serde_json::to_value(SnippetState::Loading).unwrap();
        assert_eq!(json["state"], "loading");
    }
}
