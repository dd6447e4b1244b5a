use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TelegramCredentials;
use crate::error::NotifyError;
use crate::notify::Notifier;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Bot API `sendMessage` with legacy Markdown.
pub struct TelegramNotifier {
    base_url: url::Url,
    credentials: TelegramCredentials,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(
        base_url: &str,
        credentials: TelegramCredentials,
        client: reqwest::Client,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            base_url: url::Url::parse(base_url)?,
            credentials,
            client,
        })
    }

    pub fn send_message_url(&self) -> url::Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/bot{}/sendMessage",
            self.base_url.path().trim_end_matches('/'),
            self.credentials.token
        );
        url.set_path(&path);
        url
    }

    pub fn payload<'a>(&'a self, text: &'a str) -> SendMessage<'a> {
        SendMessage {
            chat_id: &self.credentials.chat_id,
            text,
            parse_mode: "Markdown",
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = self.send_message_url();
        // Drop the URL from reqwest errors: it embeds the bot token.
        let resp = self
            .client
            .post(url)
            .json(&self.payload(text))
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.without_url())?;
        check_response(status.as_u16(), &body)
    }
}

fn check_response(status: u16, body: &str) -> Result<(), NotifyError> {
    let parsed = serde_json::from_str::<ApiResponse>(body).ok();
    match parsed {
        Some(ApiResponse { ok: true, .. }) if (200..300).contains(&status) => Ok(()),
        Some(resp) => Err(NotifyError::Rejected {
            status,
            description: resp.description.unwrap_or_else(|| "ok=false".to_string()),
        }),
        None => Err(NotifyError::Rejected {
            status,
            description: body.chars().take(200).collect(),
        }),
    }
}
