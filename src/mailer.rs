// mailer.rs
//
// Transactional mail via Brevo's SMTP API. Sending is optional at deploy
// time: without credentials the mailer refuses with a stable message and
// everything else keeps working.

use crate::config::AppConfig;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug)]
pub enum MailerError {
    NotConfigured,
    RequestFailed(String),
    ApiError(String),
}

impl fmt::Display for MailerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailerError::NotConfigured => write!(f, "Email not configured"),
            MailerError::RequestFailed(msg) => write!(f, "mail request failed: {msg}"),
            MailerError::ApiError(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for MailerError {}

#[derive(Serialize)]
struct BrevoContact {
    email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload {
    sender: BrevoSender,
    to: Vec<BrevoContact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<BrevoContact>,
    subject: String,
    text_content: String,
}

#[derive(Serialize)]
struct BrevoSender {
    name: String,
    email: String,
}

#[derive(Debug)]
pub struct BrevoMailer {
    api_key: String,
    sender_email: String,
    sender_name: String,
    client: reqwest::blocking::Client,
}

impl BrevoMailer {
    /// `NotConfigured` when mail credentials are absent from the environment.
    pub fn from_config(config: &AppConfig) -> Result<Self, MailerError> {
        let (Some(api_key), Some(sender_email)) =
            (config.brevo_api_key.clone(), config.sender_email.clone())
        else {
            return Err(MailerError::NotConfigured);
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;
        Ok(Self {
            api_key,
            sender_email,
            sender_name: config.sender_name.clone(),
            client,
        })
    }

    /// Send a plain-text email. Returns the provider message id when the
    /// API reports one.
    pub fn send_email(
        &self,
        to: &str,
        cc: &[String],
        subject: &str,
        body: &str,
    ) -> Result<Option<String>, MailerError> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: self.sender_name.clone(),
                email: self.sender_email.clone(),
            },
            to: vec![BrevoContact {
                email: to.to_string(),
            }],
            cc: cc
                .iter()
                .map(|email| BrevoContact {
                    email: email.clone(),
                })
                .collect(),
            subject: subject.to_string(),
            text_content: body.to_string(),
        };

        let resp = self
            .client
            .post(BREVO_ENDPOINT)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(MailerError::ApiError(format!(
                "Brevo API error: {} - {}",
                status.as_u16(),
                text
            )));
        }

        let message_id = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("messageId").and_then(Value::as_str).map(str::to_string));
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::test_config;

    #[test]
    fn missing_credentials_surface_as_not_configured() {
        let err = BrevoMailer::from_config(&test_config()).expect_err("no credentials set");
        assert!(matches!(err, MailerError::NotConfigured));
        assert_eq!(err.to_string(), "Email not configured");
    }
}
