//! Brevo transactional email transport (primary channel)

use async_trait::async_trait;
use coachbook_core::NotificationTransport;
use coachbook_domain::{AppointmentNotice, CoachBookError, NotificationsConfig, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::templates;
use crate::errors::InfraError;

#[derive(Debug, Serialize)]
struct BrevoContact<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct BrevoSendRequest<'a> {
    sender: BrevoContact<'a>,
    to: Vec<BrevoContact<'a>>,
    subject: String,
    #[serde(rename = "htmlContent")]
    html_content: String,
}

/// Primary notification transport over Brevo's SMTP API.
pub struct BrevoTransport {
    http: Client,
    base_url: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
}

impl BrevoTransport {
    /// Create a transport from the notification configuration.
    pub fn new(config: &NotificationsConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.brevo_base_url.trim_end_matches('/').to_string(),
            api_key: config.brevo_api_key.clone(),
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        }
    }
}

#[async_trait]
impl NotificationTransport for BrevoTransport {
    fn channel(&self) -> &'static str {
        "brevo"
    }

    async fn deliver(&self, notice: &AppointmentNotice) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(CoachBookError::Config("brevo api key not configured".to_string()));
        }

        let request = BrevoSendRequest {
            sender: BrevoContact { email: &self.sender_email, name: &self.sender_name },
            to: vec![BrevoContact {
                email: &notice.recipient.email,
                name: &notice.recipient.name,
            }],
            subject: templates::subject(notice),
            html_content: templates::html_body(notice),
        };

        let response = self
            .http
            .post(format!("{}/v3/smtp/email", self.base_url))
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(InfraError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoachBookError::Network(format!(
                "Brevo send failed ({status}): {error_text}"
            )));
        }

        debug!(recipient = %notice.recipient.email, "brevo send accepted");
        Ok(())
    }
}
