//! EmailJS template transport (fallback channel)
//!
//! Template-based sends carrying the same semantic payload as the primary
//! channel; the template itself lives on the EmailJS side.

use async_trait::async_trait;
use coachbook_core::NotificationTransport;
use coachbook_domain::{AppointmentNotice, CoachBookError, NotificationsConfig, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::errors::InfraError;

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    to_name: &'a str,
    coach_name: &'a str,
    talent_name: &'a str,
    session_type: &'static str,
    date: String,
    time: &'a str,
    timezone: &'a str,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    meet_link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    calendar_link: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EmailJsSendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Fallback notification transport over the EmailJS REST API.
pub struct EmailJsTransport {
    http: Client,
    base_url: String,
    service_id: String,
    template_id: String,
    user_id: String,
}

impl EmailJsTransport {
    /// Create a transport from the notification configuration.
    pub fn new(config: &NotificationsConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.emailjs_base_url.trim_end_matches('/').to_string(),
            service_id: config.emailjs_service_id.clone(),
            template_id: config.emailjs_template_id.clone(),
            user_id: config.emailjs_user_id.clone(),
        }
    }
}

#[async_trait]
impl NotificationTransport for EmailJsTransport {
    fn channel(&self) -> &'static str {
        "emailjs"
    }

    async fn deliver(&self, notice: &AppointmentNotice) -> Result<()> {
        if self.service_id.is_empty() || self.template_id.is_empty() {
            return Err(CoachBookError::Config("emailjs service not configured".to_string()));
        }

        let request = EmailJsSendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.user_id,
            template_params: TemplateParams {
                to_email: &notice.recipient.email,
                to_name: &notice.recipient.name,
                coach_name: &notice.coach_name,
                talent_name: &notice.talent_name,
                session_type: notice.session_type.label(),
                date: notice.date.to_string(),
                time: &notice.time,
                timezone: &notice.timezone,
                kind: format!("{:?}", notice.kind).to_lowercase(),
                meet_link: notice.meet_link.as_deref(),
                calendar_link: notice.calendar_link.as_deref(),
            },
        };

        let response = self
            .http
            .post(format!("{}/api/v1.0/email/send", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(InfraError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoachBookError::Network(format!(
                "EmailJS send failed ({status}): {error_text}"
            )));
        }

        debug!(recipient = %notice.recipient.email, "emailjs send accepted");
        Ok(())
    }
}
