//! Notification transport integration tests against mock provider APIs

use std::sync::Arc;

use coachbook_core::{NotificationDispatcher, NotificationTransport};
use coachbook_domain::{
    AppointmentNotice, CoachBookError, NoticeKind, NotificationsConfig, Recipient, SessionType,
};
use coachbook_infra::{BrevoTransport, EmailJsTransport};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notice() -> AppointmentNotice {
    AppointmentNotice {
        kind: NoticeKind::Booked,
        recipient: Recipient { email: "taylor@example.com".into(), name: "Taylor".into() },
        coach_name: "Casey".into(),
        talent_name: "Taylor".into(),
        date: "2025-03-10".parse().unwrap(),
        time: "09:00".into(),
        timezone: "America/Toronto".into(),
        session_type: SessionType::CvReview,
        meet_link: None,
        calendar_link: None,
    }
}

fn brevo_config(server: &MockServer) -> NotificationsConfig {
    NotificationsConfig {
        brevo_base_url: server.uri(),
        brevo_api_key: "brevo-key".into(),
        ..NotificationsConfig::default()
    }
}

fn emailjs_config(server: &MockServer) -> NotificationsConfig {
    NotificationsConfig {
        emailjs_base_url: server.uri(),
        emailjs_service_id: "svc-1".into(),
        emailjs_template_id: "tpl-1".into(),
        emailjs_user_id: "user-1".into(),
        ..NotificationsConfig::default()
    }
}

#[tokio::test]
async fn brevo_sends_with_api_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .and(header("api-key", "brevo-key"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "messageId": "m-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = BrevoTransport::new(&brevo_config(&server));
    transport.deliver(&notice()).await.unwrap();
}

#[tokio::test]
async fn brevo_rejection_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad sender"))
        .mount(&server)
        .await;

    let transport = BrevoTransport::new(&brevo_config(&server));
    let err = transport.deliver(&notice()).await.unwrap_err();
    assert!(matches!(err, CoachBookError::Network(_)));
}

#[tokio::test]
async fn brevo_without_api_key_fails_fast() {
    let server = MockServer::start().await;
    let config =
        NotificationsConfig { brevo_base_url: server.uri(), ..NotificationsConfig::default() };

    let transport = BrevoTransport::new(&config);
    let err = transport.deliver(&notice()).await.unwrap_err();
    assert!(matches!(err, CoachBookError::Config(_)));
}

#[tokio::test]
async fn emailjs_sends_template_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = EmailJsTransport::new(&emailjs_config(&server));
    transport.deliver(&notice()).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["service_id"], "svc-1");
    assert_eq!(body["template_params"]["to_email"], "taylor@example.com");
    assert_eq!(body["template_params"]["coach_name"], "Casey");
}

#[tokio::test]
async fn dispatcher_falls_back_to_emailjs_when_brevo_fails() {
    let brevo_server = MockServer::start().await;
    let emailjs_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&brevo_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&emailjs_server)
        .await;

    let dispatcher = NotificationDispatcher::new(
        Arc::new(BrevoTransport::new(&brevo_config(&brevo_server))),
        Arc::new(EmailJsTransport::new(&emailjs_config(&emailjs_server))),
    );

    assert!(dispatcher.send_new_appointment(&notice()).await);
}

#[tokio::test]
async fn dispatcher_skips_fallback_when_primary_delivers() {
    let brevo_server = MockServer::start().await;
    let emailjs_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "messageId": "m-1" })))
        .expect(1)
        .mount(&brevo_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&emailjs_server)
        .await;

    let dispatcher = NotificationDispatcher::new(
        Arc::new(BrevoTransport::new(&brevo_config(&brevo_server))),
        Arc::new(EmailJsTransport::new(&emailjs_config(&emailjs_server))),
    );

    assert!(dispatcher.send_new_appointment(&notice()).await);
}

#[tokio::test]
async fn dispatcher_reports_false_only_when_both_fail() {
    let brevo_server = MockServer::start().await;
    let emailjs_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&brevo_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&emailjs_server)
        .await;

    let dispatcher = NotificationDispatcher::new(
        Arc::new(BrevoTransport::new(&brevo_config(&brevo_server))),
        Arc::new(EmailJsTransport::new(&emailjs_config(&emailjs_server))),
    );

    assert!(!dispatcher.send_new_appointment(&notice()).await);
}
