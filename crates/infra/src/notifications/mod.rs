//! Email notification transports
//!
//! Two interchangeable providers form the fallback chain: Brevo's
//! transactional SMTP API as the primary and EmailJS template sends as the
//! secondary. The dispatcher in the core crate decides the order.

pub mod brevo;
pub mod emailjs;
pub mod templates;

pub use brevo::BrevoTransport;
pub use emailjs::EmailJsTransport;
