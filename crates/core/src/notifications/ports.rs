//! Port interface for notification transports

use async_trait::async_trait;
use coachbook_domain::{AppointmentNotice, Result};

/// Trait for one email-sending provider.
///
/// Two implementations form the fallback chain: the primary transactional
/// provider and a template-based secondary. Both receive the same semantic
/// payload.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Short channel name used in logs, e.g. `"brevo"`.
    fn channel(&self) -> &'static str;

    /// Deliver one notice to its recipient.
    async fn deliver(&self, notice: &AppointmentNotice) -> Result<()>;
}
