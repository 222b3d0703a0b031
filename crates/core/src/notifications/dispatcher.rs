//! Notification dispatcher with automatic fallback
//!
//! Attempts the primary transport; on any failure, attempts the secondary.
//! A notification failure is never surfaced to the caller of the booking
//! flow - the dispatcher reports delivery as a bool and logs the rest.

use std::sync::Arc;

use coachbook_domain::{AppointmentNotice, NoticeKind};
use tracing::{debug, error, warn};

use super::ports::NotificationTransport;

/// Sends talent/coach emails through a primary provider with a secondary
/// provider as fallback.
pub struct NotificationDispatcher {
    primary: Arc<dyn NotificationTransport>,
    fallback: Arc<dyn NotificationTransport>,
}

impl NotificationDispatcher {
    pub fn new(
        primary: Arc<dyn NotificationTransport>,
        fallback: Arc<dyn NotificationTransport>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Announce a fresh booking. Returns whether any transport delivered.
    pub async fn send_new_appointment(&self, notice: &AppointmentNotice) -> bool {
        debug_assert!(notice.kind == NoticeKind::Booked);
        self.dispatch(notice).await
    }

    /// Announce a confirmation.
    pub async fn send_confirmation(&self, notice: &AppointmentNotice) -> bool {
        debug_assert!(notice.kind == NoticeKind::Confirmed);
        self.dispatch(notice).await
    }

    /// Announce any other status change.
    pub async fn send_update(&self, notice: &AppointmentNotice) -> bool {
        self.dispatch(notice).await
    }

    /// Try primary, then fallback. True if either succeeded; the fallback
    /// is never invoked when the primary delivers.
    async fn dispatch(&self, notice: &AppointmentNotice) -> bool {
        match self.primary.deliver(notice).await {
            Ok(()) => {
                debug!(
                    channel = self.primary.channel(),
                    recipient = %notice.recipient.email,
                    "notification delivered"
                );
                return true;
            }
            Err(err) => {
                warn!(
                    channel = self.primary.channel(),
                    recipient = %notice.recipient.email,
                    error = %err,
                    "primary notification transport failed, trying fallback"
                );
            }
        }

        match self.fallback.deliver(notice).await {
            Ok(()) => {
                debug!(
                    channel = self.fallback.channel(),
                    recipient = %notice.recipient.email,
                    "notification delivered via fallback"
                );
                true
            }
            Err(err) => {
                error!(
                    channel = self.fallback.channel(),
                    recipient = %notice.recipient.email,
                    error = %err,
                    "both notification transports failed"
                );
                false
            }
        }
    }
}
