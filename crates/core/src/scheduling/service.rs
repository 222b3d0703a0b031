//! Booking orchestrator - core business logic
//!
//! Owns the appointment lifecycle: validates booking requests against the
//! slot resolver, persists state transitions, and triggers the downstream
//! calendar and notification side effects. The store write is the
//! authoritative part of every operation; calendar sync and notifications
//! run after it commits, bounded by a timeout, with failures logged and
//! swallowed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use coachbook_domain::constants::DEFAULT_TIMEZONE;
use coachbook_domain::{
    normalize_notes, Appointment, AppointmentNotice, AppointmentStatus, Availability,
    BookingRequest, CoachBookError, NoticeKind, Recipient, Result, Role,
};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ports::{
    AppointmentRepository, AvailabilityRepository, MeetingLocations, ProfileDirectory,
};
use super::slots;
use crate::calendar_ports::CalendarBridge;
use crate::notifications::dispatcher::NotificationDispatcher;

const DEFAULT_SIDE_EFFECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-time classification of appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentView {
    All,
    /// Confirmed and dated today or later.
    Upcoming,
    /// Dated before today, regardless of status.
    Past,
}

impl AppointmentView {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => {
                Err(CoachBookError::InvalidInput(format!("unknown appointment view '{other}'")))
            }
        }
    }
}

/// One appointment that failed during a batch sync.
#[derive(Debug, Clone, Serialize)]
pub struct SyncFailure {
    pub appointment_id: String,
    pub error: String,
}

/// Outcome of a batch calendar sync; partial failure is per-item.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub synced: usize,
    pub errors: Vec<SyncFailure>,
}

/// Appointment scheduling service.
pub struct SchedulingService {
    appointments: Arc<dyn AppointmentRepository>,
    availabilities: Arc<dyn AvailabilityRepository>,
    profiles: Arc<dyn ProfileDirectory>,
    calendar: Arc<dyn CalendarBridge>,
    locations: Arc<dyn MeetingLocations>,
    notifier: Arc<NotificationDispatcher>,
    side_effect_timeout: Duration,
}

impl SchedulingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        availabilities: Arc<dyn AvailabilityRepository>,
        profiles: Arc<dyn ProfileDirectory>,
        calendar: Arc<dyn CalendarBridge>,
        locations: Arc<dyn MeetingLocations>,
        notifier: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            appointments,
            availabilities,
            profiles,
            calendar,
            locations,
            notifier,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    /// Bound the time granted to each best-effort side effect.
    pub fn with_side_effect_timeout(mut self, limit: Duration) -> Self {
        self.side_effect_timeout = limit;
        self
    }

    /// Publish a coach's slot set for one date. Full replace, never a
    /// merge. The timezone defaults to the previously stored zone, then
    /// UTC.
    pub async fn save_availability(
        &self,
        coach_id: &str,
        date: NaiveDate,
        time_slots: &[String],
        timezone: Option<String>,
    ) -> Result<Availability> {
        let slots = slots::normalize_slot_set(time_slots)?;
        let existing = self.availabilities.get(coach_id, date).await?;

        let zone = timezone
            .or_else(|| existing.as_ref().map(|record| record.timezone.clone()))
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        coachbook_domain::parse_zone(&zone)?;

        let now = Utc::now().timestamp();
        let availability = Availability {
            coach_id: coach_id.to_string(),
            date,
            time_slots: slots,
            timezone: zone,
            created_at: existing.as_ref().map_or(now, |record| record.created_at),
            updated_at: now,
        };

        self.availabilities.replace(&availability).await?;
        info!(coach_id, %date, slots = availability.time_slots.len(), "availability published");
        Ok(availability)
    }

    /// Published slots for a coach and date, sorted; empty when nothing is
    /// published.
    pub async fn get_availability(&self, coach_id: &str, date: NaiveDate) -> Result<Vec<String>> {
        Ok(self
            .availabilities
            .get(coach_id, date)
            .await?
            .map(|record| record.sorted_slots())
            .unwrap_or_default())
    }

    /// The actually bookable slots: published minus those held by a
    /// non-cancelled appointment. Recomputed on every call.
    pub async fn available_slots(&self, coach_id: &str, date: NaiveDate) -> Result<Vec<String>> {
        let Some(availability) = self.availabilities.get(coach_id, date).await? else {
            return Ok(Vec::new());
        };
        let booked = self.appointments.list_for_coach_date(coach_id, date).await?;
        Ok(slots::resolve_bookable(&availability.time_slots, &booked))
    }

    /// Advisory pre-flight check for one slot. The authoritative check
    /// happens again inside [`Self::book`].
    pub async fn is_slot_available(
        &self,
        coach_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<bool> {
        let open = self.available_slots(coach_id, date).await?;
        Ok(open.iter().any(|slot| slot == time))
    }

    /// Create an appointment in status `pending`.
    ///
    /// The conflict check runs here and again, atomically, inside the
    /// repository insert; either one failing surfaces the holding talent's
    /// name. Notifications are fire-and-forget relative to the booking.
    pub async fn book(&self, request: BookingRequest) -> Result<Appointment> {
        slots::validate_slot(&request.time)?;

        let availability =
            self.availabilities.get(&request.coach_id, request.date).await?.ok_or_else(|| {
                CoachBookError::InvalidInput(format!(
                    "coach has no published availability on {}",
                    request.date
                ))
            })?;
        if !availability.time_slots.iter().any(|slot| slot == &request.time) {
            return Err(CoachBookError::InvalidInput(format!(
                "slot {} is not offered on {}",
                request.time, request.date
            )));
        }

        if let Some(holder) =
            self.appointments.find_active_at(&request.coach_id, request.date, &request.time).await?
        {
            return Err(CoachBookError::SlotTaken(holder.talent_name));
        }

        let now = Utc::now().timestamp();
        let appointment = Appointment {
            id: Uuid::now_v7().to_string(),
            coach_id: request.coach_id,
            coach_name: request.coach_name,
            talent_id: request.talent_id,
            talent_name: request.talent_name,
            talent_email: request.talent_email,
            date: request.date,
            time: request.time,
            duration_minutes: request.duration_minutes,
            session_type: request.session_type,
            status: AppointmentStatus::Pending,
            notes: normalize_notes(request.notes),
            google_event_id: None,
            meet_link: None,
            calendar_link: None,
            created_at: now,
            updated_at: now,
        };

        self.appointments.insert(&appointment).await?;
        info!(
            appointment_id = %appointment.id,
            coach_id = %appointment.coach_id,
            date = %appointment.date,
            time = %appointment.time,
            "appointment booked"
        );

        self.notify_parties(&appointment, NoticeKind::Booked, availability.timezone.clone()).await;

        Ok(appointment)
    }

    /// Move an appointment to a new lifecycle status.
    ///
    /// Confirmation triggers meeting-link generation and best-effort
    /// calendar sync; every transition triggers best-effort notifications.
    pub async fn update_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let current = self.appointments.get(id).await?;

        if current.status.is_terminal() && status != current.status {
            return Err(CoachBookError::InvalidInput(
                "a cancelled appointment cannot change status".to_string(),
            ));
        }
        if current.status == AppointmentStatus::Confirmed && status == AppointmentStatus::Pending {
            return Err(CoachBookError::InvalidInput(
                "a confirmed appointment cannot return to pending".to_string(),
            ));
        }

        self.appointments.set_status(id, status).await?;
        let mut updated = current;
        updated.status = status;
        info!(appointment_id = %id, status = status.as_str(), "appointment status updated");

        let zone = self.coach_zone(&updated.coach_id, updated.date).await;

        if status == AppointmentStatus::Confirmed {
            self.ensure_meet_link(&mut updated).await;
            self.sync_to_calendar(&mut updated, &zone).await;
        }

        let kind = if status == AppointmentStatus::Confirmed {
            NoticeKind::Confirmed
        } else {
            NoticeKind::Updated
        };
        self.notify_parties(&updated, kind, zone).await;

        Ok(updated)
    }

    /// Cancel an appointment. Sugar for a `cancelled` status update.
    pub async fn cancel(&self, id: &str) -> Result<Appointment> {
        self.update_status(id, AppointmentStatus::Cancelled).await
    }

    /// Hard delete. Administrative path; the booking flow never calls it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.appointments.delete(id).await
    }

    /// A coach's appointments under a read-time view.
    pub async fn appointments_for_coach(
        &self,
        coach_id: &str,
        view: AppointmentView,
        today: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        let all = self.appointments.list_for_coach(coach_id).await?;
        Ok(filter_view(all, view, today))
    }

    /// A talent's appointments under a read-time view.
    pub async fn appointments_for_talent(
        &self,
        talent_id: &str,
        view: AppointmentView,
        today: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        let all = self.appointments.list_for_talent(talent_id).await?;
        Ok(filter_view(all, view, today))
    }

    /// Mirror every confirmed appointment of a coach into the provider
    /// calendar. Failures are collected per item; the batch never aborts.
    pub async fn sync_all(&self, coach_id: &str) -> Result<SyncReport> {
        let confirmed: Vec<Appointment> = self
            .appointments
            .list_for_coach(coach_id)
            .await?
            .into_iter()
            .filter(|appointment| appointment.status == AppointmentStatus::Confirmed)
            .collect();

        let mut zones: HashMap<NaiveDate, String> = HashMap::new();
        let mut synced = 0usize;
        let mut errors = Vec::new();

        for mut appointment in confirmed {
            let zone = match zones.get(&appointment.date).cloned() {
                Some(zone) => zone,
                None => {
                    let zone = self.coach_zone(coach_id, appointment.date).await;
                    zones.insert(appointment.date, zone.clone());
                    zone
                }
            };

            self.ensure_meet_link(&mut appointment).await;

            match timeout(
                self.side_effect_timeout,
                self.calendar.sync_appointment(&appointment, &zone),
            )
            .await
            {
                Ok(Ok(outcome)) => {
                    if outcome.created {
                        self.persist_calendar_event(&mut appointment, &outcome.event_id).await;
                    }
                    synced += 1;
                }
                Ok(Err(err)) => errors.push(SyncFailure {
                    appointment_id: appointment.id.clone(),
                    error: err.to_string(),
                }),
                Err(_) => errors.push(SyncFailure {
                    appointment_id: appointment.id.clone(),
                    error: "calendar sync timed out".to_string(),
                }),
            }
        }

        info!(coach_id, synced, failed = errors.len(), "batch calendar sync finished");
        Ok(SyncReport { synced, errors })
    }

    /// Zone the coach's slots are expressed in for a date; falls back to
    /// UTC when nothing is published (cannot happen for a booked slot in
    /// the normal flow).
    async fn coach_zone(&self, coach_id: &str, date: NaiveDate) -> String {
        match self.availabilities.get(coach_id, date).await {
            Ok(Some(availability)) => availability.timezone,
            Ok(None) => DEFAULT_TIMEZONE.to_string(),
            Err(err) => {
                warn!(coach_id, %date, error = %err, "failed to resolve coach timezone");
                DEFAULT_TIMEZONE.to_string()
            }
        }
    }

    /// Generate and persist the meeting-room link if absent. Runs whether
    /// or not calendar sync succeeds afterwards.
    async fn ensure_meet_link(&self, appointment: &mut Appointment) {
        if appointment.meet_link.is_some() {
            return;
        }
        let link = self.locations.meet_link(&appointment.id);
        match self.appointments.set_meet_link(&appointment.id, &link).await {
            Ok(()) => appointment.meet_link = Some(link),
            Err(err) => {
                warn!(appointment_id = %appointment.id, error = %err, "failed to save meet link");
            }
        }
    }

    /// Best-effort calendar sync for a freshly confirmed appointment.
    async fn sync_to_calendar(&self, appointment: &mut Appointment, zone: &str) {
        match timeout(self.side_effect_timeout, self.calendar.sync_appointment(appointment, zone))
            .await
        {
            Ok(Ok(outcome)) => {
                if outcome.created {
                    self.persist_calendar_event(appointment, &outcome.event_id).await;
                } else {
                    debug!(appointment_id = %appointment.id, "appointment already synchronized");
                }
            }
            Ok(Err(err)) => {
                warn!(appointment_id = %appointment.id, error = %err, "calendar sync failed");
            }
            Err(_) => {
                warn!(
                    appointment_id = %appointment.id,
                    timeout_secs = self.side_effect_timeout.as_secs(),
                    "calendar sync timed out"
                );
            }
        }
    }

    async fn persist_calendar_event(&self, appointment: &mut Appointment, event_id: &str) {
        let calendar_link = self.locations.calendar_link(event_id);
        match self
            .appointments
            .set_calendar_event(&appointment.id, event_id, &calendar_link)
            .await
        {
            Ok(()) => {
                appointment.google_event_id = Some(event_id.to_string());
                appointment.calendar_link = Some(calendar_link);
            }
            Err(err) => {
                warn!(
                    appointment_id = %appointment.id,
                    error = %err,
                    "failed to save calendar event id"
                );
            }
        }
    }

    /// Notify talent and coach independently; a failure for one recipient
    /// never blocks the other, and no failure reaches the caller.
    async fn notify_parties(&self, appointment: &Appointment, kind: NoticeKind, zone: String) {
        let talent = Recipient {
            email: appointment.talent_email.clone(),
            name: appointment.talent_name.clone(),
        };
        self.send_notice(notice_for(appointment, kind, &zone, talent)).await;

        match self.profiles.get_profile(&appointment.coach_id, Role::Coach).await {
            Ok(profile) => {
                let coach = Recipient { email: profile.email, name: profile.display_name };
                self.send_notice(notice_for(appointment, kind, &zone, coach)).await;
            }
            Err(err) => {
                warn!(
                    coach_id = %appointment.coach_id,
                    error = %err,
                    "coach profile lookup failed, skipping coach notification"
                );
            }
        }
    }

    async fn send_notice(&self, notice: AppointmentNotice) {
        let delivery = timeout(self.side_effect_timeout, async {
            match notice.kind {
                NoticeKind::Booked => self.notifier.send_new_appointment(&notice).await,
                NoticeKind::Confirmed => self.notifier.send_confirmation(&notice).await,
                NoticeKind::Updated => self.notifier.send_update(&notice).await,
            }
        })
        .await;
        if delivery.is_err() {
            warn!(
                recipient = %notice.recipient.email,
                timeout_secs = self.side_effect_timeout.as_secs(),
                "notification dispatch timed out"
            );
        }
    }
}

fn notice_for(
    appointment: &Appointment,
    kind: NoticeKind,
    zone: &str,
    recipient: Recipient,
) -> AppointmentNotice {
    AppointmentNotice {
        kind,
        recipient,
        coach_name: appointment.coach_name.clone(),
        talent_name: appointment.talent_name.clone(),
        date: appointment.date,
        time: appointment.time.clone(),
        timezone: zone.to_string(),
        session_type: appointment.session_type,
        meet_link: appointment.meet_link.clone(),
        calendar_link: appointment.calendar_link.clone(),
    }
}

fn filter_view(
    appointments: Vec<Appointment>,
    view: AppointmentView,
    today: NaiveDate,
) -> Vec<Appointment> {
    match view {
        AppointmentView::All => appointments,
        AppointmentView::Upcoming => appointments
            .into_iter()
            .filter(|appointment| {
                appointment.status == AppointmentStatus::Confirmed && appointment.date >= today
            })
            .collect(),
        AppointmentView::Past => {
            appointments.into_iter().filter(|appointment| appointment.date < today).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use coachbook_domain::SessionType;

    use super::*;

    fn appointment(date: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: "a-1".to_string(),
            coach_id: "c-1".to_string(),
            coach_name: "Coach".to_string(),
            talent_id: "t-1".to_string(),
            talent_name: "Talent".to_string(),
            talent_email: "talent@example.com".to_string(),
            date: date.parse().unwrap(),
            time: "09:00".to_string(),
            duration_minutes: 30,
            session_type: SessionType::Other,
            status,
            notes: None,
            google_event_id: None,
            meet_link: None,
            calendar_link: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn upcoming_requires_confirmed_and_future_date() {
        let today: NaiveDate = "2025-03-10".parse().unwrap();
        let all = vec![
            appointment("2025-03-10", AppointmentStatus::Confirmed),
            appointment("2025-03-11", AppointmentStatus::Pending),
            appointment("2025-03-01", AppointmentStatus::Confirmed),
        ];

        let upcoming = filter_view(all, AppointmentView::Upcoming, today);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].date.to_string(), "2025-03-10");
    }

    #[test]
    fn past_ignores_status() {
        let today: NaiveDate = "2025-03-10".parse().unwrap();
        let all = vec![
            appointment("2025-03-09", AppointmentStatus::Cancelled),
            appointment("2025-03-09", AppointmentStatus::Confirmed),
            appointment("2025-03-10", AppointmentStatus::Confirmed),
        ];

        let past = filter_view(all, AppointmentView::Past, today);
        assert_eq!(past.len(), 2);
    }

    #[test]
    fn view_parsing() {
        assert_eq!(AppointmentView::parse("upcoming").unwrap(), AppointmentView::Upcoming);
        assert_eq!(AppointmentView::parse("past").unwrap(), AppointmentView::Past);
        assert_eq!(AppointmentView::parse("all").unwrap(), AppointmentView::All);
        assert!(AppointmentView::parse("future").is_err());
    }
}
