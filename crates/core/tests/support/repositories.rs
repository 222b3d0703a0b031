//! In-memory mock repositories for the scheduling ports
//!
//! Deterministic stand-ins for the SQLite repositories, including the
//! conditional-insert contract of the appointment store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_core::{AppointmentRepository, AvailabilityRepository, ProfileDirectory};
use coachbook_domain::{
    Appointment, AppointmentStatus, Availability, CoachBookError, Profile, Result, Role,
};

/// In-memory mock of the appointment store.
#[derive(Default)]
pub struct MockAppointmentRepository {
    records: Mutex<HashMap<String, Appointment>>,
}

impl MockAppointmentRepository {
    pub fn snapshot(&self, id: &str) -> Option<Appointment> {
        self.records.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl AppointmentRepository for MockAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let holder = records.values().find(|existing| {
            existing.coach_id == appointment.coach_id
                && existing.date == appointment.date
                && existing.time == appointment.time
                && existing.is_active()
        });
        if let Some(existing) = holder {
            return Err(CoachBookError::SlotTaken(existing.talent_name.clone()));
        }
        records.insert(appointment.id.clone(), appointment.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Appointment> {
        self.records
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CoachBookError::NotFound(format!("appointment {id}")))
    }

    async fn set_status(&self, id: &str, status: AppointmentStatus) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| CoachBookError::NotFound(format!("appointment {id}")))?;
        record.status = status;
        Ok(())
    }

    async fn set_meet_link(&self, id: &str, meet_link: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| CoachBookError::NotFound(format!("appointment {id}")))?;
        record.meet_link = Some(meet_link.to_string());
        Ok(())
    }

    async fn set_calendar_event(
        &self,
        id: &str,
        event_id: &str,
        calendar_link: &str,
    ) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| CoachBookError::NotFound(format!("appointment {id}")))?;
        record.google_event_id = Some(event_id.to_string());
        record.calendar_link = Some(calendar_link.to_string());
        Ok(())
    }

    async fn find_active_at(
        &self,
        coach_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|record| {
                record.coach_id == coach_id
                    && record.date == date
                    && record.time == time
                    && record.is_active()
            })
            .cloned())
    }

    async fn list_for_coach_date(
        &self,
        coach_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.coach_id == coach_id && record.date == date)
            .cloned()
            .collect())
    }

    async fn list_for_coach(&self, coach_id: &str) -> Result<Vec<Appointment>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.coach_id == coach_id)
            .cloned()
            .collect())
    }

    async fn list_for_talent(&self, talent_id: &str) -> Result<Vec<Appointment>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.talent_id == talent_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records.lock().unwrap().remove(id);
        Ok(())
    }
}

/// In-memory mock of the availability store.
#[derive(Default)]
pub struct MockAvailabilityRepository {
    records: Mutex<HashMap<(String, NaiveDate), Availability>>,
}

#[async_trait]
impl AvailabilityRepository for MockAvailabilityRepository {
    async fn replace(&self, availability: &Availability) -> Result<()> {
        self.records.lock().unwrap().insert(
            (availability.coach_id.clone(), availability.date),
            availability.clone(),
        );
        Ok(())
    }

    async fn get(&self, coach_id: &str, date: NaiveDate) -> Result<Option<Availability>> {
        Ok(self.records.lock().unwrap().get(&(coach_id.to_string(), date)).cloned())
    }
}

/// In-memory profile directory seeded per test.
#[derive(Default)]
pub struct MockProfileDirectory {
    profiles: Mutex<HashMap<(String, &'static str), Profile>>,
}

impl MockProfileDirectory {
    pub fn with_profile(&self, user_id: &str, role: Role, email: &str, name: &str) {
        self.profiles.lock().unwrap().insert(
            (user_id.to_string(), role.as_str()),
            Profile { email: email.to_string(), display_name: name.to_string() },
        );
    }
}

#[async_trait]
impl ProfileDirectory for MockProfileDirectory {
    async fn get_profile(&self, user_id: &str, role: Role) -> Result<Profile> {
        self.profiles
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), role.as_str()))
            .cloned()
            .ok_or_else(|| CoachBookError::NotFound(format!("profile {user_id}/{}", role.as_str())))
    }
}
