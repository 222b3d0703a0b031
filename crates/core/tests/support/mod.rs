//! Shared test fixtures for core integration tests

pub mod calendar;
pub mod notifications;
pub mod repositories;

use std::sync::Arc;
use std::time::Duration;

use coachbook_core::{NotificationDispatcher, SchedulingService};

use self::calendar::MockCalendarBridge;
use self::notifications::{MockMeetingLocations, MockTransport};
use self::repositories::{
    MockAppointmentRepository, MockAvailabilityRepository, MockProfileDirectory,
};

/// Everything a scheduling test needs, with handles kept on the mocks.
pub struct TestHarness {
    pub service: SchedulingService,
    pub appointments: Arc<MockAppointmentRepository>,
    pub availabilities: Arc<MockAvailabilityRepository>,
    pub profiles: Arc<MockProfileDirectory>,
    pub bridge: Arc<MockCalendarBridge>,
    pub primary: Arc<MockTransport>,
    pub fallback: Arc<MockTransport>,
}

impl TestHarness {
    pub fn new() -> Self {
        let appointments = Arc::new(MockAppointmentRepository::default());
        let availabilities = Arc::new(MockAvailabilityRepository::default());
        let profiles = Arc::new(MockProfileDirectory::default());
        let bridge = Arc::new(MockCalendarBridge::authenticated());
        let primary = Arc::new(MockTransport::new("primary"));
        let fallback = Arc::new(MockTransport::new("fallback"));

        let dispatcher =
            NotificationDispatcher::new(primary.clone(), fallback.clone());

        let service = SchedulingService::new(
            appointments.clone(),
            availabilities.clone(),
            profiles.clone(),
            bridge.clone(),
            Arc::new(MockMeetingLocations),
            Arc::new(dispatcher),
        )
        .with_side_effect_timeout(Duration::from_secs(2));

        Self { service, appointments, availabilities, profiles, bridge, primary, fallback }
    }
}
