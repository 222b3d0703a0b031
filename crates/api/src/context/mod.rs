//! Application context - dependency injection container
//!
//! Every service is constructed once here and handed to the router by
//! reference. The scheduling service only sees port traits; the concrete
//! adapters live in this file alone.

use std::sync::Arc;
use std::time::Duration;

use coachbook_core::{CalendarBridge, NotificationDispatcher, SchedulingService};
use coachbook_domain::{Config, Result};
use coachbook_infra::{
    BrevoTransport, CalendarCredentials, DbManager, EmailJsTransport, GoogleCalendarBridge,
    GoogleCalendarClient, MeetRoomLinks, SqliteAppointmentRepository,
    SqliteAvailabilityRepository, SqliteProfileRepository,
};
use tracing::info;

/// Application context - holds all services and dependencies.
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub scheduling: Arc<SchedulingService>,
    pub calendar: Arc<dyn CalendarBridge>,
    pub credentials: Arc<CalendarCredentials>,
    pub profiles: Arc<SqliteProfileRepository>,
}

impl AppContext {
    /// Construct the full service graph from configuration.
    pub fn build(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let appointments = Arc::new(SqliteAppointmentRepository::new(db.pool()));
        let availabilities = Arc::new(SqliteAvailabilityRepository::new(db.pool()));
        let profiles = Arc::new(SqliteProfileRepository::new(db.pool()));

        let credentials = Arc::new(CalendarCredentials::new());
        let client = GoogleCalendarClient::new(&config.calendar, credentials.clone());
        let bridge: Arc<dyn CalendarBridge> = Arc::new(GoogleCalendarBridge::new(client));
        let locations = Arc::new(MeetRoomLinks::new(&config.calendar));

        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::new(BrevoTransport::new(&config.notifications)),
            Arc::new(EmailJsTransport::new(&config.notifications)),
        ));

        let scheduling = Arc::new(
            SchedulingService::new(
                appointments,
                availabilities,
                profiles.clone(),
                bridge.clone(),
                locations,
                dispatcher,
            )
            .with_side_effect_timeout(Duration::from_secs(
                config.calendar.side_effect_timeout_secs,
            )),
        );

        info!(db_path = %config.database.path, "application context built");

        Ok(Self { config, db, scheduling, calendar: bridge, credentials, profiles })
    }
}
