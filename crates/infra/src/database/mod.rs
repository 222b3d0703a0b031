//! SQLite-backed persistence

pub mod appointment_repository;
pub mod availability_repository;
pub mod manager;
pub mod profile_repository;

pub use appointment_repository::SqliteAppointmentRepository;
pub use availability_repository::SqliteAvailabilityRepository;
pub use manager::{DbManager, PooledSqliteConnection, SqlitePool};
pub use profile_repository::SqliteProfileRepository;
