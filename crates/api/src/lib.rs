//! # CoachBook App
//!
//! Composition root and HTTP surface for the scheduling engine. Wires the
//! SQLite repositories, the Google Calendar bridge and the notification
//! transports into the core scheduling service, and exposes it over an
//! axum router.

pub mod context;
pub mod error;
pub mod routes;

pub use context::AppContext;
pub use error::{ApiError, ApiResult};
