//! Conversions from external infrastructure errors into domain errors.

use coachbook_domain::CoachBookError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CoachBookError);

impl From<InfraError> for CoachBookError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CoachBookError> for InfraError {
    fn from(value: CoachBookError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and
/// within this module.
trait IntoCoachBookError {
    fn into_coachbook(self) -> CoachBookError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CoachBookError */
/* -------------------------------------------------------------------------- */

impl IntoCoachBookError for SqlError {
    fn into_coachbook(self) -> CoachBookError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        CoachBookError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CoachBookError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        CoachBookError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        CoachBookError::Database("foreign key constraint violation".into())
                    }
                    _ => CoachBookError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CoachBookError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CoachBookError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CoachBookError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                CoachBookError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                CoachBookError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => CoachBookError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => CoachBookError::Database("invalid SQL query".into()),
            other => CoachBookError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_coachbook())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CoachBookError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(CoachBookError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CoachBookError */
/* -------------------------------------------------------------------------- */

impl IntoCoachBookError for HttpError {
    fn into_coachbook(self) -> CoachBookError {
        if self.is_timeout() {
            return CoachBookError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CoachBookError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => CoachBookError::Auth(message),
                404 => CoachBookError::NotFound(message),
                429 => CoachBookError::Network(message),
                400..=499 => CoachBookError::InvalidInput(message),
                _ => CoachBookError::Network(message),
            };
        }

        CoachBookError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_coachbook())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
