//! Minimal profile contract consumed by the scheduling engine
//!
//! Profile editing belongs to the wider application; the engine only needs
//! to resolve an email and display name before notifying someone.

use serde::{Deserialize, Serialize};

use crate::errors::{CoachBookError, Result};

/// Marketplace role a profile is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coach,
    Talent,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coach => "coach",
            Self::Talent => "talent",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "coach" => Ok(Self::Coach),
            "talent" => Ok(Self::Talent),
            other => Err(CoachBookError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

/// Contact details resolved for a user in a given role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    pub display_name: String,
}
