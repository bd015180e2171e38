//! Room type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a bookable room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Standard room.
    #[default]
    Standard,
    /// Deluxe room.
    Deluxe,
    /// Suite.
    Suite,
}

impl RoomType {
    /// Return the room type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deluxe => "deluxe",
            Self::Suite => "suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = roomhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "deluxe" => Ok(Self::Deluxe),
            "suite" => Ok(Self::Suite),
            _ => Err(roomhub_core::AppError::validation(format!(
                "Invalid room type: '{s}'. Expected one of: standard, deluxe, suite"
            ))),
        }
    }
}
