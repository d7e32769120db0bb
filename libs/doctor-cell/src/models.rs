// libs/doctor-cell/src/models.rs
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ==============================================================================
// DOCTOR IDENTIFIER
// ==============================================================================

/// Sequential doctor identifier, rendered as `D1`, `D2`, ...
///
/// Identifiers are assigned monotonically by the directory store and never
/// reused, so they stay valid as opaque references inside appointment
/// records even after a doctor is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoctorId(pub u32);

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

impl FromStr for DoctorId {
    type Err = DoctorIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('D')
            .ok_or_else(|| DoctorIdParseError(s.to_string()))?;
        digits
            .parse::<u32>()
            .map(DoctorId)
            .map_err(|_| DoctorIdParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid doctor id: {0:?}, expected the form D<number>")]
pub struct DoctorIdParseError(pub String);

impl Serialize for DoctorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DoctorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ==============================================================================
// DIRECTORY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub hospital: String,
    pub specialty: String,
    /// Free-form weekly availability description, e.g. "Monday" -> "9am-5pm".
    /// Informational only, the scheduling core derives real availability
    /// from committed appointments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub hospital: String,
    pub specialty: String,
    #[serde(default)]
    pub availability: Option<HashMap<String, String>>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
