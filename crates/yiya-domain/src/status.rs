//! Enabled/disabled status and 0/1 flag wire values.

use serde::{Deserialize, Serialize};

/// Record status.
///
/// Wire format: `i32` (0 = Disabled, 1 = Enabled). Users, roles and menus share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Status {
    Disabled = 0,
    Enabled = 1,
}

impl Status {
    /// Convert from the `i32` wire value. Returns `None` for unknown values.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Disabled),
            1 => Some(Self::Enabled),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Enabled
    }
}

impl From<Status> for i32 {
    fn from(s: Status) -> Self {
        s.as_i32()
    }
}

impl TryFrom<i32> for Status {
    type Error = InvalidFlag;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        Self::from_i32(v).ok_or(InvalidFlag(v))
    }
}

/// Rejected 0/1 wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected 0 or 1, got {0}")]
pub struct InvalidFlag(pub i32);

/// Validate a 0/1 integer flag (`hidden`, `keep_alive`).
pub fn validate_flag(v: i32) -> Result<i32, InvalidFlag> {
    match v {
        0 | 1 => Ok(v),
        other => Err(InvalidFlag(other)),
    }
}
