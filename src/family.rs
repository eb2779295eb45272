//! Tracker protocol families

use serde::{Deserialize, Serialize};

/// Known proximity-tracker protocol families
///
/// The family decides which stable-prefix length and table TTL apply
/// downstream. `Unknown` completes the closed enumeration but is never
/// produced by classification; unmatched frames are dropped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackerFamily {
    /// Apple Find My network tags (AirTag and compatible)
    FindMy,
    /// Tile tags
    Tile,
    /// Samsung SmartTags
    Samsung,
    /// Not a recognized tracker
    Unknown,
}

impl TrackerFamily {
    /// Label used as the prefix of a logical tracker id, e.g. `AIRTAG_<sig>`
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FindMy => "AIRTAG",
            Self::Tile => "TILE",
            Self::Samsung => "SAMSUNG",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TrackerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
