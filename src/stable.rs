//! Stable-byte selection
//!
//! Trackers rotate their advertised address and most of their payload, but
//! each protocol reserves a prefix for static status/type bits. That prefix
//! is the re-identification anchor: it is selected here and hashed into the
//! logical identity key. The prefix lengths (4 bytes for Find My, 6 for
//! Tile/Samsung) are protocol constants, not tunables.

use crate::advertisement::RawAdvertisement;
use crate::classify::{
    APPLE_COMPANY_ID, FIND_MY_SERVICE_UUID, SAMSUNG_COMPANY_ID, TILE_COMPANY_ID,
};
use crate::family::TrackerFamily;

/// Non-rotating prefix length of Find My payloads
pub const FIND_MY_STABLE_PREFIX_LEN: usize = 4;
/// Non-rotating prefix length of Tile and Samsung payloads
pub const TILE_SAMSUNG_STABLE_PREFIX_LEN: usize = 6;

/// Select the non-rotating byte prefix of a classified frame
///
/// Returns `None` when the frame lacks enough stable bytes; such frames are
/// dropped by the caller.
///
/// * Find My: the first 4 bytes of the `FD44` service value when it holds at
///   least 4 bytes, else the first 4 bytes of the Apple manufacturer value
///   when that holds at least 4 bytes.
/// * Tile: up to the first 6 bytes of the Tile manufacturer value, else of
///   the first available service-data value.
/// * Samsung: up to the first 6 bytes of the Samsung manufacturer value.
#[must_use]
pub fn select_stable_bytes(frame: &RawAdvertisement, family: TrackerFamily) -> Option<&[u8]> {
    match family {
        TrackerFamily::FindMy => {
            let fd44 = frame
                .service_data(FIND_MY_SERVICE_UUID)
                .filter(|d| d.len() >= FIND_MY_STABLE_PREFIX_LEN);
            let apple = frame
                .manufacturer_data(APPLE_COMPANY_ID)
                .filter(|d| d.len() >= FIND_MY_STABLE_PREFIX_LEN);

            fd44.or(apple).map(|d| &d[..FIND_MY_STABLE_PREFIX_LEN])
        }
        TrackerFamily::Tile => {
            let source = frame
                .manufacturer_data(TILE_COMPANY_ID)
                .or_else(|| frame.first_service_data())?;
            clip_prefix(source, TILE_SAMSUNG_STABLE_PREFIX_LEN)
        }
        TrackerFamily::Samsung => {
            let source = frame.manufacturer_data(SAMSUNG_COMPANY_ID)?;
            clip_prefix(source, TILE_SAMSUNG_STABLE_PREFIX_LEN)
        }
        TrackerFamily::Unknown => None,
    }
}

/// Take up to `len` leading bytes, rejecting an empty source
fn clip_prefix(bytes: &[u8], len: usize) -> Option<&[u8]> {
    if bytes.is_empty() {
        None
    } else {
        Some(&bytes[..bytes.len().min(len)])
    }
}
