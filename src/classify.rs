//! Frame classification into tracker protocol families
//!
//! Each pipeline owns one classification predicate. A frame that fails a
//! predicate is simply not a match for that pipeline; the vast majority of
//! ambient BLE traffic is rejected here and must not be logged.

use crate::advertisement::RawAdvertisement;
use crate::family::TrackerFamily;

/// Apple company identifier in manufacturer data
pub const APPLE_COMPANY_ID: u16 = 0x004C;
/// Find My network service UUID (16-bit)
pub const FIND_MY_SERVICE_UUID: u16 = 0xFD44;
/// Tile company identifier in manufacturer data
pub const TILE_COMPANY_ID: u16 = 0x0131;
/// Samsung company identifier in manufacturer data
pub const SAMSUNG_COMPANY_ID: u16 = 0x0075;
/// Service UUIDs advertised by Tile tags
pub const TILE_SERVICE_UUIDS: [u16; 2] = [0xFEED, 0xFEE7];

/// Apple manufacturer frame length bounds for offline-finding broadcasts
const APPLE_FRAME_MIN_LEN: usize = 20;
const APPLE_FRAME_MAX_LEN: usize = 28;

/// Known Find My / offline-finding message-type markers (first two payload bytes)
const FIND_MY_MESSAGE_MARKERS: [(u8, u8); 3] = [(0x12, 0x19), (0x10, 0x05), (0x12, 0x02)];

/// Classify a frame for the Find My pipeline
///
/// Accepts frames carrying the `FD44` service data, or Apple manufacturer
/// data whose length and message-type marker match an offline-finding
/// broadcast. Any other Apple manufacturer frame is not a Find My broadcast
/// and is rejected, including near-misses such as a 19-byte frame with a
/// valid-looking marker.
#[must_use]
pub fn classify_find_my(frame: &RawAdvertisement) -> Option<TrackerFamily> {
    if frame.service_data(FIND_MY_SERVICE_UUID).is_some() {
        return Some(TrackerFamily::FindMy);
    }

    match frame.manufacturer_data(APPLE_COMPANY_ID) {
        Some(mfg) if is_find_my_manufacturer_frame(mfg) => Some(TrackerFamily::FindMy),
        _ => None,
    }
}

fn is_find_my_manufacturer_frame(mfg: &[u8]) -> bool {
    if mfg.len() < APPLE_FRAME_MIN_LEN || mfg.len() > APPLE_FRAME_MAX_LEN {
        return false;
    }
    FIND_MY_MESSAGE_MARKERS.contains(&(mfg[0], mfg[1]))
}

/// Classify a frame for the Tile/Samsung pipeline
///
/// Tile wins over Samsung when both predicates could apply: Tile matches on
/// its company identifier or either of its service UUIDs, Samsung only on its
/// company identifier.
#[must_use]
pub fn classify_tile_samsung(frame: &RawAdvertisement) -> Option<TrackerFamily> {
    let is_tile = frame.manufacturer_data(TILE_COMPANY_ID).is_some()
        || TILE_SERVICE_UUIDS
            .iter()
            .any(|uuid| frame.advertises_service(*uuid));

    if is_tile {
        return Some(TrackerFamily::Tile);
    }

    if frame.manufacturer_data(SAMSUNG_COMPANY_ID).is_some() {
        return Some(TrackerFamily::Samsung);
    }

    None
}
