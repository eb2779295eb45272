//! Outward-facing tracker records and the sink they are pushed to

use serde::{Deserialize, Serialize};

use crate::advertisement::RawAdvertisement;
use crate::distance;
use crate::family::TrackerFamily;
use crate::store::TrackerState;

/// One resolved tracker update, produced per accepted observation
///
/// Immutable snapshot assembled from the classified family, the post-upsert
/// store state, and a freshly computed distance estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedTracker {
    /// Family-prefixed signature, e.g. `AIRTAG_<sig>`
    pub id: String,
    /// Same value as `id`; retained as a separate field for sinks that key
    /// logical identities explicitly
    pub logical_id: String,
    /// Protocol family
    pub kind: TrackerFamily,
    /// Device address of this observation, absent if withheld or blank
    pub address: Option<String>,
    /// RSSI of this observation in dBm
    pub rssi: i32,
    /// Estimated distance in meters
    pub distance_meters: f64,
    /// Timestamp of this observation, milliseconds
    pub last_seen_ms: u64,
    /// Logical identity key
    pub signature: String,
    /// Raw payload of this observation, hex-encoded
    pub raw_frame: String,
    /// Distinct addresses observed under this signature so far
    pub rotating_mac_count: u32,
}

impl DetectedTracker {
    /// Assemble an update from the post-upsert state and the observation
    pub(crate) fn assemble(state: &TrackerState, frame: &RawAdvertisement) -> Self {
        let id = format!("{}_{}", state.family.label(), state.signature);
        Self {
            logical_id: id.clone(),
            id,
            kind: state.family,
            address: frame.normalized_address().map(str::to_owned),
            rssi: frame.rssi,
            distance_meters: distance::estimate_default(frame.rssi),
            last_seen_ms: state.last_seen_ms,
            signature: state.signature.clone(),
            raw_frame: state.last_raw_frame.clone(),
            rotating_mac_count: state.rotating_mac_count,
        }
    }
}

/// Push-model consumer of resolved tracker updates
///
/// The pipeline calls [`TrackerSink::emit`] synchronously, exactly once per
/// accepted observation, never batched. Cross-thread or cross-process
/// transport of the update is the sink implementor's concern.
pub trait TrackerSink {
    /// Consume one resolved update
    fn emit(&mut self, update: DetectedTracker);
}

/// Adapter turning a closure into a [`TrackerSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(DetectedTracker)> TrackerSink for FnSink<F> {
    fn emit(&mut self, update: DetectedTracker) {
        (self.0)(update);
    }
}

/// Collecting sink, mainly useful in tests and batch drains
impl TrackerSink for Vec<DetectedTracker> {
    fn emit(&mut self, update: DetectedTracker) {
        self.push(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> TrackerState {
        TrackerState {
            signature: "ab12".into(),
            family: TrackerFamily::FindMy,
            last_seen_ms: 5_000,
            last_rssi: -70,
            last_mac: Some("AA:BB".into()),
            rotating_mac_count: 2,
            last_raw_frame: "1219".into(),
        }
    }

    #[test]
    fn assemble_builds_family_prefixed_id() {
        let frame = RawAdvertisement::new(-70, 5_000).with_address("AA:BB");
        let update = DetectedTracker::assemble(&sample_state(), &frame);

        assert_eq!(update.id, "AIRTAG_ab12");
        assert_eq!(update.logical_id, update.id);
        assert_eq!(update.kind, TrackerFamily::FindMy);
        assert_eq!(update.address.as_deref(), Some("AA:BB"));
        assert_eq!(update.rssi, -70);
        assert!((update.distance_meters - 3.548_133_892_335_755).abs() < 1e-9);
        assert_eq!(update.last_seen_ms, 5_000);
        assert_eq!(update.signature, "ab12");
        assert_eq!(update.raw_frame, "1219");
        assert_eq!(update.rotating_mac_count, 2);
    }

    #[test]
    fn assemble_echoes_current_observation_address() {
        // The update carries this observation's address, not the stored MAC.
        let frame = RawAdvertisement::new(-70, 5_000);
        let update = DetectedTracker::assemble(&sample_state(), &frame);
        assert_eq!(update.address, None);
    }

    #[test]
    fn closure_and_vec_sinks() {
        let frame = RawAdvertisement::new(-70, 5_000);
        let update = DetectedTracker::assemble(&sample_state(), &frame);

        let mut seen = 0;
        let mut closure_sink = FnSink(|u: DetectedTracker| {
            assert_eq!(u.id, "AIRTAG_ab12");
            seen += 1;
        });
        closure_sink.emit(update.clone());
        drop(closure_sink);
        assert_eq!(seen, 1);

        let mut vec_sink: Vec<DetectedTracker> = Vec::new();
        vec_sink.emit(update);
        assert_eq!(vec_sink.len(), 1);
    }

    #[test]
    fn serde_round_trip() {
        let frame = RawAdvertisement::new(-70, 5_000).with_address("AA:BB");
        let update = DetectedTracker::assemble(&sample_state(), &frame);

        let json = serde_json::to_string(&update).unwrap();
        let back: DetectedTracker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, update);
    }
}
