//! Dual-pipeline tracker engine
//!
//! Convenience wrapper owning one Find My pipeline and one Tile/Samsung
//! pipeline. Every delivered frame is offered to both; at most one accepts
//! it, since their classification predicates are disjoint. The pipelines
//! keep fully independent state tables.

use crate::advertisement::RawAdvertisement;
use crate::emit::TrackerSink;
use crate::pipeline::{Pipeline, PipelinePolicy};

/// The full tracker identity resolution engine
#[derive(Debug)]
pub struct TrackerEngine {
    find_my: Pipeline,
    tile_samsung: Pipeline,
}

impl TrackerEngine {
    /// Create a stopped engine with default per-family policies
    #[must_use]
    pub fn new() -> Self {
        Self {
            find_my: Pipeline::new(PipelinePolicy::find_my()),
            tile_samsung: Pipeline::new(PipelinePolicy::tile_samsung()),
        }
    }

    /// Start both pipelines; no-op for any already running
    pub fn start(&mut self) {
        self.find_my.start();
        self.tile_samsung.start();
    }

    /// Stop both pipelines; no-op for any already stopped
    pub fn stop(&mut self) {
        self.find_my.stop();
        self.tile_samsung.stop();
    }

    /// Offer one observation to both pipelines, pushing any update to the sink
    pub fn handle<S: TrackerSink>(&mut self, frame: &RawAdvertisement, sink: &mut S) {
        self.find_my.dispatch(frame, sink);
        self.tile_samsung.dispatch(frame, sink);
    }

    /// Offer an ordered batch, element by element, in order
    pub fn handle_batch<S: TrackerSink>(&mut self, frames: &[RawAdvertisement], sink: &mut S) {
        for frame in frames {
            self.handle(frame, sink);
        }
    }

    /// The Find My pipeline, for inspection
    #[must_use]
    pub fn find_my(&self) -> &Pipeline {
        &self.find_my
    }

    /// The Tile/Samsung pipeline, for inspection
    #[must_use]
    pub fn tile_samsung(&self) -> &Pipeline {
        &self.tile_samsung
    }
}

impl Default for TrackerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{APPLE_COMPANY_ID, SAMSUNG_COMPANY_ID};
    use crate::emit::DetectedTracker;
    use crate::family::TrackerFamily;

    fn find_my_frame(observed_at_ms: u64) -> RawAdvertisement {
        let mut payload = vec![0x12, 0x19];
        payload.resize(22, 0);
        RawAdvertisement::new(-70, observed_at_ms)
            .with_manufacturer_data(APPLE_COMPANY_ID, &payload)
    }

    fn samsung_frame(observed_at_ms: u64) -> RawAdvertisement {
        RawAdvertisement::new(-50, observed_at_ms)
            .with_manufacturer_data(SAMSUNG_COMPANY_ID, &[1, 2, 3, 4, 5, 6])
    }

    #[test]
    fn frames_route_to_exactly_one_pipeline() {
        let mut engine = TrackerEngine::new();
        engine.start();

        let mut updates: Vec<DetectedTracker> = Vec::new();
        engine.handle(&find_my_frame(1_000), &mut updates);
        engine.handle(&samsung_frame(1_001), &mut updates);

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].kind, TrackerFamily::FindMy);
        assert_eq!(updates[1].kind, TrackerFamily::Samsung);
        assert_eq!(engine.find_my().tracked(), 1);
        assert_eq!(engine.tile_samsung().tracked(), 1);
    }

    #[test]
    fn pipelines_share_no_state() {
        let mut engine = TrackerEngine::new();
        engine.start();

        let mut updates: Vec<DetectedTracker> = Vec::new();
        engine.handle(&find_my_frame(1_000), &mut updates);

        assert_eq!(engine.find_my().tracked(), 1);
        assert_eq!(engine.tile_samsung().tracked(), 0);
    }

    #[test]
    fn batch_is_processed_in_order() {
        let mut engine = TrackerEngine::new();
        engine.start();

        let frames = vec![samsung_frame(1_000), find_my_frame(1_001)];
        let mut updates: Vec<DetectedTracker> = Vec::new();
        engine.handle_batch(&frames, &mut updates);

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].kind, TrackerFamily::Samsung);
        assert_eq!(updates[1].kind, TrackerFamily::FindMy);
    }

    #[test]
    fn lifecycle_gates_both_pipelines() {
        let mut engine = TrackerEngine::new();
        let mut updates: Vec<DetectedTracker> = Vec::new();

        engine.handle(&find_my_frame(1_000), &mut updates);
        assert!(updates.is_empty());

        engine.start();
        engine.start(); // no-op
        engine.handle(&find_my_frame(1_001), &mut updates);
        assert_eq!(updates.len(), 1);

        engine.stop();
        engine.handle(&find_my_frame(1_002), &mut updates);
        assert_eq!(updates.len(), 1);
    }
}
