//! Per-family resolution pipeline
//!
//! One [`Pipeline`] runs classify → select stable bytes → fingerprint →
//! sweep-and-upsert → estimate distance → emit, entirely in-memory and
//! synchronously. The Find My and Tile/Samsung pipelines differ only in
//! their [`PipelinePolicy`]: classification predicate, stable-byte selector,
//! and TTL. They share no state and must not be merged.
//!
//! Delivery to one pipeline instance requires `&mut self`, which makes the
//! single-writer discipline a compile-time property: one observation is
//! fully processed before the next begins. Separate instances are fully
//! independent and may live on separate threads.

use crate::advertisement::RawAdvertisement;
use crate::classify;
use crate::emit::{DetectedTracker, TrackerSink};
use crate::family::TrackerFamily;
use crate::fingerprint::fingerprint;
use crate::stable;
use crate::store::{TrackerState, TrackerStore};

/// Table TTL for Find My trackers
pub const FIND_MY_TTL_MS: u64 = 20_000;
/// Table TTL for Tile and Samsung trackers
pub const TILE_SAMSUNG_TTL_MS: u64 = 30_000;

/// Per-family pipeline parameters
///
/// Kept data-driven so the matching and selection logic stays testable in
/// isolation per family, instead of configuration flags scattered through a
/// single generic pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelinePolicy {
    /// Short name used in lifecycle log lines
    pub name: &'static str,
    /// Classification predicate; `None` drops the frame
    pub classify: fn(&RawAdvertisement) -> Option<TrackerFamily>,
    /// Stable-byte selector; `None` drops the frame
    pub select_stable_bytes: for<'a> fn(&'a RawAdvertisement, TrackerFamily) -> Option<&'a [u8]>,
    /// Silence interval after which a tracker is purged as stale
    pub ttl_ms: u64,
    /// Optional hard cap on tracked signatures (oldest evicted when full)
    pub max_entries: Option<usize>,
}

impl PipelinePolicy {
    /// Policy for the Apple Find My family
    #[must_use]
    pub fn find_my() -> Self {
        Self {
            name: "find-my",
            classify: classify::classify_find_my,
            select_stable_bytes: stable::select_stable_bytes,
            ttl_ms: FIND_MY_TTL_MS,
            max_entries: None,
        }
    }

    /// Policy for the Tile and Samsung families
    #[must_use]
    pub fn tile_samsung() -> Self {
        Self {
            name: "tile-samsung",
            classify: classify::classify_tile_samsung,
            select_stable_bytes: stable::select_stable_bytes,
            ttl_ms: TILE_SAMSUNG_TTL_MS,
            max_entries: None,
        }
    }

    /// Cap the state table size
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }
}

/// One tracker resolution pipeline with its owned state table
#[derive(Debug)]
pub struct Pipeline {
    policy: PipelinePolicy,
    store: TrackerStore,
    running: bool,
}

impl Pipeline {
    /// Create a stopped pipeline for the given policy
    #[must_use]
    pub fn new(policy: PipelinePolicy) -> Self {
        let mut store = TrackerStore::new(policy.ttl_ms);
        if let Some(cap) = policy.max_entries {
            store = store.with_max_entries(cap);
        }
        Self {
            policy,
            store,
            running: false,
        }
    }

    /// Begin accepting observations; no-op if already running
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        log::info!("{} pipeline started", self.policy.name);
    }

    /// Stop accepting observations; no-op if already stopped
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        log::info!("{} pipeline stopped", self.policy.name);
    }

    /// Whether the pipeline accepts observations
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process one observation
    ///
    /// Returns the resolved update for an accepted frame, `None` for a
    /// rejected one. Rejection is the expected outcome for the vast
    /// majority of ambient traffic and is never logged. Observations
    /// delivered while stopped are ignored; the radio callback can race a
    /// stop signal.
    pub fn handle(&mut self, frame: &RawAdvertisement) -> Option<DetectedTracker> {
        if !self.running {
            return None;
        }

        let family = (self.policy.classify)(frame)?;
        let stable_bytes = (self.policy.select_stable_bytes)(frame, family)?;
        let signature = fingerprint(stable_bytes);

        let state = self.store.sweep_and_upsert(signature, family, frame);
        Some(DetectedTracker::assemble(state, frame))
    }

    /// Process one observation and push the update, if any, to the sink
    pub fn dispatch<S: TrackerSink>(&mut self, frame: &RawAdvertisement, sink: &mut S) {
        if let Some(update) = self.handle(frame) {
            sink.emit(update);
        }
    }

    /// Process an ordered batch, emitting accepted updates in order
    pub fn dispatch_batch<S: TrackerSink>(&mut self, frames: &[RawAdvertisement], sink: &mut S) {
        for frame in frames {
            self.dispatch(frame, sink);
        }
    }

    /// Number of currently tracked signatures
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.store.len()
    }

    /// Current state for a signature, if tracked
    #[must_use]
    pub fn state(&self, signature: &str) -> Option<&TrackerState> {
        self.store.get(signature)
    }
}
