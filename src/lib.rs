//! BLE Proximity-Tracker Identity Resolution
//!
//! This crate turns the noisy, privacy-rotating advertisement stream of BLE
//! proximity trackers (Apple Find My tags, Tile tags, Samsung SmartTags)
//! into a stable set of logical tracker identities with liveness and
//! distance estimates. Trackers rotate their advertised MAC address and most
//! of their payload on a timer; re-identification anchors on the
//! protocol-defined stable prefix of the payload, hashed into a signature
//! that groups rotating sightings under one identity without merging
//! distinct tags or spawning phantoms.
//!
//! Two independent pipelines run side by side, one for the Find My family
//! and one for Tile/Samsung, each with its own classification predicate,
//! stable-prefix length, and state-table TTL.
//!
//! # Example
//!
//! ```rust
//! use tracker_resolver::{Pipeline, PipelinePolicy, RawAdvertisement, TrackerFamily};
//!
//! let mut pipeline = Pipeline::new(PipelinePolicy::find_my());
//! pipeline.start();
//!
//! // A 22-byte Apple offline-finding broadcast.
//! let mut payload = vec![0x12, 0x19];
//! payload.resize(22, 0);
//!
//! let frame = RawAdvertisement::new(-70, 1_000)
//!     .with_address("40:5E:F6:00:11:22")
//!     .with_manufacturer_data(0x004C, &payload);
//!
//! let update = pipeline.handle(&frame).expect("accepted Find My frame");
//! assert_eq!(update.kind, TrackerFamily::FindMy);
//! assert_eq!(update.rotating_mac_count, 1);
//! ```

pub mod advertisement;
pub mod classify;
pub mod distance;
pub mod emit;
pub mod engine;
pub mod error;
pub mod family;
pub mod fingerprint;
pub mod pipeline;
pub mod stable;
pub mod store;

pub use advertisement::RawAdvertisement;
pub use emit::{DetectedTracker, FnSink, TrackerSink};
pub use engine::TrackerEngine;
pub use error::{ResolveError, Result};
pub use family::TrackerFamily;
pub use fingerprint::{Signature, fingerprint};
pub use pipeline::{Pipeline, PipelinePolicy};
pub use store::{TrackerState, TrackerStore};
