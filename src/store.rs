//! Time-windowed tracker state table
//!
//! The store owns one mutable [`TrackerState`] per signature and is the sole
//! identity authority: entries are never merged, split, or re-keyed. Stale
//! entries are swept lazily, driven by incoming traffic rather than a timer,
//! so eviction cost amortizes over traffic volume and a dormant table simply
//! keeps its last entries until the next observation arrives.

use std::collections::HashMap;

use crate::advertisement::RawAdvertisement;
use crate::family::TrackerFamily;
use crate::fingerprint::Signature;

/// Mutable per-tracker state, one per signature
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    /// Logical identity key
    pub signature: Signature,
    /// Protocol family the signature was classified under
    pub family: TrackerFamily,
    /// Timestamp of the most recent matching observation, milliseconds
    pub last_seen_ms: u64,
    /// Most recent RSSI sample in dBm, overwritten (not averaged)
    pub last_rssi: i32,
    /// Most recent non-blank device address seen for this signature
    pub last_mac: Option<String>,
    /// Count of distinct non-blank addresses observed for this signature.
    /// Starts at 1 (address present on first sighting) or 0, increments by
    /// exactly 1 per new address, never decrements. A high count under one
    /// signature is the anti-phantom witness that MAC rotation is being
    /// re-identified correctly.
    pub rotating_mac_count: u32,
    /// Most recent raw payload, hex-encoded, diagnostics only
    pub last_raw_frame: String,
}

/// Bounded, TTL-windowed mapping from signature to tracker state
///
/// Entries are only mutated through [`TrackerStore::sweep_and_upsert`],
/// preserving the single-writer discipline the pipeline relies on.
#[derive(Debug)]
pub struct TrackerStore {
    entries: HashMap<Signature, TrackerState>,
    ttl_ms: u64,
    max_entries: Option<usize>,
}

impl TrackerStore {
    /// Create a store evicting entries unseen for longer than `ttl_ms`
    #[must_use]
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
            max_entries: None,
        }
    }

    /// Cap the table size; the oldest entry is evicted to admit a new one
    ///
    /// A defensive bound against input spoofing many distinct stable
    /// prefixes between sweeps.
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Remove entries unseen for strictly longer than the TTL
    ///
    /// An entry last seen exactly `ttl_ms` ago survives. Returns the number
    /// of evicted entries.
    pub fn sweep(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        let ttl_ms = self.ttl_ms;
        self.entries
            .retain(|_, state| now_ms.saturating_sub(state.last_seen_ms) <= ttl_ms);
        before - self.entries.len()
    }

    /// Sweep stale entries, then record one accepted observation
    ///
    /// The observation's own timestamp is `now` for the sweep. The upsert
    /// overwrites `last_rssi`, `last_seen_ms`, and `last_raw_frame`
    /// unconditionally; a non-blank address that differs from the stored one
    /// replaces it and increments `rotating_mac_count` by exactly 1, while a
    /// blank or unchanged address leaves both untouched.
    pub fn sweep_and_upsert(
        &mut self,
        signature: Signature,
        family: TrackerFamily,
        frame: &RawAdvertisement,
    ) -> &TrackerState {
        let now_ms = frame.observed_at_ms;
        self.sweep(now_ms);

        if let Some(cap) = self.max_entries
            && self.entries.len() >= cap
            && !self.entries.contains_key(&signature)
        {
            self.evict_oldest();
        }

        let address = frame.normalized_address();
        let raw_hex = hex::encode(&frame.raw_bytes);

        let state = self
            .entries
            .entry(signature.clone())
            .or_insert_with(|| TrackerState {
                signature,
                family,
                last_seen_ms: now_ms,
                last_rssi: frame.rssi,
                last_mac: address.map(str::to_owned),
                rotating_mac_count: u32::from(address.is_some()),
                last_raw_frame: raw_hex.clone(),
            });

        if let Some(mac) = address
            && state.last_mac.as_deref() != Some(mac)
        {
            state.last_mac = Some(mac.to_owned());
            state.rotating_mac_count += 1;
        }

        state.last_seen_ms = now_ms;
        state.last_rssi = frame.rssi;
        state.last_raw_frame = raw_hex;

        state
    }

    /// Current state for a signature, if tracked
    #[must_use]
    pub fn get(&self, signature: &str) -> Option<&TrackerState> {
        self.entries.get(signature)
    }

    /// Number of tracked signatures
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, state)| state.last_seen_ms)
            .map(|(signature, _)| signature.clone());
        if let Some(signature) = oldest {
            self.entries.remove(&signature);
        }
    }
}
