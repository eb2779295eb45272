//! Raw BLE advertisement input type
//!
//! A [`RawAdvertisement`] carries the structured fields an OS scan callback
//! exposes for one received advertisement: service data keyed by UUID,
//! manufacturer data keyed by company identifier, the set of advertised
//! service UUIDs, the full payload bytes, the (possibly withheld) device
//! address, an RSSI sample, and the observation timestamp.
//!
//! All UUIDs this engine inspects are Bluetooth SIG 16-bit short UUIDs, so
//! service UUIDs are carried as `u16` values.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// One observed BLE advertisement, immutable per observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAdvertisement {
    /// Service data keyed by 16-bit service UUID
    pub service_data: BTreeMap<u16, Vec<u8>>,
    /// Manufacturer data keyed by 16-bit company identifier
    pub manufacturer_data: BTreeMap<u16, Vec<u8>>,
    /// Advertised 16-bit service UUIDs
    pub service_uuids: BTreeSet<u16>,
    /// Full advertisement payload, retained for diagnostics only
    #[serde(with = "hex::serde")]
    pub raw_bytes: Vec<u8>,
    /// MAC-like device address, absent if the OS withholds it
    pub device_address: Option<String>,
    /// Received signal strength in dBm
    pub rssi: i32,
    /// Observation timestamp in milliseconds
    pub observed_at_ms: u64,
}

impl RawAdvertisement {
    /// Create an advertisement with the given RSSI and observation timestamp
    #[must_use]
    pub fn new(rssi: i32, observed_at_ms: u64) -> Self {
        Self {
            rssi,
            observed_at_ms,
            ..Self::default()
        }
    }

    /// Set the device address
    #[must_use]
    pub fn with_address(mut self, address: &str) -> Self {
        self.device_address = Some(address.to_owned());
        self
    }

    /// Add a service-data value for a 16-bit service UUID
    #[must_use]
    pub fn with_service_data(mut self, uuid: u16, data: &[u8]) -> Self {
        self.service_data.insert(uuid, data.to_vec());
        self.service_uuids.insert(uuid);
        self
    }

    /// Add a manufacturer-data value for a 16-bit company identifier
    #[must_use]
    pub fn with_manufacturer_data(mut self, company_id: u16, data: &[u8]) -> Self {
        self.manufacturer_data.insert(company_id, data.to_vec());
        self
    }

    /// Mark a 16-bit service UUID as advertised
    #[must_use]
    pub fn with_service_uuid(mut self, uuid: u16) -> Self {
        self.service_uuids.insert(uuid);
        self
    }

    /// Set the full raw payload bytes
    #[must_use]
    pub fn with_raw_bytes(mut self, bytes: &[u8]) -> Self {
        self.raw_bytes = bytes.to_vec();
        self
    }

    /// Add a service-data value given as a hex string
    ///
    /// # Errors
    ///
    /// * `ResolveError::InvalidHex` - Input is not valid hex
    pub fn with_service_data_hex(self, uuid: u16, hex_data: &str) -> Result<Self> {
        let data = decode_hex(hex_data)?;
        Ok(self.with_service_data(uuid, &data))
    }

    /// Add a manufacturer-data value given as a hex string
    ///
    /// # Errors
    ///
    /// * `ResolveError::InvalidHex` - Input is not valid hex
    pub fn with_manufacturer_hex(self, company_id: u16, hex_data: &str) -> Result<Self> {
        let data = decode_hex(hex_data)?;
        Ok(self.with_manufacturer_data(company_id, &data))
    }

    /// Service-data value for a 16-bit service UUID, if present
    #[must_use]
    pub fn service_data(&self, uuid: u16) -> Option<&[u8]> {
        self.service_data.get(&uuid).map(Vec::as_slice)
    }

    /// Manufacturer-data value for a 16-bit company identifier, if present
    #[must_use]
    pub fn manufacturer_data(&self, company_id: u16) -> Option<&[u8]> {
        self.manufacturer_data.get(&company_id).map(Vec::as_slice)
    }

    /// First available service-data value, in UUID order
    #[must_use]
    pub fn first_service_data(&self) -> Option<&[u8]> {
        self.service_data.values().next().map(Vec::as_slice)
    }

    /// Whether the advertisement carries the given 16-bit service UUID
    #[must_use]
    pub fn advertises_service(&self, uuid: u16) -> bool {
        self.service_uuids.contains(&uuid)
    }

    /// Device address with blank values treated as absent
    ///
    /// A withheld or whitespace-only address carries no rotation signal, so
    /// both are reported as `None`.
    #[must_use]
    pub fn normalized_address(&self) -> Option<&str> {
        self.device_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// Convert a hex string to bytes, tolerating whitespace and a `0x` prefix
fn decode_hex(hex_str: &str) -> Result<Vec<u8>> {
    let clean = hex_str.trim().trim_start_matches("0x").replace(' ', "");

    if !clean.len().is_multiple_of(2) {
        return Err(ResolveError::InvalidHex(format!(
            "Odd number of hex characters: {}",
            clean.len()
        )));
    }

    hex::decode(&clean).map_err(|_| ResolveError::InvalidHex(clean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("01FF").unwrap(), vec![0x01, 0xFF]);
        assert_eq!(decode_hex("0x01 FF").unwrap(), vec![0x01, 0xFF]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert!(decode_hex("0").is_err()); // Odd length
        assert!(decode_hex("GG").is_err()); // Invalid hex
    }

    #[test]
    fn test_hex_constructors() {
        let frame = RawAdvertisement::new(-60, 1_000)
            .with_manufacturer_hex(0x004C, "12190000")
            .unwrap()
            .with_service_data_hex(0xFD44, "AABBCCDD")
            .unwrap();

        assert_eq!(frame.manufacturer_data(0x004C), Some(&[0x12, 0x19, 0, 0][..]));
        assert_eq!(
            frame.service_data(0xFD44),
            Some(&[0xAA, 0xBB, 0xCC, 0xDD][..])
        );
        assert!(frame.advertises_service(0xFD44));

        assert!(
            RawAdvertisement::new(-60, 1_000)
                .with_manufacturer_hex(0x004C, "xyz")
                .is_err()
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some("AA:BB:CC:DD:EE:FF"), Some("AA:BB:CC:DD:EE:FF"))]
    #[case(Some(" AA:BB "), Some("AA:BB"))]
    fn normalized_address_cases(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        let mut frame = RawAdvertisement::new(-60, 0);
        frame.device_address = input.map(str::to_owned);
        assert_eq!(frame.normalized_address(), expected);
    }

    #[test]
    fn first_service_data_is_deterministic() {
        let frame = RawAdvertisement::new(-60, 0)
            .with_service_data(0xFEE7, &[7])
            .with_service_data(0xFEED, &[0xED]);

        // BTreeMap order: lowest UUID first.
        assert_eq!(frame.first_service_data(), Some(&[0xED][..]));
    }
}
