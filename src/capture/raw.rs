use std::collections::HashMap;

use serde::Deserialize;

use crate::{CapscopeError, Result};

/// One record of tshark's `-T json` output: every extracted field arrives
/// under `_source.layers` as a one-element array of strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPacket {
    #[serde(rename = "_source")]
    pub source: RawSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    pub layers: HashMap<String, Vec<String>>,
}

impl RawPacket {
    pub fn first(&self, field: &str) -> Option<&str> {
        self.source
            .layers
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn require(&self, field: &'static str) -> Result<&str> {
        self.first(field).ok_or(CapscopeError::MissingField(field))
    }

    pub fn require_u64(&self, field: &'static str) -> Result<u64> {
        let value = self.require(field)?;
        value
            .parse()
            .map_err(|_| CapscopeError::Parse(format!("non-numeric {}: {}", field, value)))
    }

    pub fn require_u16(&self, field: &'static str) -> Result<u16> {
        let value = self.require(field)?;
        value
            .parse()
            .map_err(|_| CapscopeError::Parse(format!("non-numeric {}: {}", field, value)))
    }

    pub fn require_f64(&self, field: &'static str) -> Result<f64> {
        let value = self.require(field)?;
        value
            .parse()
            .map_err(|_| CapscopeError::Parse(format!("non-numeric {}: {}", field, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawPacket {
        let json = r#"{
            "_index": "packets-2021-01-18",
            "_type": "doc",
            "_score": null,
            "_source": {
                "layers": {
                    "frame.time_epoch": ["1611000000.250000000"],
                    "ip.len": ["72"],
                    "tcp.srcport": ["443"]
                }
            }
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_reads_single_element_arrays() {
        let raw = sample();
        assert_eq!(raw.first("ip.len"), Some("72"));
        assert_eq!(raw.first("udp.length"), None);
    }

    #[test]
    fn test_require_maps_absence_to_missing_field() {
        let raw = sample();
        assert!(matches!(
            raw.require("ip.src"),
            Err(CapscopeError::MissingField("ip.src"))
        ));
    }

    #[test]
    fn test_numeric_accessors() {
        let raw = sample();
        assert_eq!(raw.require_u64("ip.len").unwrap(), 72);
        assert_eq!(raw.require_u16("tcp.srcport").unwrap(), 443);
        assert!((raw.require_f64("frame.time_epoch").unwrap() - 1611000000.25).abs() < 1e-9);
        assert!(matches!(
            raw.require_u64("frame.time_epoch"),
            Err(CapscopeError::Parse(_))
        ));
    }
}
