use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseProtocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficDirection {
    Outgoing,
    Receiving,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficCategory {
    Ads,
    Asset,
    Site,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketSize {
    pub frame_length: u64,
    pub ip_length: u64,
    pub data_length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub address: IpAddr,
    pub host: String,
    pub port: u16,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub fld: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub traffic_direction: TrafficDirection,
    #[serde(rename = "type")]
    pub category: TrafficCategory,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub timestamp: DateTime<Utc>,
    pub protocols_string: String,
    pub protocols: Vec<String>,
    pub base_protocol: BaseProtocol,
    pub app_protocol: String,
    pub size: PacketSize,
    pub source: Endpoint,
    pub destination: Endpoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_sequence: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_next_sequence: Option<u64>,
    pub stream: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn endpoint(address: [u8; 4], host: &str, port: u16) -> Endpoint {
        Endpoint {
            address: IpAddr::V4(Ipv4Addr::from(address)),
            host: host.to_string(),
            port,
            domain: None,
            subdomain: None,
            fld: None,
        }
    }

    fn udp_packet() -> Packet {
        Packet {
            timestamp: DateTime::from_timestamp(1611000000, 0).unwrap(),
            protocols_string: "eth:ethertype:ip:udp:dns".to_string(),
            protocols: vec![
                "eth".to_string(),
                "ethertype".to_string(),
                "ip".to_string(),
                "udp".to_string(),
                "dns".to_string(),
            ],
            base_protocol: BaseProtocol::Udp,
            app_protocol: "dns".to_string(),
            size: PacketSize {
                frame_length: 86,
                ip_length: 72,
                data_length: 52,
            },
            source: endpoint([10, 0, 0, 5], "10.0.0.5", 54321),
            destination: endpoint([8, 8, 8, 8], "dns.google", 53),
            tcp_sequence: None,
            tcp_next_sequence: None,
            stream: 0,
            classification: None,
        }
    }

    #[test]
    fn test_udp_document_omits_tcp_sequences() {
        let doc = serde_json::to_value(udp_packet()).unwrap();
        assert!(doc.get("tcp_sequence").is_none());
        assert!(doc.get("tcp_next_sequence").is_none());
        assert_eq!(doc["base_protocol"], "udp");
        assert_eq!(doc["app_protocol"], "dns");
    }

    #[test]
    fn test_classification_serializes_with_type_key() {
        let mut packet = udp_packet();
        packet.classification = Some(Classification {
            traffic_direction: TrafficDirection::Outgoing,
            category: TrafficCategory::Ads,
            site: Some("example".to_string()),
        });
        let doc = serde_json::to_value(&packet).unwrap();
        assert_eq!(doc["classification"]["traffic_direction"], "outgoing");
        assert_eq!(doc["classification"]["type"], "ads");
        assert_eq!(doc["classification"]["site"], "example");
    }

    #[test]
    fn test_packet_round_trips_without_loss() {
        let mut packet = udp_packet();
        packet.classification = Some(Classification {
            traffic_direction: TrafficDirection::Receiving,
            category: TrafficCategory::Site,
            site: None,
        });
        let json = serde_json::to_string(&packet).unwrap();
        let parsed: Packet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timestamp, packet.timestamp);
        assert_eq!(parsed.source, packet.source);
        assert_eq!(parsed.destination, packet.destination);
        assert_eq!(parsed.size, packet.size);
        assert_eq!(parsed.classification, packet.classification);
        assert_eq!(parsed.stream, packet.stream);
    }
}
