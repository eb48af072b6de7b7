use std::net::IpAddr;
use std::path::Path;

use log::info;

use super::enrich::enrich_endpoint;
use super::raw::RawPacket;
use super::tshark::CaptureSource;
use crate::packet::{BaseProtocol, Endpoint, Packet, PacketSize};
use crate::utils::epoch_to_datetime;
use crate::{CapscopeError, Result};

/// Runs the capture source, normalizes every raw record and enriches both
/// endpoints. Capture order is preserved.
pub fn load_packets(source: &impl CaptureSource, capture_path: &Path) -> Result<Vec<Packet>> {
    info!("Filtering packets from {}", capture_path.display());
    let raw_packets = source.capture(capture_path)?;

    info!("Normalizing {} packets", raw_packets.len());
    let mut packets = raw_packets
        .iter()
        .map(normalize_packet)
        .collect::<Result<Vec<_>>>()?;

    info!("Enriching packet domain info");
    for packet in &mut packets {
        enrich_endpoint(&mut packet.source);
        enrich_endpoint(&mut packet.destination);
    }

    Ok(packets)
}

fn normalize_packet(raw: &RawPacket) -> Result<Packet> {
    let epoch = raw.require_f64("frame.time_epoch")?;
    let timestamp = epoch_to_datetime(epoch)
        .ok_or_else(|| CapscopeError::Parse(format!("invalid frame.time_epoch: {}", epoch)))?;

    let protocols_string = raw.require("frame.protocols")?.to_string();
    let protocols: Vec<String> = protocols_string.split(':').map(str::to_string).collect();
    let base_protocol = if protocols.iter().any(|p| p == "tcp") {
        BaseProtocol::Tcp
    } else {
        BaseProtocol::Udp
    };
    let app_protocol = protocols.last().cloned().unwrap_or_default();

    let (source_port, destination_port, data_length, tcp_sequence, tcp_next_sequence, stream) =
        match base_protocol {
            BaseProtocol::Tcp => (
                raw.require_u16("tcp.srcport")?,
                raw.require_u16("tcp.dstport")?,
                raw.require_u64("tcp.len")?,
                Some(raw.require_u64("tcp.seq")?),
                Some(raw.require_u64("tcp.nxtseq")?),
                raw.require_u64("tcp.stream")?,
            ),
            BaseProtocol::Udp => (
                raw.require_u16("udp.srcport")?,
                raw.require_u16("udp.dstport")?,
                raw.require_u64("udp.length")?,
                None,
                None,
                raw.require_u64("udp.stream")?,
            ),
        };

    // A record without ip.len violates the display-filter contract; abort
    // the whole run rather than skip.
    let size = PacketSize {
        frame_length: raw.require_u64("frame.len")?,
        ip_length: raw.require_u64("ip.len")?,
        data_length,
    };

    Ok(Packet {
        timestamp,
        protocols_string,
        protocols,
        base_protocol,
        app_protocol,
        size,
        source: Endpoint {
            address: parse_address(raw.require("ip.src")?)?,
            host: raw.require("ip.src_host")?.to_string(),
            port: source_port,
            domain: None,
            subdomain: None,
            fld: None,
        },
        destination: Endpoint {
            address: parse_address(raw.require("ip.dst")?)?,
            host: raw.require("ip.dst_host")?.to_string(),
            port: destination_port,
            domain: None,
            subdomain: None,
            fld: None,
        },
        tcp_sequence,
        tcp_next_sequence,
        stream,
        classification: None,
    })
}

fn parse_address(value: &str) -> Result<IpAddr> {
    value
        .parse()
        .map_err(|_| CapscopeError::Parse(format!("invalid ip address: {}", value)))
}
