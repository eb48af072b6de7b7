pub mod elastic;
pub mod kibana;

pub use elastic::ElasticIndexer;
pub use kibana::KibanaProvisioner;

use log::info;

use crate::packet::Packet;
use crate::Result;

#[allow(async_fn_in_trait)]
pub trait DocumentSink {
    async fn ensure_ready(&self) -> Result<()>;
    async fn write(&self, packet: &Packet) -> Result<()>;
}

/// One write per record, sequential, no batching or retry.
pub async fn index_packets<S: DocumentSink>(sink: &S, packets: &[Packet]) -> Result<()> {
    sink.ensure_ready().await?;
    info!("Indexing {} packets", packets.len());
    for packet in packets {
        sink.write(packet).await?;
    }
    info!("Indexing completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{BaseProtocol, Endpoint, PacketSize};
    use chrono::DateTime;
    use std::cell::RefCell;
    use std::net::{IpAddr, Ipv4Addr};

    struct RecordingSink {
        ready_calls: RefCell<usize>,
        written: RefCell<Vec<u64>>,
    }

    impl DocumentSink for RecordingSink {
        async fn ensure_ready(&self) -> Result<()> {
            *self.ready_calls.borrow_mut() += 1;
            Ok(())
        }

        async fn write(&self, packet: &Packet) -> Result<()> {
            assert_eq!(*self.ready_calls.borrow(), 1);
            self.written.borrow_mut().push(packet.stream);
            Ok(())
        }
    }

    fn packet(stream: u64) -> Packet {
        let endpoint = Endpoint {
            address: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            host: "10.0.0.5".to_string(),
            port: 443,
            domain: None,
            subdomain: None,
            fld: None,
        };
        Packet {
            timestamp: DateTime::from_timestamp(1611000000, 0).unwrap(),
            protocols_string: "eth:ethertype:ip:udp:dns".to_string(),
            protocols: vec!["eth".to_string(), "ip".to_string(), "udp".to_string()],
            base_protocol: BaseProtocol::Udp,
            app_protocol: "dns".to_string(),
            size: PacketSize {
                frame_length: 86,
                ip_length: 72,
                data_length: 52,
            },
            source: endpoint.clone(),
            destination: endpoint,
            tcp_sequence: None,
            tcp_next_sequence: None,
            stream,
            classification: None,
        }
    }

    #[test]
    fn test_writes_every_packet_in_order() {
        let sink = RecordingSink {
            ready_calls: RefCell::new(0),
            written: RefCell::new(Vec::new()),
        };
        let packets = vec![packet(2), packet(0), packet(1)];

        tokio_test::block_on(index_packets(&sink, &packets)).unwrap();

        assert_eq!(*sink.ready_calls.borrow(), 1);
        assert_eq!(*sink.written.borrow(), vec![2, 0, 1]);
    }

    #[test]
    fn test_empty_capture_still_prepares_index() {
        let sink = RecordingSink {
            ready_calls: RefCell::new(0),
            written: RefCell::new(Vec::new()),
        };

        tokio_test::block_on(index_packets(&sink, &[])).unwrap();

        assert_eq!(*sink.ready_calls.borrow(), 1);
        assert!(sink.written.borrow().is_empty());
    }
}
