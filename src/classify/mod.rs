pub mod matcher;

pub use matcher::{HostMatcher, SubstringMatcher};

use std::net::IpAddr;
use std::path::Path;

use log::{info, warn};

use crate::packet::{Classification, Packet, TrafficCategory, TrafficDirection};
use crate::Result;

/// Immutable classification context, built once per run.
pub struct Classifier<M: HostMatcher = SubstringMatcher> {
    ads: M,
    assets: M,
}

impl Classifier<SubstringMatcher> {
    pub fn from_lookup_files(ads_path: &Path, assets_path: &Path) -> Result<Self> {
        info!("Loading classification lookup lists");
        Ok(Self {
            ads: SubstringMatcher::from_file(ads_path)?,
            assets: SubstringMatcher::from_file(assets_path)?,
        })
    }
}

impl<M: HostMatcher> Classifier<M> {
    pub fn new(ads: M, assets: M) -> Self {
        Self { ads, assets }
    }

    /// Ads is checked strictly before assets, so ads wins on overlap.
    pub fn classify_host(&self, host: &str) -> TrafficCategory {
        if host.is_empty() {
            return TrafficCategory::Unknown;
        }
        if self.ads.matches(host) {
            return TrafficCategory::Ads;
        }
        if self.assets.matches(host) {
            return TrafficCategory::Asset;
        }
        TrafficCategory::Site
    }

    pub fn classify(&self, packets: &mut [Packet], target_address: IpAddr) {
        info!(
            "Classifying {} packets for target {}",
            packets.len(),
            target_address
        );
        for packet in packets.iter_mut() {
            self.classify_packet(packet, target_address);
        }
    }

    fn classify_packet(&self, packet: &mut Packet, target_address: IpAddr) {
        let classification = if packet.source.address == target_address {
            Classification {
                traffic_direction: TrafficDirection::Outgoing,
                category: self.classify_host(&packet.destination.host),
                site: packet.destination.domain.clone(),
            }
        } else if packet.destination.address == target_address {
            Classification {
                traffic_direction: TrafficDirection::Receiving,
                category: self.classify_host(&packet.source.host),
                site: packet.source.domain.clone(),
            }
        } else {
            // Expected in mixed captures with background traffic.
            warn!(
                "neither endpoint matches target {} ({} -> {})",
                target_address, packet.source.address, packet.destination.address
            );
            Classification {
                traffic_direction: TrafficDirection::Unknown,
                category: TrafficCategory::Unknown,
                site: Some("unknown".to_string()),
            }
        };
        packet.classification = Some(classification);
    }
}
