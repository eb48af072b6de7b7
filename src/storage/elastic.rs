use log::info;
use serde_json::json;

use super::DocumentSink;
use crate::packet::Packet;
use crate::{CapscopeError, Result};

pub struct ElasticIndexer {
    client: reqwest::Client,
    base_url: String,
    index: String,
}

impl ElasticIndexer {
    pub fn new(base_url: &str, index: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
        }
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }

    async fn ping(&self) -> Result<()> {
        info!("Checking Elasticsearch connection");
        let response = self.client.get(&self.base_url).send().await.map_err(|e| {
            CapscopeError::Storage(format!(
                "Elasticsearch unreachable at {}: {}",
                self.base_url, e
            ))
        })?;
        if !response.status().is_success() {
            return Err(CapscopeError::Storage(format!(
                "Elasticsearch at {} answered {}",
                self.base_url,
                response.status()
            )));
        }
        Ok(())
    }

    async fn remove_index(&self) -> Result<()> {
        let response = self.client.delete(self.index_url()).send().await?;
        // 404 means there was nothing to remove
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(CapscopeError::Storage(format!(
                "failed to delete index {}: {}",
                self.index,
                response.status()
            )));
        }
        Ok(())
    }

    async fn create_index(&self) -> Result<()> {
        let response = self
            .client
            .put(self.index_url())
            .json(&index_mapping())
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CapscopeError::Storage(format!(
                "failed to create index {}: {} {}",
                self.index, status, body
            )));
        }
        Ok(())
    }
}

impl DocumentSink for ElasticIndexer {
    async fn ensure_ready(&self) -> Result<()> {
        self.ping().await?;
        info!("Recreating Elasticsearch index: {}", self.index);
        self.remove_index().await?;
        self.create_index().await
    }

    async fn write(&self, packet: &Packet) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/_doc", self.index_url()))
            .json(packet)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CapscopeError::Storage(format!(
                "failed to index packet: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

fn endpoint_properties() -> serde_json::Value {
    json!({
        "address": { "type": "ip" },
        "host": { "type": "keyword" },
        "port": { "type": "integer" },
        "domain": { "type": "keyword" },
        "subdomain": { "type": "keyword" },
        "fld": { "type": "keyword" }
    })
}

/// Not every record populates every field (udp has no sequences), hence
/// ignore_malformed on the index.
pub fn index_mapping() -> serde_json::Value {
    json!({
        "settings": {
            "index.mapping.ignore_malformed": true
        },
        "mappings": {
            "properties": {
                "timestamp": { "type": "date", "format": "strict_date_optional_time_nanos" },
                "protocols_string": { "type": "text" },
                "protocols": { "type": "keyword" },
                "base_protocol": { "type": "keyword" },
                "app_protocol": { "type": "keyword" },
                "size": {
                    "properties": {
                        "frame_length": { "type": "integer" },
                        "ip_length": { "type": "integer" },
                        "data_length": { "type": "integer" }
                    }
                },
                "source": { "properties": endpoint_properties() },
                "destination": { "properties": endpoint_properties() },
                "tcp_sequence": { "type": "integer" },
                "tcp_next_sequence": { "type": "integer" },
                "stream": { "type": "integer" },
                "classification": {
                    "properties": {
                        "traffic_direction": { "type": "keyword" },
                        "type": { "type": "keyword" },
                        "site": { "type": "keyword" }
                    }
                }
            }
        }
    })
}
