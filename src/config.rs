use serde::{Deserialize, Serialize};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub capture: CaptureConfig,
    pub classification: ClassificationConfig,
    pub storage: StorageConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub tshark_binary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    pub ads_hosts_path: String,
    pub assets_hosts_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub elasticsearch_url: String,
    pub index: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub kibana_url: String,
    pub space: String,
    pub bundle_path: String,
    pub dashboard_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig {
                tshark_binary: "tshark".to_string(),
            },
            classification: ClassificationConfig {
                ads_hosts_path: "resources/lookup_lists/ads.hosts".to_string(),
                assets_hosts_path: "resources/lookup_lists/assets.hosts".to_string(),
            },
            storage: StorageConfig {
                elasticsearch_url: "http://localhost:9200".to_string(),
                index: "capscope".to_string(),
            },
            dashboard: DashboardConfig {
                enabled: true,
                kibana_url: "http://localhost:5601".to_string(),
                space: "capscope".to_string(),
                bundle_path: "resources/kibana/dashboard.ndjson".to_string(),
                dashboard_id: "capscope-overview".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn dashboard_url(&self) -> String {
        format!(
            "{}/s/{}/app/dashboards#/view/{}",
            self.dashboard.kibana_url, self.dashboard.space, self.dashboard.dashboard_id
        )
    }
}
