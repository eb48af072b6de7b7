use std::path::Path;

use log::info;
use serde_json::json;

use crate::{CapscopeError, Result};

/// Dashboard provisioning over the Kibana management API. Every failure
/// here is downgraded to a warning by the caller; the indexed data is
/// usable without the dashboard.
pub struct KibanaProvisioner {
    client: reqwest::Client,
    base_url: String,
    space: String,
}

impl KibanaProvisioner {
    pub fn new(base_url: &str, space: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            space: space.to_string(),
        }
    }

    pub async fn provision(&self, bundle_path: &Path) -> Result<()> {
        self.recreate_space().await?;
        self.import_bundle(bundle_path).await
    }

    async fn recreate_space(&self) -> Result<()> {
        info!("Recreating Kibana space: {}", self.space);
        let delete = self
            .client
            .delete(format!("{}/api/spaces/space/{}", self.base_url, self.space))
            .header("kbn-xsrf", "true")
            .send()
            .await
            .map_err(|e| {
                CapscopeError::Dashboard(format!(
                    "Kibana unreachable at {}: {}",
                    self.base_url, e
                ))
            })?;
        // 404 means the space did not exist yet
        if !delete.status().is_success() && delete.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(CapscopeError::Dashboard(format!(
                "failed to delete space {}: {}",
                self.space,
                delete.status()
            )));
        }

        let body = json!({
            "id": self.space,
            "name": self.space,
            "description": "Packet capture classification dashboards",
        });
        let create = self
            .client
            .post(format!("{}/api/spaces/space", self.base_url))
            .header("kbn-xsrf", "true")
            .json(&body)
            .send()
            .await?;
        if !create.status().is_success() {
            return Err(CapscopeError::Dashboard(format!(
                "failed to create space {}: {}",
                self.space,
                create.status()
            )));
        }
        Ok(())
    }

    async fn import_bundle(&self, bundle_path: &Path) -> Result<()> {
        info!("Importing dashboard bundle {}", bundle_path.display());
        let bundle = std::fs::read(bundle_path)?;
        let file_name = bundle_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("dashboard.ndjson")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bundle).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!(
                "{}/s/{}/api/saved_objects/_import?overwrite=true",
                self.base_url, self.space
            ))
            .header("kbn-xsrf", "true")
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CapscopeError::Dashboard(format!(
                "dashboard import failed: {} {}",
                status, body
            )));
        }
        Ok(())
    }
}
