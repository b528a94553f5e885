///! Cesium ion asset source
///!
///! Finds the newest completed asset, asks ion for its download endpoint and
///! pulls the CZML from there.
use super::{czml::parse_czml, SatelliteSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orbit_common::Satellite;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ION_BASE_URL: &str = "https://api.cesium.com";
const REQUEST_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IonAsset {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    asset_type: String,
    #[serde(default)]
    date_added: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct IonAssetList {
    #[serde(default)]
    items: Vec<IonAsset>,
}

/// Download location for one asset, with a token scoped to it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IonEndpoint {
    url: String,
    access_token: String,
}

pub struct IonSource {
    base_url: String,
    access_token: String,
}

impl IonSource {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    async fn latest_asset(&self, client: &reqwest::Client) -> Result<IonAsset> {
        let url = format!(
            "{}/v1/assets?sortBy=DATE_ADDED&sortOrder=DESC&status=COMPLETE",
            self.base_url
        );

        let response = client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to request ion asset list")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Error fetching assets: HTTP {}", response.status()));
        }

        let list: IonAssetList = response
            .json()
            .await
            .context("Failed to parse ion asset list")?;

        list.items
            .into_iter()
            .next()
            .context("ion account has no completed assets")
    }

    async fn endpoint(&self, client: &reqwest::Client, asset_id: u64) -> Result<IonEndpoint> {
        let url = format!("{}/v1/assets/{}/endpoint", self.base_url, asset_id);

        let response = client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context(format!("Failed to request endpoint for asset {}", asset_id))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP error {} for asset {} endpoint",
                response.status(),
                asset_id
            ));
        }

        response
            .json()
            .await
            .context(format!("Failed to parse endpoint for asset {}", asset_id))
    }
}

#[async_trait]
impl SatelliteSource for IonSource {
    fn describe(&self) -> String {
        format!("ion at {}", self.base_url)
    }

    async fn load_all(&self) -> Result<Vec<Satellite>> {
        if self.access_token.is_empty() {
            anyhow::bail!("No ion access token configured");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build HTTP client")?;

        let asset = self.latest_asset(&client).await?;
        tracing::info!(
            "Latest ion asset: {} '{}' ({}, added {})",
            asset.id,
            asset.name,
            asset.asset_type,
            asset
                .date_added
                .map(|d| d.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string())
        );

        let endpoint = self.endpoint(&client, asset.id).await?;

        let response = client
            .get(&endpoint.url)
            .bearer_auth(&endpoint.access_token)
            .send()
            .await
            .context(format!("Failed to download asset {}", asset.id))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP error {} downloading asset {}",
                response.status(),
                asset.id
            ));
        }

        let content = response
            .text()
            .await
            .context(format!("Failed to read asset {} body", asset.id))?;

        parse_czml(&content).context(format!("Asset {} is not usable CZML", asset.id))
    }
}
