use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::error::ApiError;
use super::{bootscripts, images, ips, marketplace, server_types, servers, volumes};
use crate::models::{CreationIntent, Image, MarketplaceImage, ServerRecord, Volume, VolumeConstraint};

/// Remote operations the provisioning flow depends on.
///
/// Calls are issued one at a time and never retried here.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Local image id published under a marketplace label.
    async fn resolve_image_label(
        &self,
        zone: &str,
        label: &str,
        commercial_type: &str,
    ) -> Result<String, ApiError>;

    /// Id of the flexible IP reserved at `address` by the caller.
    async fn lookup_ip_by_address(&self, zone: &str, address: &str) -> Result<String, ApiError>;

    /// Reserve a flexible IP and return its id.
    async fn create_ip(&self, zone: &str, organization_id: Option<&str>) -> Result<String, ApiError>;

    async fn delete_ip(&self, zone: &str, ip_id: &str) -> Result<(), ApiError>;

    async fn get_volume(&self, zone: &str, volume_id: &str) -> Result<Volume, ApiError>;

    /// Local volume bounds keyed by commercial type.
    async fn list_server_type_constraints(
        &self,
        zone: &str,
    ) -> Result<HashMap<String, VolumeConstraint>, ApiError>;

    async fn get_image(&self, zone: &str, image_id: &str) -> Result<Image, ApiError>;

    async fn get_bootscript(&self, zone: &str, bootscript_id: &str) -> Result<(), ApiError>;

    async fn create_server(&self, intent: &CreationIntent) -> Result<ServerRecord, ApiError>;

    async fn power_on_server(&self, zone: &str, server_id: &str) -> Result<(), ApiError>;

    /// Whole marketplace catalog, all pages.
    async fn list_marketplace_images(&self) -> Result<Vec<MarketplaceImage>, ApiError>;

    /// Block until the server settles or `timeout` elapses.
    async fn wait_for_server(
        &self,
        zone: &str,
        server_id: &str,
        timeout: Duration,
    ) -> Result<ServerRecord, ApiError>;
}

/// `ComputeApi` over the public HTTP API.
#[derive(Clone)]
pub struct HttpComputeApi {
    client: reqwest::Client,
    api_base_url: String,
    api_token: String,
}

impl HttpComputeApi {
    pub fn new(api_base_url: String, api_token: String) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("instancer/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base_url,
            api_token,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

#[async_trait]
impl ComputeApi for HttpComputeApi {
    async fn resolve_image_label(
        &self,
        zone: &str,
        label: &str,
        commercial_type: &str,
    ) -> Result<String, ApiError> {
        marketplace::get_local_image_id_by_label(
            &self.client,
            &self.api_base_url,
            &self.api_token,
            zone,
            label,
            commercial_type,
        )
        .await
    }

    async fn lookup_ip_by_address(&self, zone: &str, address: &str) -> Result<String, ApiError> {
        let ip = ips::get_ip(&self.client, &self.api_base_url, &self.api_token, zone, address).await?;
        Ok(ip.id)
    }

    async fn create_ip(&self, zone: &str, organization_id: Option<&str>) -> Result<String, ApiError> {
        let ip = ips::create_ip(&self.client, &self.api_base_url, &self.api_token, zone, organization_id).await?;
        Ok(ip.id)
    }

    async fn delete_ip(&self, zone: &str, ip_id: &str) -> Result<(), ApiError> {
        ips::delete_ip(&self.client, &self.api_base_url, &self.api_token, zone, ip_id).await
    }

    async fn get_volume(&self, zone: &str, volume_id: &str) -> Result<Volume, ApiError> {
        volumes::get_volume(&self.client, &self.api_base_url, &self.api_token, zone, volume_id).await
    }

    async fn list_server_type_constraints(
        &self,
        zone: &str,
    ) -> Result<HashMap<String, VolumeConstraint>, ApiError> {
        server_types::load_volume_constraints(&self.client, &self.api_base_url, &self.api_token, zone).await
    }

    async fn get_image(&self, zone: &str, image_id: &str) -> Result<Image, ApiError> {
        images::get_image(&self.client, &self.api_base_url, &self.api_token, zone, image_id).await
    }

    async fn get_bootscript(&self, zone: &str, bootscript_id: &str) -> Result<(), ApiError> {
        bootscripts::get_bootscript(&self.client, &self.api_base_url, &self.api_token, zone, bootscript_id).await
    }

    async fn create_server(&self, intent: &CreationIntent) -> Result<ServerRecord, ApiError> {
        servers::create_server(&self.client, &self.api_base_url, &self.api_token, intent).await
    }

    async fn power_on_server(&self, zone: &str, server_id: &str) -> Result<(), ApiError> {
        servers::server_action(&self.client, &self.api_base_url, &self.api_token, zone, server_id, "poweron").await
    }

    async fn list_marketplace_images(&self) -> Result<Vec<MarketplaceImage>, ApiError> {
        marketplace::load_marketplace_images(&self.client, &self.api_base_url, &self.api_token).await
    }

    async fn wait_for_server(
        &self,
        zone: &str,
        server_id: &str,
        timeout: Duration,
    ) -> Result<ServerRecord, ApiError> {
        servers::wait_for_server(&self.client, &self.api_base_url, &self.api_token, zone, server_id, timeout).await
    }
}
