// Shared by several test binaries; not every helper is used by each one.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use instancer::api::{ApiError, ComputeApi};
use instancer::models::{
    AttachedServer, CreationIntent, Image, ImageRootVolume, MarketplaceImage, ServerRecord,
    StorageClass, Volume, VolumeConstraint,
};

pub const IMAGE_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const IP_ID: &str = "22222222-2222-2222-2222-222222222222";
pub const VOLUME_ID: &str = "33333333-3333-3333-3333-333333333333";
pub const ATTACHED_VOLUME_ID: &str = "44444444-4444-4444-4444-444444444444";
pub const BOOTSCRIPT_ID: &str = "55555555-5555-5555-5555-555555555555";
pub const NEW_IP_ID: &str = "66666666-6666-6666-6666-666666666666";
pub const SERVER_ID: &str = "77777777-7777-7777-7777-777777777777";

pub const GB: u64 = 1_000_000_000;

/// In-memory `ComputeApi` recording every call it receives.
pub struct FakeComputeApi {
    pub labels: HashMap<String, String>,
    pub ips_by_address: HashMap<String, String>,
    pub volumes: HashMap<String, Volume>,
    /// `None` makes the listing fail.
    pub constraints: Option<HashMap<String, VolumeConstraint>>,
    pub images: HashMap<String, Image>,
    pub bootscripts: Vec<String>,
    /// `None` makes the listing fail.
    pub marketplace: Option<Vec<MarketplaceImage>>,
    pub fail_create_ip: bool,
    pub fail_create_server: bool,
    pub fail_delete_ip: bool,
    pub fail_power_on: bool,
    calls: Mutex<Vec<String>>,
    intents: Mutex<Vec<CreationIntent>>,
}

impl FakeComputeApi {
    /// A zone with one labelled image, one reserved IP, one free and one
    /// attached volume, and DEV1-S / GP1-XS server types.
    pub fn new() -> Self {
        let mut labels = HashMap::new();
        labels.insert("ubuntu_focal".to_string(), IMAGE_ID.to_string());

        let mut ips_by_address = HashMap::new();
        ips_by_address.insert("51.15.10.20".to_string(), IP_ID.to_string());

        let mut volumes = HashMap::new();
        volumes.insert(
            VOLUME_ID.to_string(),
            Volume {
                id: VOLUME_ID.to_string(),
                name: "data".to_string(),
                volume_type: StorageClass::Block,
                size_bytes: 50 * GB,
                server: None,
            },
        );
        volumes.insert(
            ATTACHED_VOLUME_ID.to_string(),
            Volume {
                id: ATTACHED_VOLUME_ID.to_string(),
                name: "busy".to_string(),
                volume_type: StorageClass::Local,
                size_bytes: 20 * GB,
                server: Some(AttachedServer {
                    id: "srv-busy".to_string(),
                    name: "busy".to_string(),
                }),
            },
        );

        let mut constraints = HashMap::new();
        constraints.insert(
            "DEV1-S".to_string(),
            VolumeConstraint {
                min_bytes: 20 * GB,
                max_bytes: 100 * GB,
            },
        );
        constraints.insert(
            "GP1-XS".to_string(),
            VolumeConstraint {
                min_bytes: 150 * GB,
                max_bytes: 150 * GB,
            },
        );

        let mut images = HashMap::new();
        images.insert(
            IMAGE_ID.to_string(),
            Image {
                id: IMAGE_ID.to_string(),
                name: "Ubuntu 20.04".to_string(),
                root_volume: Some(ImageRootVolume {
                    id: "root-snap".to_string(),
                    size_bytes: 10 * GB,
                }),
            },
        );

        let marketplace = ["ubuntu_focal", "ubuntu_bionic", "debian_buster"]
            .iter()
            .map(|label| MarketplaceImage {
                label: label.to_string(),
                ..Default::default()
            })
            .collect();

        FakeComputeApi {
            labels,
            ips_by_address,
            volumes,
            constraints: Some(constraints),
            images,
            bootscripts: vec![BOOTSCRIPT_ID.to_string()],
            marketplace: Some(marketplace),
            fail_create_ip: false,
            fail_create_server: false,
            fail_delete_ip: false,
            fail_power_on: false,
            calls: Mutex::new(Vec::new()),
            intents: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    /// Intent received by the last `create_server` call.
    pub fn last_intent(&self) -> Option<CreationIntent> {
        self.intents.lock().unwrap().last().cloned()
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::NotFound(format!("{} not found", what))
}

fn server_error() -> ApiError {
    ApiError::Http {
        status: 500,
        message: "internal error".to_string(),
    }
}

#[async_trait]
impl ComputeApi for FakeComputeApi {
    async fn resolve_image_label(
        &self,
        _zone: &str,
        label: &str,
        _commercial_type: &str,
    ) -> Result<String, ApiError> {
        self.record("resolve_image_label");
        self.labels.get(label).cloned().ok_or_else(|| not_found(label))
    }

    async fn lookup_ip_by_address(&self, _zone: &str, address: &str) -> Result<String, ApiError> {
        self.record("lookup_ip_by_address");
        self.ips_by_address
            .get(address)
            .cloned()
            .ok_or_else(|| not_found(address))
    }

    async fn create_ip(&self, _zone: &str, _organization_id: Option<&str>) -> Result<String, ApiError> {
        self.record("create_ip");
        if self.fail_create_ip {
            return Err(server_error());
        }
        Ok(NEW_IP_ID.to_string())
    }

    async fn delete_ip(&self, _zone: &str, _ip_id: &str) -> Result<(), ApiError> {
        self.record("delete_ip");
        if self.fail_delete_ip {
            return Err(server_error());
        }
        Ok(())
    }

    async fn get_volume(&self, _zone: &str, volume_id: &str) -> Result<Volume, ApiError> {
        self.record("get_volume");
        self.volumes
            .get(volume_id)
            .cloned()
            .ok_or_else(|| not_found(volume_id))
    }

    async fn list_server_type_constraints(
        &self,
        _zone: &str,
    ) -> Result<HashMap<String, VolumeConstraint>, ApiError> {
        self.record("list_server_type_constraints");
        self.constraints.clone().ok_or_else(server_error)
    }

    async fn get_image(&self, _zone: &str, image_id: &str) -> Result<Image, ApiError> {
        self.record("get_image");
        self.images.get(image_id).cloned().ok_or_else(|| not_found(image_id))
    }

    async fn get_bootscript(&self, _zone: &str, bootscript_id: &str) -> Result<(), ApiError> {
        self.record("get_bootscript");
        if self.bootscripts.iter().any(|b| b == bootscript_id) {
            Ok(())
        } else {
            Err(not_found(bootscript_id))
        }
    }

    async fn create_server(&self, intent: &CreationIntent) -> Result<ServerRecord, ApiError> {
        self.record("create_server");
        self.intents.lock().unwrap().push(intent.clone());
        if self.fail_create_server {
            return Err(ApiError::Http {
                status: 400,
                message: "quota exceeded".to_string(),
            });
        }
        Ok(ServerRecord {
            id: SERVER_ID.to_string(),
            name: intent.name.clone(),
            state: "stopped".to_string(),
            commercial_type: intent.commercial_type.clone(),
            zone: intent.zone.clone(),
            tags: intent.tags.clone(),
            enable_ipv6: intent.enable_ipv6,
            ..Default::default()
        })
    }

    async fn power_on_server(&self, _zone: &str, _server_id: &str) -> Result<(), ApiError> {
        self.record("power_on_server");
        if self.fail_power_on {
            return Err(server_error());
        }
        Ok(())
    }

    async fn list_marketplace_images(&self) -> Result<Vec<MarketplaceImage>, ApiError> {
        self.record("list_marketplace_images");
        self.marketplace.clone().ok_or_else(server_error)
    }

    async fn wait_for_server(
        &self,
        _zone: &str,
        server_id: &str,
        _timeout: Duration,
    ) -> Result<ServerRecord, ApiError> {
        self.record("wait_for_server");
        Ok(ServerRecord {
            id: server_id.to_string(),
            state: "running".to_string(),
            ..Default::default()
        })
    }
}
