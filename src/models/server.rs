use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::image::Image;
use super::ip::{FlexibleIp, IpDirective};
use super::volume::{Volume, VolumeSet, VolumeTemplate};

/// Fully resolved description of the server to create.
///
/// Built once per invocation; only `public_ip` changes afterwards, when a
/// new flexible IP is reserved for the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationIntent {
    pub zone: String,
    pub organization_id: Option<String>,
    pub name: String,
    pub commercial_type: String,
    pub image: String,
    pub ip: IpDirective,
    pub public_ip: Option<String>,
    pub dynamic_ip_required: Option<bool>,
    pub volumes: Option<VolumeSet>,
    pub tags: Vec<String>,
    pub enable_ipv6: bool,
    pub security_group: Option<String>,
    pub placement_group: Option<String>,
    pub bootscript: Option<String>,
    pub start: bool,
}

impl CreationIntent {
    /// Body of the create-server call.
    pub fn to_request(&self) -> CreateServerRequest {
        CreateServerRequest {
            organization: self.organization_id.clone(),
            name: self.name.clone(),
            commercial_type: self.commercial_type.clone(),
            image: self.image.clone(),
            volumes: self
                .volumes
                .as_ref()
                .map(|set| set.to_request_map(&self.name)),
            public_ip: self.public_ip.clone(),
            dynamic_ip_required: self.dynamic_ip_required,
            tags: self.tags.clone(),
            enable_ipv6: self.enable_ipv6,
            security_group: self.security_group.clone(),
            placement_group: self.placement_group.clone(),
            bootscript: self.bootscript.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateServerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub name: String,
    pub commercial_type: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<BTreeMap<String, VolumeTemplate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_ip_required: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub enable_ipv6: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootscript: Option<String>,
}

/// Server as returned by the API after creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub commercial_type: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub public_ip: Option<FlexibleIp>,
    #[serde(default)]
    pub dynamic_ip_required: bool,
    #[serde(default)]
    pub enable_ipv6: bool,
    #[serde(default)]
    pub volumes: BTreeMap<String, Volume>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
}

impl ServerRecord {
    /// States after which waiting on the server is pointless.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state.as_str(),
            "running" | "stopped" | "stopped in place" | "locked"
        )
    }
}
