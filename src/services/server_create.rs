use std::fmt;

use crate::api::ComputeApi;
use crate::config::{DEFAULT_COMMERCIAL_TYPE, DEFAULT_IP, DEFAULT_SERVER_NAME_PREFIX};
use crate::error::ProvisionError;
use crate::models::{CreationIntent, IpDirective, ServerRecord};
use crate::utils::{is_uuid, random_name};

use super::best_effort::best_effort;
use super::constraints::{validate_local_volume_sizes, validate_root_volume};
use super::image_resolver::resolve_image;
use super::ip_resolver::resolve_ip;
use super::volume_set::build_volume_set;

/// Arguments of `server create`, as collected by the CLI.
#[derive(Clone, Debug)]
pub struct CreateServerArgs {
    pub zone: String,
    pub organization_id: Option<String>,
    /// Image UUID or marketplace label.
    pub image: String,
    pub commercial_type: String,
    /// Random `srv-...` name when absent.
    pub name: Option<String>,
    pub root_volume: Option<String>,
    pub additional_volumes: Vec<String>,
    /// `new`, `dynamic`, `none`, an IP id or a reserved address.
    pub ip: String,
    pub tags: Vec<String>,
    pub ipv6: bool,
    pub start: bool,
    pub security_group_id: Option<String>,
    pub placement_group_id: Option<String>,
    pub bootscript_id: Option<String>,
}

impl CreateServerArgs {
    pub fn new(zone: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            organization_id: None,
            image: image.into(),
            commercial_type: DEFAULT_COMMERCIAL_TYPE.to_string(),
            name: None,
            root_volume: None,
            additional_volumes: Vec::new(),
            ip: DEFAULT_IP.to_string(),
            tags: Vec::new(),
            ipv6: false,
            start: false,
            security_group_id: None,
            placement_group_id: None,
            bootscript_id: None,
        }
    }

    /// Root volume descriptor, a blank one counting as none.
    fn root_volume(&self) -> Option<&str> {
        self.root_volume.as_deref().filter(|r| !r.trim().is_empty())
    }

    fn has_volumes(&self) -> bool {
        self.root_volume().is_some() || !self.additional_volumes.is_empty()
    }
}

/// Knobs that come from configuration rather than from the command line.
#[derive(Clone, Debug, Default)]
pub struct ProvisionSettings {
    /// Size of the root volume the API adds when none is requested.
    pub default_root_volume_size: Option<u64>,
}

/// Steps of a server creation, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Validating,
    CreatingIp,
    CreatingServer,
    DeletingIp,
    Starting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Resolving => "resolving",
            Stage::Validating => "validating",
            Stage::CreatingIp => "creating-ip",
            Stage::CreatingServer => "creating-server",
            Stage::DeletingIp => "deleting-ip",
            Stage::Starting => "starting",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "server create");
}

/// Resolve every argument into a creation intent and validate it.
///
/// Only read-only lookups are made; nothing exists remotely when this
/// returns an error.
pub async fn resolve_creation_intent(
    api: &dyn ComputeApi,
    args: &CreateServerArgs,
    settings: &ProvisionSettings,
) -> Result<CreationIntent, ProvisionError> {
    enter(Stage::Resolving);
    let zone = args.zone.as_str();
    let name = args
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| random_name(DEFAULT_SERVER_NAME_PREFIX));

    let image = resolve_image(api, zone, &args.image, &args.commercial_type).await?;
    let ip = resolve_ip(api, zone, &args.ip).await?;

    let volumes = if args.has_volumes() {
        Some(
            build_volume_set(
                api,
                zone,
                args.organization_id.as_deref(),
                &name,
                args.root_volume(),
                &args.additional_volumes,
            )
            .await?,
        )
    } else {
        None
    };

    let bootscript = match args.bootscript_id.as_deref().filter(|b| !b.is_empty()) {
        Some(id) => Some(resolve_bootscript(api, zone, id).await?),
        None => None,
    };

    if let Some(set) = &volumes {
        enter(Stage::Validating);
        validate_root_volume(api, zone, &image, set.root.as_ref())
            .await
            .into_result("root volume size validation")?;
        validate_local_volume_sizes(
            api,
            zone,
            &args.commercial_type,
            set,
            settings.default_root_volume_size,
        )
        .await
        .into_result("local volume size validation")?;
    }

    let (public_ip, dynamic_ip_required) = match &ip {
        IpDirective::AttachExisting(id) => (Some(id.clone()), None),
        IpDirective::Dynamic => (None, Some(true)),
        IpDirective::CreateNew | IpDirective::None => (None, None),
    };

    Ok(CreationIntent {
        zone: zone.to_string(),
        organization_id: args.organization_id.clone(),
        name,
        commercial_type: args.commercial_type.clone(),
        image,
        ip,
        public_ip,
        dynamic_ip_required,
        volumes,
        tags: args.tags.clone(),
        enable_ipv6: args.ipv6,
        security_group: args.security_group_id.clone().filter(|s| !s.is_empty()),
        placement_group: args.placement_group_id.clone().filter(|s| !s.is_empty()),
        bootscript,
        start: args.start,
    })
}

async fn resolve_bootscript(
    api: &dyn ComputeApi,
    zone: &str,
    bootscript_id: &str,
) -> Result<String, ProvisionError> {
    if !is_uuid(bootscript_id) {
        return Err(ProvisionError::InvalidBootscriptId(bootscript_id.to_string()));
    }
    api.get_bootscript(zone, bootscript_id).await.map_err(|e| {
        tracing::debug!("bootscript lookup failed: {}", e);
        ProvisionError::BootscriptNotFound(bootscript_id.to_string())
    })?;
    Ok(bootscript_id.to_string())
}

/// Create the resources described by a resolved intent.
///
/// A new flexible IP is reserved first when requested. If the server then
/// cannot be created, that IP is deleted once and the server error is
/// returned whatever the outcome of the deletion.
pub async fn execute_creation(
    api: &dyn ComputeApi,
    mut intent: CreationIntent,
) -> Result<ServerRecord, ProvisionError> {
    let mut created_ip: Option<String> = None;

    if intent.ip.needs_creation() {
        enter(Stage::CreatingIp);
        tracing::info!("creating IP");
        let ip_id = api
            .create_ip(&intent.zone, intent.organization_id.as_deref())
            .await
            .map_err(ProvisionError::IpCreationFailed)?;
        tracing::info!("IP created: {}", ip_id);
        intent.public_ip = Some(ip_id.clone());
        created_ip = Some(ip_id);
    }

    enter(Stage::CreatingServer);
    tracing::info!("creating server");
    let server = match api.create_server(&intent).await {
        Ok(server) => server,
        Err(err) => {
            if let Some(ip_id) = created_ip.take() {
                enter(Stage::DeletingIp);
                tracing::info!("deleting created IP: {}", ip_id);
                best_effort(
                    &format!("deleting created IP {}", ip_id),
                    api.delete_ip(&intent.zone, &ip_id),
                )
                .await;
            }
            return Err(ProvisionError::ServerCreationFailed(err));
        }
    };
    tracing::info!("server created {}", server.id);

    if intent.start {
        enter(Stage::Starting);
        tracing::info!("starting server");
        let started = best_effort(
            &format!(
                "starting server {} (note that the server is successfully created)",
                server.id
            ),
            api.power_on_server(&intent.zone, &server.id),
        )
        .await;
        if started.is_some() {
            tracing::info!("server started");
        }
    }

    enter(Stage::Done);
    Ok(server)
}

/// Resolve, validate and create a server.
pub async fn create_server(
    api: &dyn ComputeApi,
    args: &CreateServerArgs,
    settings: &ProvisionSettings,
) -> Result<ServerRecord, ProvisionError> {
    let intent = resolve_creation_intent(api, args, settings).await?;
    execute_creation(api, intent).await
}
