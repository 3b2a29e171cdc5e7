use crate::api::ComputeApi;
use crate::error::ProvisionError;
use crate::models::{VolumeDescriptor, VolumeSet, VolumeTemplate};

use super::volume_spec::parse_volume_descriptor;
use super::volume_resolver::resolve_existing_volume;

/// Parse a descriptor and resolve it into a template, looking the volume
/// up when it references an existing one.
pub async fn build_volume_template(
    api: &dyn ComputeApi,
    zone: &str,
    organization_id: Option<&str>,
    descriptor: &str,
) -> Result<VolumeTemplate, ProvisionError> {
    match parse_volume_descriptor(descriptor)? {
        VolumeDescriptor::NewVolume {
            storage_class,
            size_bytes,
        } => Ok(VolumeTemplate::new_volume(
            storage_class,
            size_bytes,
            organization_id.map(str::to_string),
        )),
        VolumeDescriptor::ExistingVolume { id } => resolve_existing_volume(api, zone, &id).await,
    }
}

/// Assemble the root and additional volumes of a server.
///
/// Additional volume `i` (0-based) is named `<server_name>-<i+1>`. Existing
/// additional volumes are reduced to `{id, name}` right away. Errors on an
/// additional volume carry its position.
pub async fn build_volume_set(
    api: &dyn ComputeApi,
    zone: &str,
    organization_id: Option<&str>,
    server_name: &str,
    root_volume: Option<&str>,
    additional_volumes: &[String],
) -> Result<VolumeSet, ProvisionError> {
    let mut set = VolumeSet::default();

    if let Some(root) = root_volume.filter(|r| !r.trim().is_empty()) {
        let mut template = build_volume_template(api, zone, organization_id, root).await?;
        template.organization_id = None;
        set.root = Some(template);
    }

    for (i, descriptor) in additional_volumes.iter().enumerate() {
        let mut template = build_volume_template(api, zone, organization_id, descriptor)
            .await
            .map_err(|e| e.at_volume(i))?;
        template.name = Some(format!("{}-{}", server_name, i + 1));

        if template.is_existing() {
            template = template.strip_to_reference();
        }
        set.additional.push(template);
    }

    Ok(set)
}
