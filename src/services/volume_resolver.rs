use crate::api::ComputeApi;
use crate::error::ProvisionError;
use crate::models::VolumeTemplate;

/// Look up an existing volume and turn it into a template.
///
/// The template keeps the volume's class and size so it can be validated
/// like a new volume; it never carries an organization.
pub async fn resolve_existing_volume(
    api: &dyn ComputeApi,
    zone: &str,
    volume_id: &str,
) -> Result<VolumeTemplate, ProvisionError> {
    let volume = api.get_volume(zone, volume_id).await.map_err(|e| {
        tracing::debug!("volume lookup for {} failed: {}", volume_id, e);
        ProvisionError::VolumeNotFound(volume_id.to_string())
    })?;

    if let Some(server) = &volume.server {
        return Err(ProvisionError::VolumeAlreadyAttached {
            volume_id: volume.id.clone(),
            server_id: server.id.clone(),
        });
    }

    Ok(VolumeTemplate::from_existing(&volume))
}
