use crate::api::ComputeApi;
use crate::error::ProvisionError;
use crate::utils::is_uuid;

/// Turn the image argument into a local image id.
///
/// A UUID is used as-is; anything else is looked up as a marketplace label
/// for the zone and commercial type.
pub async fn resolve_image(
    api: &dyn ComputeApi,
    zone: &str,
    image: &str,
    commercial_type: &str,
) -> Result<String, ProvisionError> {
    if is_uuid(image) {
        return Ok(image.to_string());
    }

    tracing::info!("finding local image for label {} ({})", image, commercial_type);
    api.resolve_image_label(zone, image, commercial_type)
        .await
        .map_err(|e| {
            tracing::debug!("label lookup failed: {}", e);
            ProvisionError::UnknownImageLabel {
                label: image.to_string(),
                commercial_type: commercial_type.to_string(),
            }
        })
}
