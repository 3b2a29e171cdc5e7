use crate::api::ComputeApi;

/// Marketplace labels starting with `prefix`.
///
/// Labels use underscores, so `ubuntu-fo` matches `ubuntu_focal`. A failed
/// listing yields no suggestions rather than an error.
pub async fn complete_image_label(api: &dyn ComputeApi, prefix: &str) -> Vec<String> {
    let images = match api.list_marketplace_images().await {
        Ok(images) => images,
        Err(e) => {
            tracing::debug!("cannot list marketplace images: {}", e);
            return Vec::new();
        }
    };

    let prefix = prefix.replace('-', "_").to_lowercase();
    let mut labels: Vec<String> = images
        .into_iter()
        .map(|image| image.label)
        .filter(|label| label.to_lowercase().starts_with(&prefix))
        .collect();
    labels.sort();
    labels.dedup();
    labels
}
