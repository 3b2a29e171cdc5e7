use serde::Deserialize;

use super::client::api_call;
use super::error::ApiError;
use crate::models::MarketplaceImage;

/// Page size used when walking the marketplace catalog
pub const MARKETPLACE_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ListImagesResponse {
    #[serde(default)]
    images: Vec<MarketplaceImage>,
    #[serde(default)]
    total_count: Option<usize>,
}

/// Load one page of marketplace images (1-indexed).
pub async fn load_marketplace_page(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    page: usize,
    per_page: usize,
) -> Result<(Vec<MarketplaceImage>, Option<usize>), ApiError> {
    let params = vec![
        ("page".to_string(), page.to_string()),
        ("per_page".to_string(), per_page.to_string()),
    ];
    let payload = api_call(client, api_base_url, api_token, "GET", "/marketplace/v1/images", None, Some(params)).await?;
    let res: ListImagesResponse = serde_json::from_value(payload)?;
    Ok((res.images, res.total_count))
}

/// Load every marketplace image, following pages until the catalog is exhausted.
pub async fn load_marketplace_images(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<MarketplaceImage>, ApiError> {
    let mut all = Vec::new();
    let mut page = 1;
    loop {
        let (images, total_count) =
            load_marketplace_page(client, api_base_url, api_token, page, MARKETPLACE_PAGE_SIZE).await?;
        let fetched = images.len();
        all.extend(images);

        let done = match total_count {
            Some(total) => all.len() >= total,
            None => fetched < MARKETPLACE_PAGE_SIZE,
        };
        if done || fetched == 0 {
            break;
        }
        page += 1;
    }
    tracing::debug!("Loaded {} marketplace images", all.len());
    Ok(all)
}

/// Find the local image id published under `label` for a zone and commercial type.
pub async fn get_local_image_id_by_label(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    label: &str,
    commercial_type: &str,
) -> Result<String, ApiError> {
    let images = load_marketplace_images(client, api_base_url, api_token).await?;
    images
        .iter()
        .find(|image| image.label == label)
        .and_then(|image| image.local_image_id(zone, commercial_type))
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "no local image for label {} in {} ({})",
                label, zone, commercial_type
            ))
        })
}
