use super::client::{api_call, extract};
use super::error::ApiError;
use crate::models::Image;

/// Get image details
pub async fn get_image(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    image_id: &str,
) -> Result<Image, ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/images/{}", zone, image_id);
    let payload = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    extract(payload, "image")
}
