use super::client::{api_call, extract};
use super::error::ApiError;
use crate::models::Volume;

/// Get volume details
pub async fn get_volume(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    volume_id: &str,
) -> Result<Volume, ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/volumes/{}", zone, volume_id);
    let payload = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    extract(payload, "volume")
}
