use super::client::api_call;
use super::error::ApiError;

/// Check that a bootscript exists
pub async fn get_bootscript(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    bootscript_id: &str,
) -> Result<(), ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/bootscripts/{}", zone, bootscript_id);
    api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    Ok(())
}
