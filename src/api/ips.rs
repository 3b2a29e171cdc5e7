use super::client::{api_call, extract};
use super::error::ApiError;
use crate::models::FlexibleIp;
use crate::utils::encode_path_segment;

/// Get a flexible IP by address (the API also accepts the IP id here)
pub async fn get_ip(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    ip: &str,
) -> Result<FlexibleIp, ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/ips/{}", zone, encode_path_segment(ip));
    let payload = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    extract(payload, "ip")
}

/// Reserve a new flexible IP
pub async fn create_ip(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    organization_id: Option<&str>,
) -> Result<FlexibleIp, ApiError> {
    let mut payload = serde_json::Map::new();
    if let Some(org) = organization_id {
        payload.insert("organization".to_string(), serde_json::Value::String(org.to_string()));
    }
    let endpoint = format!("/instance/v1/zones/{}/ips", zone);
    let res = api_call(client, api_base_url, api_token, "POST", &endpoint, Some(serde_json::Value::Object(payload)), None).await?;
    extract(res, "ip")
}

/// Release a flexible IP
pub async fn delete_ip(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    ip_id: &str,
) -> Result<(), ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/ips/{}", zone, encode_path_segment(ip_id));
    api_call(client, api_base_url, api_token, "DELETE", &endpoint, None, None).await?;
    Ok(())
}
