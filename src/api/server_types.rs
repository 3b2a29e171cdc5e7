use std::collections::HashMap;

use super::client::{api_call, extract};
use super::error::ApiError;
use crate::models::{ServerType, VolumeConstraint};

/// Load the local volume constraint of every commercial type in a zone
pub async fn load_volume_constraints(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
) -> Result<HashMap<String, VolumeConstraint>, ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/products/servers", zone);
    let payload = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    let servers: HashMap<String, ServerType> = extract(payload, "servers")?;
    Ok(servers
        .into_iter()
        .map(|(commercial_type, st)| (commercial_type, st.volumes_constraint))
        .collect())
}
