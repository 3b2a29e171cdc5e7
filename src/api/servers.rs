use std::time::{Duration, Instant};

use super::client::{api_call, extract};
use super::error::ApiError;
use crate::models::{CreationIntent, ServerRecord};

/// Delay between two polls while waiting on a server
const WAIT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Create a server from a resolved intent
pub async fn create_server(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    intent: &CreationIntent,
) -> Result<ServerRecord, ApiError> {
    let body = serde_json::to_value(intent.to_request())?;
    let endpoint = format!("/instance/v1/zones/{}/servers", intent.zone);
    let payload = api_call(client, api_base_url, api_token, "POST", &endpoint, Some(body), None).await?;
    extract(payload, "server")
}

/// Get server details
pub async fn get_server(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    server_id: &str,
) -> Result<ServerRecord, ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/servers/{}", zone, server_id);
    let payload = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    extract(payload, "server")
}

/// Run a server action such as `poweron`
pub async fn server_action(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    server_id: &str,
    action: &str,
) -> Result<(), ApiError> {
    let endpoint = format!("/instance/v1/zones/{}/servers/{}/action", zone, server_id);
    let body = serde_json::json!({ "action": action });
    api_call(client, api_base_url, api_token, "POST", &endpoint, Some(body), None).await?;
    Ok(())
}

/// Poll a server until it reaches a settled state or the timeout expires
pub async fn wait_for_server(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    zone: &str,
    server_id: &str,
    timeout: Duration,
) -> Result<ServerRecord, ApiError> {
    let start = Instant::now();
    loop {
        let server = get_server(client, api_base_url, api_token, zone, server_id).await?;
        if server.is_settled() {
            return Ok(server);
        }
        if start.elapsed() >= timeout {
            return Err(ApiError::Timeout(format!(
                "server {} still {} after {}s",
                server_id,
                server.state,
                timeout.as_secs()
            )));
        }
        tracing::debug!("server {} is {}, waiting", server_id, server.state);
        tokio::time::sleep(WAIT_POLL_INTERVAL).await;
    }
}
