use std::env;
use std::path::Path;

use bytesize::ByteSize;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "https://api.scaleway.com";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_ZONE: &str = "fr-par-1";
pub const DEFAULT_COMMERCIAL_TYPE: &str = "DEV1-S";
pub const DEFAULT_IP: &str = "new";
pub const DEFAULT_SERVER_NAME_PREFIX: &str = "srv";
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 600;

/// Commercial types offered by the CLI. Any other value is still passed
/// through to the API.
pub const KNOWN_COMMERCIAL_TYPES: &[&str] = &[
    "GP1-XS", "GP1-S", "GP1-M", "GP1-L", "GP1-XL", "DEV1-S", "DEV1-M", "DEV1-L", "DEV1-XL",
    "RENDER-S",
];

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_default_zone() -> String {
    env::var("DEFAULT_ZONE")
        .ok()
        .map(|z| z.trim().to_string())
        .filter(|z| !z.is_empty())
        .unwrap_or_else(|| DEFAULT_ZONE.to_string())
}

pub fn get_default_organization_id() -> Option<String> {
    env::var("DEFAULT_ORGANIZATION_ID")
        .ok()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
}

/// Root volume size the API allocates when no root volume is requested.
///
/// Unset (or unparseable) means "use the server type's minimum local size".
pub fn get_default_root_volume_size() -> Option<u64> {
    let raw = env::var("DEFAULT_ROOT_VOLUME_SIZE").ok()?;
    match raw.trim().parse::<ByteSize>() {
        Ok(size) => Some(size.as_u64()),
        Err(e) => {
            tracing::warn!("ignoring unparseable DEFAULT_ROOT_VOLUME_SIZE {}: {}", raw, e);
            None
        }
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
