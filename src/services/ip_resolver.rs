use std::net::IpAddr;

use crate::api::ComputeApi;
use crate::error::ProvisionError;
use crate::models::IpDirective;
use crate::utils::is_uuid;

/// Map the `ip` argument to a directive.
///
/// | argument          | directive               |
/// |-------------------|-------------------------|
/// | `""`, `new`       | `CreateNew`             |
/// | IP id (UUID)      | `AttachExisting(id)`    |
/// | IP address        | `AttachExisting(id)` after a lookup |
/// | `dynamic`         | `Dynamic`               |
/// | `none`            | `None`                  |
pub async fn resolve_ip(
    api: &dyn ComputeApi,
    zone: &str,
    ip: &str,
) -> Result<IpDirective, ProvisionError> {
    match ip {
        "" | "new" => Ok(IpDirective::CreateNew),
        "dynamic" => Ok(IpDirective::Dynamic),
        "none" => Ok(IpDirective::None),
        id if is_uuid(id) => Ok(IpDirective::AttachExisting(id.to_string())),
        address if address.parse::<IpAddr>().is_ok() => {
            tracing::info!("finding public IP UUID from address: {}", address);
            let id = api.lookup_ip_by_address(zone, address).await.map_err(|e| {
                tracing::debug!("IP lookup failed: {}", e);
                ProvisionError::IpNotOwned(address.to_string())
            })?;
            Ok(IpDirective::AttachExisting(id))
        }
        other => Err(ProvisionError::InvalidIpArgument(other.to_string())),
    }
}
