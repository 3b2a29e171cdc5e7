use serde::{Deserialize, Serialize};

/// How the server gets its public IP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IpDirective {
    /// Reserve a fresh flexible IP right before creating the server.
    CreateNew,
    /// Attach an already reserved flexible IP.
    AttachExisting(String),
    /// Let the API assign an address without reserving one.
    Dynamic,
    /// No public IP.
    None,
}

impl IpDirective {
    pub fn needs_creation(&self) -> bool {
        matches!(self, IpDirective::CreateNew)
    }
}

/// Flexible IP as returned by the IP endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexibleIp {
    pub id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub organization: Option<String>,
}
