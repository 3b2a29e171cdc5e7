use serde::{Deserialize, Serialize};

/// Local storage bounds for one commercial type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConstraint {
    #[serde(rename = "min_size", default)]
    pub min_bytes: u64,
    #[serde(rename = "max_size", default)]
    pub max_bytes: u64,
}

impl VolumeConstraint {
    pub fn contains(&self, total_bytes: u64) -> bool {
        total_bytes >= self.min_bytes && total_bytes <= self.max_bytes
    }
}

/// Entry of the server type listing; only the volume constraint is used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerType {
    #[serde(default)]
    pub volumes_constraint: VolumeConstraint,
}
