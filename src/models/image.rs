use serde::{Deserialize, Serialize};

/// Local image as needed for root volume validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub root_volume: Option<ImageRootVolume>,
}

impl Image {
    /// Size the root volume of a server booted from this image must reach.
    pub fn root_volume_size_bytes(&self) -> u64 {
        self.root_volume.as_ref().map(|v| v.size_bytes).unwrap_or(0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRootVolume {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "size", default)]
    pub size_bytes: u64,
}

/// Marketplace entry: a label plus its published versions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceImage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub current_public_version: String,
    #[serde(default)]
    pub versions: Vec<MarketplaceVersion>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceVersion {
    pub id: String,
    #[serde(default)]
    pub local_images: Vec<MarketplaceLocalImage>,
}

/// Zone-local copy of a marketplace version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceLocalImage {
    pub id: String,
    pub zone: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub compatible_commercial_types: Vec<String>,
}

impl MarketplaceImage {
    /// Local image id of the current version for a zone and commercial type.
    pub fn local_image_id(&self, zone: &str, commercial_type: &str) -> Option<&str> {
        self.versions
            .iter()
            .filter(|v| self.current_public_version.is_empty() || v.id == self.current_public_version)
            .flat_map(|v| v.local_images.iter())
            .find(|li| {
                li.zone == zone
                    && li
                        .compatible_commercial_types
                        .iter()
                        .any(|ct| ct.eq_ignore_ascii_case(commercial_type))
            })
            .map(|li| li.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarketplaceImage {
        serde_json::from_value(serde_json::json!({
            "id": "m-1",
            "label": "ubuntu_focal",
            "current_public_version": "v2",
            "versions": [
                {"id": "v1", "local_images": [
                    {"id": "old", "zone": "fr-par-1", "compatible_commercial_types": ["DEV1-S"]}
                ]},
                {"id": "v2", "local_images": [
                    {"id": "par-dev", "zone": "fr-par-1", "compatible_commercial_types": ["DEV1-S", "DEV1-M"]},
                    {"id": "ams-dev", "zone": "nl-ams-1", "compatible_commercial_types": ["DEV1-S"]}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn picks_current_version_for_zone_and_type() {
        let image = sample();
        assert_eq!(image.local_image_id("fr-par-1", "DEV1-S"), Some("par-dev"));
        assert_eq!(image.local_image_id("nl-ams-1", "dev1-s"), Some("ams-dev"));
        assert_eq!(image.local_image_id("nl-ams-1", "DEV1-M"), None);
    }
}
