use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Backing storage of a volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageClass {
    /// Host-local storage, bounded per server type.
    #[serde(rename = "l_ssd")]
    Local,
    /// Network-attached block storage.
    #[serde(rename = "b_ssd")]
    Block,
}

impl StorageClass {
    /// Parse the class token of a volume descriptor (`l`, `local`, `b`, `block`).
    pub fn from_token(token: &str) -> Option<StorageClass> {
        match token {
            "l" | "local" => Some(StorageClass::Local),
            "b" | "block" => Some(StorageClass::Block),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Local => "l_ssd",
            StorageClass::Block => "b_ssd",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single volume descriptor string asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VolumeDescriptor {
    NewVolume {
        storage_class: StorageClass,
        size_bytes: u64,
    },
    ExistingVolume {
        id: String,
    },
}

/// Server the volume is attached to, as reported by the volume lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedServer {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Volume returned by the remote volume lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub volume_type: StorageClass,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(default)]
    pub server: Option<AttachedServer>,
}

/// Per-volume record sent with the create-server request.
///
/// Fields left as `None` are omitted from the request body; the API rejects
/// a size or class on a volume referenced by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "volume_type", skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<StorageClass>,
    #[serde(rename = "size", skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(rename = "organization", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl VolumeTemplate {
    /// Template for a volume the API should create.
    pub fn new_volume(
        storage_class: StorageClass,
        size_bytes: u64,
        organization_id: Option<String>,
    ) -> Self {
        VolumeTemplate {
            storage_class: Some(storage_class),
            size_bytes: Some(size_bytes),
            organization_id,
            ..Default::default()
        }
    }

    /// Template for an existing volume, keeping its class and size so it can
    /// be validated like a new one.
    pub fn from_existing(volume: &Volume) -> Self {
        VolumeTemplate {
            id: Some(volume.id.clone()),
            storage_class: Some(volume.volume_type),
            size_bytes: Some(volume.size_bytes),
            ..Default::default()
        }
    }

    pub fn is_existing(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_local(&self) -> bool {
        self.storage_class == Some(StorageClass::Local)
    }

    /// Reduce an existing-volume template to the `{id, name}` pair.
    pub fn strip_to_reference(self) -> Self {
        VolumeTemplate {
            id: self.id,
            name: self.name,
            ..Default::default()
        }
    }
}

/// Position of a volume on the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum VolumeSlot {
    Root,
    /// 1-based position among the additional volumes.
    Additional(usize),
}

impl VolumeSlot {
    /// Wire key: `"0"` for the root volume, `"1"`, `"2"`, ... otherwise.
    pub fn key(&self) -> String {
        match self {
            VolumeSlot::Root => "0".to_string(),
            VolumeSlot::Additional(n) => n.to_string(),
        }
    }
}

/// Root volume plus additional volumes in argument order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VolumeSet {
    pub root: Option<VolumeTemplate>,
    pub additional: Vec<VolumeTemplate>,
}

impl VolumeSet {
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.additional.is_empty()
    }

    /// Every template with its slot, root first.
    pub fn iter(&self) -> impl Iterator<Item = (VolumeSlot, &VolumeTemplate)> {
        self.root
            .iter()
            .map(|t| (VolumeSlot::Root, t))
            .chain(
                self.additional
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (VolumeSlot::Additional(i + 1), t)),
            )
    }

    pub fn get(&self, slot: VolumeSlot) -> Option<&VolumeTemplate> {
        match slot {
            VolumeSlot::Root => self.root.as_ref(),
            VolumeSlot::Additional(0) => None,
            VolumeSlot::Additional(n) => self.additional.get(n - 1),
        }
    }

    /// Sum of the sizes of every local volume in the set, saturating at
    /// `u64::MAX`.
    pub fn local_size_bytes(&self) -> u64 {
        self.iter()
            .filter(|(_, t)| t.is_local())
            .filter_map(|(_, t)| t.size_bytes)
            .fold(0u64, u64::saturating_add)
    }

    /// Keyed map sent as the `volumes` field of the create-server request.
    ///
    /// Every volume is named `<server>-<key>`; an existing volume keeps only
    /// `{id, name}` and a new root volume only its size.
    pub fn to_request_map(&self, server_name: &str) -> BTreeMap<String, VolumeTemplate> {
        let mut map = BTreeMap::new();
        for (slot, template) in self.iter() {
            let key = slot.key();
            let mut template = template.clone();
            template.name = Some(format!("{}-{}", server_name, key));

            let template = if template.is_existing() {
                template.strip_to_reference()
            } else if slot == VolumeSlot::Root && template.size_bytes.unwrap_or(0) != 0 {
                VolumeTemplate {
                    size_bytes: template.size_bytes,
                    ..Default::default()
                }
            } else {
                template
            };
            map.insert(key, template);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(id: &str, name: &str) -> VolumeTemplate {
        VolumeTemplate {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn slots_are_keyed_without_gaps() {
        let set = VolumeSet {
            root: Some(VolumeTemplate::new_volume(StorageClass::Local, 20, None)),
            additional: vec![
                VolumeTemplate::new_volume(StorageClass::Block, 50, None),
                existing("vol-1", "web-2"),
            ],
        };
        let keys: Vec<String> = set.iter().map(|(slot, _)| slot.key()).collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
        assert!(set.get(VolumeSlot::Additional(3)).is_none());
        assert!(set.get(VolumeSlot::Additional(0)).is_none());
    }

    #[test]
    fn local_size_ignores_block_and_stripped_volumes() {
        let set = VolumeSet {
            root: Some(VolumeTemplate::new_volume(StorageClass::Local, 20, None)),
            additional: vec![
                VolumeTemplate::new_volume(StorageClass::Block, 50, None),
                VolumeTemplate::new_volume(StorageClass::Local, 30, None),
                existing("vol-1", "web-3"),
            ],
        };
        assert_eq!(set.local_size_bytes(), 50);
    }

    #[test]
    fn local_size_saturates() {
        let set = VolumeSet {
            root: Some(VolumeTemplate::new_volume(StorageClass::Local, u64::MAX - 1, None)),
            additional: vec![VolumeTemplate::new_volume(StorageClass::Local, 10, None)],
        };
        assert_eq!(set.local_size_bytes(), u64::MAX);
    }

    #[test]
    fn request_map_reduces_root_to_size() {
        let set = VolumeSet {
            root: Some(VolumeTemplate::new_volume(
                StorageClass::Local,
                20_000_000_000,
                None,
            )),
            additional: vec![VolumeTemplate::new_volume(
                StorageClass::Block,
                50,
                Some("org".into()),
            )],
        };
        let map = set.to_request_map("web");
        assert_eq!(
            serde_json::to_value(&map["0"]).unwrap(),
            serde_json::json!({"size": 20_000_000_000u64})
        );
        assert_eq!(
            serde_json::to_value(&map["1"]).unwrap(),
            serde_json::json!({
                "name": "web-1",
                "volume_type": "b_ssd",
                "size": 50,
                "organization": "org"
            })
        );
    }
}
