use bytesize::ByteSize;

use crate::error::ProvisionError;
use crate::models::{StorageClass, VolumeDescriptor};
use crate::utils::is_uuid;

/// Parse one volume descriptor.
///
/// Accepted forms:
/// - `<class>:<size>` where class is `l`, `local`, `b` or `block` and size is
///   a human readable byte size (`20GB`, `100G`),
/// - a volume UUID.
pub fn parse_volume_descriptor(raw: &str) -> Result<VolumeDescriptor, ProvisionError> {
    let descriptor = raw.trim();
    let parts: Vec<&str> = descriptor.split(':').collect();

    match parts.as_slice() {
        [kind, size] => {
            let storage_class =
                StorageClass::from_token(kind).ok_or_else(|| ProvisionError::InvalidVolumeType {
                    kind: kind.to_string(),
                    descriptor: descriptor.to_string(),
                })?;
            let size_bytes = size
                .trim()
                .parse::<ByteSize>()
                .map(|b| b.as_u64())
                .map_err(|_| ProvisionError::InvalidSizeFormat {
                    size: size.to_string(),
                    descriptor: descriptor.to_string(),
                })?;
            Ok(VolumeDescriptor::NewVolume {
                storage_class,
                size_bytes,
            })
        }
        [id] if is_uuid(id) => Ok(VolumeDescriptor::ExistingVolume { id: id.to_string() }),
        _ => Err(ProvisionError::InvalidVolumeFormat(descriptor.to_string())),
    }
}
