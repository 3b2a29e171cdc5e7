/// Error types for server provisioning
use bytesize::ByteSize;
use thiserror::Error;

use crate::api::ApiError;

const VOLUME_FORMAT_HINT: &str = r#"You must provide either a UUID ("11111111-1111-1111-1111-111111111111"), a local volume size ("local:100G" or "l:100G") or a block volume size ("block:100G" or "b:100G")."#;

const IP_ARGUMENT_HINT: &str =
    "The ip argument must be 'new', 'dynamic', 'none', an IP address ID or a reserved flexible IP address.";

const BOOTSCRIPT_HINT: &str = "Leave bootscript-id empty to boot from the local root volume.";

/// Everything that can stop a server from being provisioned.
///
/// Input and constraint errors are raised before any mutating remote call,
/// so nothing has to be rolled back when they occur.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Invalid volume type {kind} in {descriptor} volume.")]
    InvalidVolumeType { kind: String, descriptor: String },

    #[error("Invalid size format {size} in {descriptor} volume.")]
    InvalidSizeFormat { size: String, descriptor: String },

    #[error("invalid volume format '{0}'")]
    InvalidVolumeFormat(String),

    #[error("Volume {0} does not exist.")]
    VolumeNotFound(String),

    #[error("Volume {volume_id} is already attached to {server_id} server.")]
    VolumeAlreadyAttached { volume_id: String, server_id: String },

    /// Failure of the additional volume at `index` (0-based position in the
    /// argument list).
    #[error("additional volume {index}: {source}")]
    Volume {
        index: usize,
        #[source]
        source: Box<ProvisionError>,
    },

    #[error("First volume must be local.")]
    RootVolumeMustBeLocal,

    #[error("First volume size must be at least {} for this image.", display_bytes(.min_bytes))]
    RootVolumeTooSmall { min_bytes: u64 },

    #[error("You cannot use an existing volume as a root volume. You must create an image of this volume and use its ID in the 'image' argument.")]
    RootVolumeCannotBeExisting,

    #[error("{}", local_size_message(.commercial_type, .min_bytes, .max_bytes))]
    LocalVolumeSizeOutOfRange {
        commercial_type: String,
        min_bytes: u64,
        max_bytes: u64,
    },

    #[error("Bad image label '{label}' for {commercial_type}.")]
    UnknownImageLabel { label: String, commercial_type: String },

    #[error("{0} does not belong to you.")]
    IpNotOwned(String),

    #[error(r#"Invalid IP "{0}", should be either 'new', 'dynamic', 'none', an IP address ID or a reserved flexible IP address."#)]
    InvalidIpArgument(String),

    #[error("Bootscript ID {0} is not a valid UUID.")]
    InvalidBootscriptId(String),

    #[error("Bootscript ID {0} does not exist.")]
    BootscriptNotFound(String),

    #[error("Error while creating your public IP: {0}.")]
    IpCreationFailed(#[source] ApiError),

    #[error("Cannot create the server: {0}.")]
    ServerCreationFailed(#[source] ApiError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl ProvisionError {
    /// Usage hint for errors caused by malformed user input.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ProvisionError::InvalidVolumeFormat(_)
            | ProvisionError::InvalidVolumeType { .. }
            | ProvisionError::InvalidSizeFormat { .. } => Some(VOLUME_FORMAT_HINT),
            ProvisionError::InvalidIpArgument(_) => Some(IP_ARGUMENT_HINT),
            ProvisionError::InvalidBootscriptId(_) => Some(BOOTSCRIPT_HINT),
            ProvisionError::Volume { source, .. } => source.hint(),
            _ => None,
        }
    }

    /// Tag a volume error with the position of the offending descriptor.
    pub fn at_volume(self, index: usize) -> Self {
        ProvisionError::Volume {
            index,
            source: Box::new(self),
        }
    }
}

fn display_bytes(bytes: &u64) -> String {
    ByteSize(*bytes).to_string()
}

fn local_size_message(commercial_type: &str, min_bytes: &u64, max_bytes: &u64) -> String {
    let min = display_bytes(min_bytes);
    if min_bytes == max_bytes {
        return format!(
            "{} total local volume size must be equal to {}.",
            commercial_type, min
        );
    }
    format!(
        "{} total local volume size must be between {} and {}.",
        commercial_type,
        min,
        display_bytes(max_bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_message_collapses_when_bounds_match() {
        let err = ProvisionError::LocalVolumeSizeOutOfRange {
            commercial_type: "DEV1-S".into(),
            min_bytes: 20_000_000_000,
            max_bytes: 20_000_000_000,
        };
        assert_eq!(
            err.to_string(),
            "DEV1-S total local volume size must be equal to 20.0 GB."
        );
    }

    #[test]
    fn range_message_lists_both_bounds() {
        let err = ProvisionError::LocalVolumeSizeOutOfRange {
            commercial_type: "GP1-XS".into(),
            min_bytes: 20_000_000_000,
            max_bytes: 100_000_000_000,
        };
        assert_eq!(
            err.to_string(),
            "GP1-XS total local volume size must be between 20.0 GB and 100.0 GB."
        );
    }

    #[test]
    fn volume_index_keeps_inner_hint() {
        let err = ProvisionError::InvalidVolumeFormat("x:y:z".into()).at_volume(2);
        assert!(err.to_string().starts_with("additional volume 2:"));
        assert_eq!(err.hint(), Some(VOLUME_FORMAT_HINT));
    }
}
