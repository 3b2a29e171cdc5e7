use crate::api::ComputeApi;
use crate::error::ProvisionError;
use crate::models::{VolumeSet, VolumeTemplate};

/// Result of an advisory pre-check.
///
/// `Skipped` means the data needed for the check was unavailable; the API
/// still enforces the constraint itself when the server is created.
#[derive(Debug)]
pub enum ValidationOutcome {
    Passed,
    Skipped(String),
    Failed(ProvisionError),
}

impl ValidationOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationOutcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ValidationOutcome::Skipped(_))
    }

    /// Log a skip and turn a failure into an error.
    pub fn into_result(self, check: &str) -> Result<(), ProvisionError> {
        match self {
            ValidationOutcome::Passed => Ok(()),
            ValidationOutcome::Skipped(reason) => {
                tracing::warn!("{}", reason);
                tracing::warn!("skip {}", check);
                Ok(())
            }
            ValidationOutcome::Failed(err) => Err(err),
        }
    }
}

/// The root volume must be a new local volume at least as large as the
/// image's own root volume.
pub async fn validate_root_volume(
    api: &dyn ComputeApi,
    zone: &str,
    image_id: &str,
    root: Option<&VolumeTemplate>,
) -> ValidationOutcome {
    let Some(root) = root else {
        return ValidationOutcome::Passed;
    };

    if root.is_existing() {
        return ValidationOutcome::Failed(ProvisionError::RootVolumeCannotBeExisting);
    }
    if !root.is_local() {
        return ValidationOutcome::Failed(ProvisionError::RootVolumeMustBeLocal);
    }

    let image = match api.get_image(zone, image_id).await {
        Ok(image) => image,
        Err(e) => return ValidationOutcome::Skipped(format!("cannot get image {}: {}", image_id, e)),
    };

    let min_bytes = image.root_volume_size_bytes();
    if root.size_bytes.unwrap_or(0) < min_bytes {
        return ValidationOutcome::Failed(ProvisionError::RootVolumeTooSmall { min_bytes });
    }
    ValidationOutcome::Passed
}

/// The total size of local volumes must fit the commercial type's bounds.
///
/// Without a root volume the API adds one on its own; its size is
/// `default_root_size` when configured, the type's minimum otherwise.
pub async fn validate_local_volume_sizes(
    api: &dyn ComputeApi,
    zone: &str,
    commercial_type: &str,
    volumes: &VolumeSet,
    default_root_size: Option<u64>,
) -> ValidationOutcome {
    let constraints = match api.list_server_type_constraints(zone).await {
        Ok(c) => c,
        Err(e) => return ValidationOutcome::Skipped(format!("cannot get server types: {}", e)),
    };

    let Some(constraint) = constraints.get(commercial_type) else {
        return ValidationOutcome::Skipped(format!("unrecognized server type: {}", commercial_type));
    };

    let mut total = volumes.local_size_bytes();
    if volumes.root.is_none() {
        total = total.saturating_add(default_root_size.unwrap_or(constraint.min_bytes));
    }
    tracing::debug!(
        "{} local volumes total {} bytes (allowed {}..={})",
        commercial_type,
        total,
        constraint.min_bytes,
        constraint.max_bytes
    );

    if !constraint.contains(total) {
        return ValidationOutcome::Failed(ProvisionError::LocalVolumeSizeOutOfRange {
            commercial_type: commercial_type.to_string(),
            min_bytes: constraint.min_bytes,
            max_bytes: constraint.max_bytes,
        });
    }
    ValidationOutcome::Passed
}
