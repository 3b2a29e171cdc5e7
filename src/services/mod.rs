pub mod autocomplete;
pub mod best_effort;
pub mod constraints;
pub mod image_resolver;
pub mod ip_resolver;
pub mod server_create;
pub mod volume_resolver;
pub mod volume_set;
pub mod volume_spec;

// Re-export commonly used functions
pub use autocomplete::complete_image_label;
pub use best_effort::best_effort;
pub use constraints::{validate_local_volume_sizes, validate_root_volume, ValidationOutcome};
pub use image_resolver::resolve_image;
pub use ip_resolver::resolve_ip;
pub use server_create::{
    create_server, execute_creation, resolve_creation_intent, CreateServerArgs, ProvisionSettings, Stage,
};
pub use volume_resolver::resolve_existing_volume;
pub use volume_set::{build_volume_set, build_volume_template};
pub use volume_spec::parse_volume_descriptor;
