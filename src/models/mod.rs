pub mod image;
pub mod ip;
pub mod server;
pub mod server_type;
pub mod volume;

pub use image::{Image, ImageRootVolume, MarketplaceImage, MarketplaceLocalImage, MarketplaceVersion};
pub use ip::{FlexibleIp, IpDirective};
pub use server::{CreateServerRequest, CreationIntent, ServerRecord};
pub use server_type::{ServerType, VolumeConstraint};
pub use volume::{AttachedServer, StorageClass, Volume, VolumeDescriptor, VolumeSet, VolumeSlot, VolumeTemplate};
