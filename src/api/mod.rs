// Atomic API modules
pub mod client;
pub mod compute;
pub mod error;
pub mod marketplace;
pub mod ips;
pub mod volumes;
pub mod server_types;
pub mod images;
pub mod bootscripts;
pub mod servers;

// Re-export commonly used items
pub use client::{api_call, set_silent};
pub use compute::{ComputeApi, HttpComputeApi};
pub use error::ApiError;
