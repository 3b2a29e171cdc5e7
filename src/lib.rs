//! Server provisioning for the instance API.
//!
//! Turns a sparse description of a server (image label, `ip` keyword,
//! volume descriptors such as `l:20GB`) into a fully resolved creation
//! request, validates it against the constraints the API reports, then
//! creates the IP and the server, deleting the IP again when the server
//! cannot be created.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::ProvisionError;
