pub mod cabling;
pub mod catalog;
pub mod config;
pub mod configs;
pub mod cost;
pub mod design;
pub mod ipam;
pub mod models;
pub mod topology;
pub mod utils;

pub use design::{generate, InvariantViolation};
pub use ipam::BaseNetwork;
pub use models::{Design, DesignRequest, ValidationError};
