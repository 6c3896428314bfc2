//! courtside-api — Portal persistence integrations.
//!
//! Implements the core's `PortalApi` trait over the portal's HTTP backend,
//! plus an in-memory mock for tests and offline use.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;

pub use client::PortalClient;
pub use config::{create_portal, load_config, load_config_from, CourtsideConfig};
pub use error::PortalError;
pub use mock::MockPortal;
