//! # Core Module
//!
//! Shared-ownership primitives used by the rest of the crate.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking,
//!   used for the world's chunks

/// Shared handle with read-write locking.
pub mod mt_resource;

pub use mt_resource::MtResource;
