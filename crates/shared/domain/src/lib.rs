//! # Domain Models
//!
//! Plain data shared by every crate of the registry: issuer and account records,
//! configuration sections and the feature slice registry.
//! Keep it lean: `serde` and `chrono` only, no I/O or business rules.

pub mod config;
pub mod constants;
pub mod records;
pub mod slices;
