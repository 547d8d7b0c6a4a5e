//! Domain layer containing business entities and data access contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits define contracts implemented by the
//! infrastructure layer.

pub mod entities;
pub mod repositories;
