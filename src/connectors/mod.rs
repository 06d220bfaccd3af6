//! Connector implementations shipped with the crate.
//!
//! - [`InMemoryConnector`] keeps objects in process memory and can be set to
//!   advertise any one of the update tiers. Intended for development and
//!   testing.

pub mod in_memory;

pub use in_memory::{InMemoryConnector, InMemoryConnectorStats, UpdateMode};
