//! Delta update engine for identity connectors.
//!
//! Applies attribute deltas (add, remove or replace values of one attribute)
//! to objects held by a connector, whatever update operations that connector
//! actually implements. Connectors that understand deltas get them as-is;
//! connectors that only replace whole value sets, or only replace attributes
//! after a read, are driven through an equivalent sequence of calls.
//!
//! # Core Components
//!
//! - [`UpdateDeltaEngine`] - Validates, normalizes and dispatches delta updates
//! - [`Connector`] - Trait through which a connector advertises its operations
//! - [`AttributeNormalizer`] - Canonicalization of uids and attribute values
//! - [`InMemoryConnector`] - Reference connector for development and testing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use connector_delta::{Attribute, AttributeDelta, InMemoryConnector, ObjectClass, UpdateDeltaEngine};
//! use connector_delta::connectors::UpdateMode;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = InMemoryConnector::new(UpdateMode::ValueSet);
//! let uid = connector
//!     .create(&ObjectClass::account(), vec![Attribute::single("__NAME__", "jdoe")])
//!     .await?;
//!
//! let engine = UpdateDeltaEngine::new(connector);
//! let side_effects = engine
//!     .update_delta(
//!         &ObjectClass::account(),
//!         &uid,
//!         &[AttributeDelta::replace("__NAME__", vec![json!("john")])],
//!         None,
//!     )
//!     .await?;
//! println!("side effects: {:?}", side_effects);
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod connectors;
pub mod error;
pub mod objects;
pub mod spi;
pub mod update;

// Re-export commonly used types for convenience
pub use capabilities::{ConnectorCapabilities, UpdateTier, UpdateTierKind};
pub use connectors::InMemoryConnector;
pub use error::{ConnectorError, ConnectorResult, UpdateError, UpdateResult};
pub use objects::{
    Attribute, AttributeDelta, AttributeDeltaBuilder, ConnectorObject, ObjectClass,
    OperationOptions, OperationOptionsBuilder, OperationalAttributes, Uid,
};
pub use spi::{
    AttributeNormalizer, CaseInsensitiveNormalizer, Connector, GetOp, IdentityNormalizer,
    UpdateAttributeValuesOp, UpdateDeltaOp, UpdateOp,
};
pub use update::{UpdateDeltaEngine, UpdateDeltaEngineBuilder, UpdateEngineConfig};
