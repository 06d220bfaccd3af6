//! Error types for delta update operations.
//!
//! Two layers of errors exist:
//!
//! - [`ConnectorError`] is raised by connector implementations (the SPI side).
//! - [`UpdateError`] is returned by the engine. Rejections discovered by the
//!   engine itself carry a specific kind, while connector failures pass through
//!   [`UpdateError::Connector`] unchanged.

/// Main error type for delta update operations.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Malformed input rejected before any connector call
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The delta set carries a value the operation does not accept
    #[error("Invalid attribute value: {message}")]
    InvalidAttributeValue { message: String },

    /// No update capability is available, or the object class is not updatable
    #[error("Unsupported operation: {message}")]
    UnsupportedOperation { message: String },

    /// The object to read before writing does not exist
    #[error("Object with uid '{uid}' and object class '{object_class}' does not exist")]
    UnknownUid { uid: String, object_class: String },

    /// Error raised by the connector, passed through as-is
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl UpdateError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid attribute value error
    pub fn invalid_attribute_value(message: impl Into<String>) -> Self {
        Self::InvalidAttributeValue {
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            message: message.into(),
        }
    }

    /// Create an unknown uid error
    pub fn unknown_uid(uid: impl Into<String>, object_class: impl Into<String>) -> Self {
        Self::UnknownUid {
            uid: uid.into(),
            object_class: object_class.into(),
        }
    }

    /// Whether the error originated in the connector rather than the engine.
    pub fn is_connector_error(&self) -> bool {
        matches!(self, Self::Connector(_))
    }
}

/// Errors raised by connector implementations.
///
/// The variants mirror the failure conditions a provisioning target commonly
/// reports. Connectors that need something more specific use
/// [`ConnectorError::Other`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Object with uid '{uid}' does not exist in object class '{object_class}'")]
    UnknownUid {
        /// The uid that could not be resolved
        uid: String,
        /// The object class that was searched
        object_class: String,
    },

    #[error("Object '{name}' already exists in object class '{object_class}'")]
    AlreadyExists {
        /// The conflicting name or uid
        name: String,
        /// The object class of the conflict
        object_class: String,
    },

    #[error("Invalid value for attribute '{attribute}': {message}")]
    InvalidAttributeValue {
        /// The attribute that was rejected
        attribute: String,
        /// Description of the rejection
        message: String,
    },

    #[error("Invalid account: {message}")]
    InvalidAccount {
        /// Description of what made the account invalid
        message: String,
    },

    #[error("Account is locked: {message}")]
    AccountLocked {
        /// Description of the lock
        message: String,
    },

    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Description of the denied action
        message: String,
    },

    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure
        message: String,
    },

    #[error("Operation timed out: {message}")]
    OperationTimeout {
        /// Description of the timed out operation
        message: String,
    },

    #[error("Connector error: {message}")]
    Other {
        /// Description of the failure
        message: String,
    },
}

impl ConnectorError {
    /// Create an unknown uid error
    pub fn unknown_uid(uid: impl Into<String>, object_class: impl Into<String>) -> Self {
        Self::UnknownUid {
            uid: uid.into(),
            object_class: object_class.into(),
        }
    }

    /// Create an invalid attribute value error
    pub fn invalid_attribute_value(
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttributeValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a generic connector error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<String> for ConnectorError {
    fn from(message: String) -> Self {
        ConnectorError::Other { message }
    }
}

// Result type aliases for convenience
pub type UpdateResult<T> = Result<T, UpdateError>;
pub type ConnectorResult<T> = Result<T, ConnectorError>;
