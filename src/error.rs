//! Error types for graph construction, option decoding and configuration.

use thiserror::Error;

use crate::diagnostics::codes;

/// Structural errors found while building a graph.
///
/// These are never returned from the builder directly: they are converted
/// into [`Diagnostic`](crate::diagnostics::Diagnostic)s and handed to the
/// injected [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) so that
/// construction can carry on and surface every problem in one run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two entities resolved to the same fully-qualified name.
    #[error("duplicate entity name: {fqn}")]
    DuplicateName { fqn: String },

    /// A field, extension or method references a type that was never loaded.
    #[error("unresolved type reference `{type_name}` on {referrer}")]
    UnresolvedType { referrer: String, type_name: String },

    /// Legacy group fields are not modeled.
    #[error("group field {field} is not supported")]
    UnsupportedGroup { field: String },

    /// A file imports a file that is not part of the batch.
    #[error("dependency `{dependency}` of {file} was not loaded before it")]
    MissingDependency { file: String, dependency: String },

    /// An entity was declared but never registered.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The descriptor is structurally invalid (bad indexes, empty names, ...).
    #[error("malformed descriptor: {0}")]
    Malformed(String),

    /// The serialized input could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl GraphError {
    /// Diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => codes::DUPLICATE_NAME,
            Self::UnresolvedType { .. } => codes::UNRESOLVED_TYPE,
            Self::UnsupportedGroup { .. } => codes::UNSUPPORTED_GROUP,
            Self::MissingDependency { .. } => codes::MISSING_DEPENDENCY,
            Self::UnknownEntity(_) => codes::UNKNOWN_ENTITY,
            Self::Malformed(_) | Self::Decode(_) => codes::MALFORMED_DESCRIPTOR,
        }
    }

    /// Create a malformed descriptor error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<prost::DecodeError> for GraphError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors returned by the option decoder to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// The option is present but encoded with a different wire type than the
    /// extension declares.
    #[error("option {name} (field {number}) has wire type {found:?}, expected {expected:?}")]
    WireTypeMismatch {
        name: &'static str,
        number: u32,
        expected: prost::encoding::WireType,
        found: prost::encoding::WireType,
    },

    /// The extension extends a different options message than the entity carries.
    #[error("option {name} extends {expected} but the entity carries {found}")]
    ExtendeeMismatch {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The payload is not a valid protobuf encoding.
    #[error("cannot decode option {name}: {message}")]
    Decode { name: &'static str, message: String },
}

/// Errors raised while reading plugin parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// A parameter holds a value that does not parse as the requested type.
    #[error("parameter `{key}` has invalid {kind} value `{value}`")]
    InvalidValue {
        key: String,
        kind: &'static str,
        value: String,
    },
}
