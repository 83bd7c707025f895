//! # protograph-base
//!
//! Linked, queryable graph of compiled protobuf schemas for code generators.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! visit       → Visitor trait, depth-first walk
//!   ↓
//! graph       → Graph, GraphBuilder, entity views, hydration, dependents
//!   ↓
//! options     → Raw option payloads, custom option decoding
//!   ↓
//! descriptor  → prost wire descriptors, source-code-info path tags
//!   ↓
//! diagnostics → Diagnostic, DiagnosticSink, codes
//!   ↓
//! config      → Plugin parameters
//!   ↓
//! base        → Primitives (EntityId, Span/Position)
//! ```

// ============================================================================
// MODULES (dependency order: base → config → diagnostics → descriptor → options → graph → visit)
// ============================================================================

/// Foundation types: EntityId, Span, Position
pub mod base;

/// Plugin parameter parsing
pub mod config;

/// Diagnostics: Diagnostic, DiagnosticSink, codes
pub mod diagnostics;

/// Error types
pub mod error;

/// Wire descriptors: FileDescriptorProto, CodeGeneratorRequest, path tags
pub mod descriptor;

/// Option payloads and custom option decoding
pub mod options;

/// The entity graph and its builder
pub mod graph;

/// Depth-first traversal
pub mod visit;

// Re-export foundation types
pub use base::{EntityId, Position, Span};

pub use config::Parameters;
pub use descriptor::{CodeGeneratorRequest, FileDescriptorProto, FileDescriptorSet, decode_descriptor_set, decode_request};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticSink, Severity, TracingSink};
pub use error::{GraphError, OptionError, ParameterError};
pub use graph::{
    AnyEntity, Entity, EntityKind, Graph, GraphBuilder, Syntax, get_dependents, process_code_generator_request,
    process_file_descriptor_set,
};
pub use options::{OptionPayload, OptionsKind};
pub use visit::{Visitor, Walk, walk, walk_optional, walk_package};
