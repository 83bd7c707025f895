//! Diagnostics: construction error reporting.
//!
//! The graph builder never returns a single error for a batch. Every problem is
//! turned into a [`Diagnostic`] and handed to a [`DiagnosticSink`] supplied by
//! the embedding host. Building continues after a diagnostic so that several
//! problems surface in one run; the host must check [`DiagnosticSink::failed`]
//! afterwards and must not trust the returned graph when it is set.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::GraphError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic message attached to a graph location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0101").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Input path of the file being processed, when known.
    pub file: Option<Arc<str>>,
    /// Fully-qualified name of the entity the diagnostic is about.
    pub entity: Option<Arc<str>>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            file: None,
            entity: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message)
        }
    }

    /// Create a new informational diagnostic.
    pub fn info(message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Info,
            ..Self::error(message)
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the file the diagnostic was raised in.
    pub fn with_file(mut self, file: impl Into<Arc<str>>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the entity the diagnostic is about.
    pub fn with_entity(mut self, entity: impl Into<Arc<str>>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<GraphError> for Diagnostic {
    fn from(err: GraphError) -> Self {
        let code = err.code();
        Diagnostic::error(err.to_string()).with_code(code)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0101-E0199**: Graph construction errors
pub mod codes {
    /// Two entities share a fully-qualified name.
    pub const DUPLICATE_NAME: &str = "E0101";
    /// A type reference does not resolve.
    pub const UNRESOLVED_TYPE: &str = "E0102";
    /// Legacy group field.
    pub const UNSUPPORTED_GROUP: &str = "E0103";
    /// A declared import was not loaded.
    pub const MISSING_DEPENDENCY: &str = "E0104";
    /// An entity was required but never seen.
    pub const UNKNOWN_ENTITY: &str = "E0105";
    /// Malformed or undecodable input.
    pub const MALFORMED_DESCRIPTOR: &str = "E0106";
}

// ============================================================================
// SINKS
// ============================================================================

/// Capability the builder reports through, supplied by the embedding host.
pub trait DiagnosticSink {
    /// Record a diagnostic. Error diagnostics flag the sink as failed.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Whether any error diagnostic has been reported.
    fn failed(&self) -> bool;
}

/// Collects diagnostics in memory.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics carrying a specific code.
    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code.as_deref() == Some(code))
            .collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }

    fn failed(&self) -> bool {
        self.has_errors()
    }
}

/// Forwards diagnostics to `tracing` and remembers whether one was an error.
///
/// This is the sink a plugin binary would normally inject: messages end up in
/// whatever subscriber the host installed.
#[derive(Clone, Debug, Default)]
pub struct TracingSink {
    failed: bool,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code.as_deref().unwrap_or("-");
        let file = diagnostic.file.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Error => {
                self.failed = true;
                error!(code, file, "{}", diagnostic.message);
            }
            Severity::Warning => warn!(code, file, "{}", diagnostic.message),
            Severity::Info => info!(code, file, "{}", diagnostic.message),
        }
    }

    fn failed(&self) -> bool {
        self.failed
    }
}
