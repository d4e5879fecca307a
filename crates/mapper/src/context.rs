//! Traversal context threaded through every mapper call.
//!
//! A context is created per top-level call, moved into each hook and
//! handed back with the hook's result. It never owns any part of the
//! tree being mapped.

use std::fmt;

use recnorm_core::FieldPath;
use serde::Serialize;

/// Category of a non-fatal anomaly found while mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The value's runtime shape does not match the declared type.
    ShapeMismatch,
    /// A temporal payload could not be parsed in the form its type
    /// promises.
    UnparseableTemporal,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ShapeMismatch => f.write_str("shape_mismatch"),
            DiagnosticKind::UnparseableTemporal => f.write_str("unparseable_temporal"),
        }
    }
}

/// A non-fatal anomaly. The node it describes was passed through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Rendered path of the node, e.g. `$.orders[0].placed_at`.
    pub path: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.path, self.message)
    }
}

/// Current position plus the anomalies collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapContext {
    path: FieldPath,
    diagnostics: Vec<Diagnostic>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn enter_field(mut self, name: &str) -> Self {
        self.path.push_field(name);
        self
    }

    pub fn enter_index(mut self, index: usize) -> Self {
        self.path.push_index(index);
        self
    }

    /// Undo the matching `enter_*` call.
    pub fn leave(mut self) -> Self {
        self.path.pop();
        self
    }

    /// Record an anomaly at the current path and emit it as a warning.
    pub fn report(mut self, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let diagnostic = Diagnostic {
            path: self.path.to_string(),
            kind,
            message: message.into(),
        };
        tracing::warn!(
            path = %diagnostic.path,
            kind = %diagnostic.kind,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
        self
    }
}
