use serde::{Deserialize, Serialize};

use crate::scene::NodeId;

/// Severity of a diagnostic message.
///
/// Warnings go to [`crate::SceneGraph::warn`], errors to
/// [`crate::SceneGraph::fail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A condition reported by a placer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: String) -> Self {
        Self {
            severity,
            message,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message.into())
    }
}

/// What a placement call produced.
///
/// An empty `nodes` list with warnings means "nothing to do", not failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementOutcome {
    /// Created nodes in placement order.
    pub nodes: Vec<NodeId>,
    /// Non-fatal conditions encountered along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl PlacementOutcome {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Messages of all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| d.message.as_str())
    }
}
