//! Search results and availability explanations
//!
//! Not finding a toolchain is an expected outcome: a build disables the
//! variants it cannot compile. Those outcomes carry an [`Explanation`] instead
//! of an error.

use std::fmt;
use std::sync::Arc;

use crate::core::install::ToolchainInstall;

/// Ordered, human-readable reasons something is unavailable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    reasons: Vec<String>,
}

impl Explanation {
    /// Explanation with a single reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }

    /// Append a reason
    pub fn push(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Append every reason of another explanation
    pub fn extend(&mut self, other: &Explanation) {
        self.reasons.extend(other.reasons.iter().cloned());
    }

    /// Reasons, in the order they were recorded
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Whether no reason was recorded
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reason) in self.reasons.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {reason}")?;
        }
        Ok(())
    }
}

/// Outcome of a locate operation
#[derive(Debug, Clone)]
pub enum SearchResult {
    /// A usable install
    Found(Arc<ToolchainInstall>),
    /// Nothing usable, with the reason
    NotFound(Explanation),
}

impl SearchResult {
    /// Not found, for a single reason
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound(Explanation::new(reason))
    }

    /// Whether an install was found
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The install, if found
    pub fn install(&self) -> Option<&Arc<ToolchainInstall>> {
        match self {
            Self::Found(install) => Some(install),
            Self::NotFound(_) => None,
        }
    }

    /// Why nothing was found; `None` for `Found`
    pub fn explanation(&self) -> Option<&Explanation> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(explanation) => Some(explanation),
        }
    }
}

/// Accumulates every reason a tool chain cannot serve a request
#[derive(Debug, Clone, Default)]
pub struct Availability {
    explanation: Explanation,
}

impl Availability {
    /// Available until a reason is recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason
    pub fn unavailable(&mut self, reason: impl Into<String>) {
        self.explanation.push(reason);
    }

    /// Record the reasons of a failed search, if any
    pub fn must_be_available(&mut self, result: &SearchResult) {
        if let SearchResult::NotFound(explanation) = result {
            self.explanation.extend(explanation);
        }
    }

    /// Carry over the reasons of another availability check
    pub fn must_be_available_from(&mut self, other: &Availability) {
        self.explanation.extend(&other.explanation);
    }

    /// Whether no reason was recorded
    pub fn is_available(&self) -> bool {
        self.explanation.is_empty()
    }

    /// Recorded reasons
    pub fn explanation(&self) -> &Explanation {
        &self.explanation
    }
}
