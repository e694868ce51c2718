//! Method selection
//!
//! Narrows a type's reflected methods down to the eligible set: public,
//! instance, declared directly on the type, and (when a filter is configured)
//! with a name matching the filter pattern. Declaration order is preserved.

use std::collections::HashSet;

use ir::{MethodDef, ReflectionProvider, Visibility};
use regex::Regex;

use crate::{Result, SemanticError};

/// Compiled method-name filter
#[derive(Debug, Clone)]
pub struct MethodFilter {
    pattern: Regex,
}

impl MethodFilter {
    /// Compile `pattern`; a malformed expression is reported immediately
    pub fn new(pattern: &str) -> Result<Self> { Ok(Self { pattern: Regex::new(pattern)? }) }

    /// Partial match semantics: anchors in the pattern decide how much must match
    pub fn matches(&self, method_name: &str) -> bool { self.pattern.is_match(method_name) }

    /// The source pattern
    pub fn as_str(&self) -> &str { self.pattern.as_str() }
}

/// Why a reflected method was left out of generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Not publicly visible
    NonPublic,
    /// Static rather than instance
    Static,
    /// Inherited from a base type
    Inherited,
    /// Name does not match the configured filter
    FilteredOut,
}

impl ExclusionReason {
    /// Short human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::NonPublic => "not public",
            ExclusionReason::Static => "static",
            ExclusionReason::Inherited => "inherited",
            ExclusionReason::FilteredOut => "filtered out",
        }
    }
}

/// Outcome of selecting methods from a type
#[derive(Debug, Clone, Default)]
pub struct SelectionReport {
    /// Methods to generate for, in declaration order
    pub eligible: Vec<MethodDef>,
    /// Methods left out, with the first rule that excluded them
    pub excluded: Vec<(String, ExclusionReason)>,
}

impl SelectionReport {
    /// Apply the eligibility rules to every method `target` reports
    pub fn build(target: &dyn ReflectionProvider, filter: Option<&MethodFilter>) -> Result<Self> {
        let mut report = SelectionReport::default();
        let mut seen = HashSet::new();

        for method in target.methods() {
            if let Some(reason) = exclusion_reason(method, filter) {
                report.excluded.push((method.name.clone(), reason));
                continue;
            }
            // Request and response types are named after the method, so overloads cannot coexist
            if !seen.insert(method.name.as_str()) {
                return Err(SemanticError::DuplicateMethod(method.name.clone()));
            }
            report.eligible.push(method.clone());
        }

        Ok(report)
    }

    /// Names of the eligible methods
    pub fn eligible_names(&self) -> Vec<&str> {
        self.eligible.iter().map(|m| m.name.as_str()).collect()
    }
}

fn exclusion_reason(method: &MethodDef, filter: Option<&MethodFilter>) -> Option<ExclusionReason> {
    if !method.is_declared_public_instance() {
        let reason = if method.visibility != Visibility::Public {
            ExclusionReason::NonPublic
        } else if method.is_static {
            ExclusionReason::Static
        } else {
            ExclusionReason::Inherited
        };
        return Some(reason);
    }
    match filter {
        Some(f) if !f.matches(&method.name) => Some(ExclusionReason::FilteredOut),
        _ => None,
    }
}

/// Select the eligible methods of `target`.
///
/// `filter` is compiled here, so an invalid pattern fails before anything is
/// built. An empty result is valid.
pub fn select_methods(
    target: &dyn ReflectionProvider,
    filter: Option<&str>,
) -> Result<Vec<MethodDef>> {
    let filter = filter.map(MethodFilter::new).transpose()?;
    Ok(SelectionReport::build(target, filter.as_ref())?.eligible)
}
