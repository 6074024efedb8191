//! The eligibility engine: evaluates a requirement tree against a profile.
//!
//! Evaluation is a pure, single-pass, synchronous walk: identical inputs
//! always produce identical results, nothing is mutated, and no anomaly in
//! the input tree raises an error. Malformed or unevaluable nodes degrade
//! to "unmet, with diagnostic detail" so an eligibility check can never
//! take down a page render.

mod collector;
mod evaluator;

/// Evaluation output types.
pub mod outcome;
pub use outcome::{
    EligibilityResult, EvaluatedNode, MissingCourse, MissingCredits, MissingLanguage, NodeOutcome,
};

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::{AcademicProfile, Requirement};

/// Default recursion depth ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Default budget for the total number of nodes visited in one evaluation.
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// How the evaluator guards against repeated course references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Scope the visited set to the current recursion path. The same course
    /// referenced in unrelated branches evaluates independently.
    #[default]
    PerPath,

    /// Share one visited set across the whole traversal: any repeat of a
    /// course id is reported as a circular dependency. This reproduces the
    /// legacy engine's behaviour, false positives included, for callers
    /// that depend on it.
    Global,
}

/// Defensive limits applied during evaluation.
///
/// Requirement trees are external input and not guaranteed well-formed, so
/// the evaluator bounds its own work instead of trusting the tree: nodes
/// past the depth ceiling or the node budget are reported unmet with a
/// truncation detail rather than evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum recursion depth; the root sits at depth zero.
    pub max_depth: usize,
    /// Maximum number of nodes visited in one evaluation. Bounds total work
    /// on wide-but-shallow trees that the depth ceiling alone would not
    /// catch.
    pub max_nodes: usize,
    /// The cycle-guard policy.
    pub cycle_policy: CyclePolicy,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            cycle_policy: CyclePolicy::default(),
        }
    }
}

/// Evaluates a requirement tree against an academic profile.
///
/// Equivalent to [`evaluate_with_limits`] with [`Limits::default`].
#[must_use]
pub fn evaluate(requirement: &Requirement, profile: &AcademicProfile) -> EligibilityResult {
    evaluate_with_limits(requirement, profile, &Limits::default())
}

/// Evaluates a requirement tree against an academic profile with explicit
/// limits.
///
/// The result carries the root's satisfaction, the flat missing-item
/// buckets, the labels of all satisfied nodes, and the full annotated tree.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn evaluate_with_limits(
    requirement: &Requirement,
    profile: &AcademicProfile,
    limits: &Limits,
) -> EligibilityResult {
    let tree = evaluator::Evaluator::new(profile, limits).evaluate(requirement);
    let collected = collector::collect(&tree);

    debug!(
        eligible = tree.met,
        missing_courses = collected.missing_courses.len(),
        "evaluated requirement tree"
    );

    EligibilityResult {
        eligible: tree.met,
        missing_courses: collected.missing_courses,
        missing_credits: collected.missing_credits,
        missing_topics: collected.missing_topics,
        missing_languages: collected.missing_languages,
        satisfied_requirements: collected.satisfied_requirements,
        evaluation_tree: tree,
    }
}

/// Evaluates one profile against many requirement trees in parallel.
///
/// Evaluation is pure and shares no state between calls, so trees are
/// checked concurrently. Results are returned in input order. Useful for
/// study-plan views that check every course in a catalogue at once.
#[must_use]
pub fn evaluate_all(
    requirements: &[Requirement],
    profile: &AcademicProfile,
) -> Vec<EligibilityResult> {
    requirements
        .par_iter()
        .map(|requirement| evaluate(requirement, profile))
        .collect()
}
