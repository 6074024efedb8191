//! The recursive requirement walker.

use std::collections::HashSet;

use crate::{
    domain::{AcademicProfile, LanguageLevel, Requirement, profile::ProfileIndex},
    engine::{
        CyclePolicy, Limits,
        outcome::{EvaluatedNode, NodeOutcome},
    },
};

/// One evaluation pass over a requirement tree.
///
/// Holds the per-call state: the profile lookup index, the configured
/// limits, the cycle-guard bookkeeping, and the running node count. Nothing
/// survives the call; every evaluation builds a fresh `Evaluator`.
pub struct Evaluator<'a> {
    profile: &'a AcademicProfile,
    index: ProfileIndex<'a>,
    limits: &'a Limits,
    /// Course ids seen anywhere in the traversal (`CyclePolicy::Global`).
    visited: HashSet<&'a str>,
    /// Course ids on the current recursion path (`CyclePolicy::PerPath`).
    path: Vec<&'a str>,
    nodes_seen: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(profile: &'a AcademicProfile, limits: &'a Limits) -> Self {
        Self {
            profile,
            index: profile.index(),
            limits,
            visited: HashSet::new(),
            path: Vec::new(),
            nodes_seen: 0,
        }
    }

    pub fn evaluate(&mut self, requirement: &'a Requirement) -> EvaluatedNode {
        self.evaluate_node(requirement, 0)
    }

    fn evaluate_node(&mut self, node: &'a Requirement, depth: usize) -> EvaluatedNode {
        self.nodes_seen += 1;

        if depth >= self.limits.max_depth {
            return self.truncated(
                node,
                format!(
                    "Requirement tree exceeds the maximum depth of {}; not evaluated",
                    self.limits.max_depth
                ),
            );
        }

        if self.nodes_seen > self.limits.max_nodes {
            return self.truncated(
                node,
                format!(
                    "Requirement tree exceeds the node budget of {}; not evaluated",
                    self.limits.max_nodes
                ),
            );
        }

        match node {
            Requirement::And { children, .. } => self.evaluate_group(node, children, depth, true),
            Requirement::Or { children, .. } => self.evaluate_group(node, children, depth, false),
            Requirement::Course {
                course_id,
                course_code,
                course_title,
                ..
            } => self.evaluate_course(node, course_id, course_code, course_title),
            Requirement::Credits { min_credits, .. } => self.evaluate_credits(node, *min_credits),
            Requirement::DomainCredits {
                domain,
                min_credits,
                ..
            } => self.evaluate_domain_credits(node, domain, *min_credits),
            Requirement::Topic { topic, .. } => self.evaluate_topic(node, topic),
            Requirement::Language {
                language, level, ..
            } => self.evaluate_language(node, language, level),
            Requirement::Custom { text, .. } => EvaluatedNode {
                met: false,
                label: node.label(),
                details: Some(format!("Manual review needed: {text}")),
                children: Vec::new(),
                outcome: NodeOutcome::ManualReview { text: text.clone() },
            },
            Requirement::Unknown { kind } => EvaluatedNode {
                met: false,
                label: node.label(),
                details: Some(format!("Unrecognized requirement type: {kind}")),
                children: Vec::new(),
                outcome: NodeOutcome::Unknown { tag: kind.clone() },
            },
        }
    }

    /// Evaluates an `AND`/`OR` group.
    ///
    /// Every child is evaluated even once the group's outcome is already
    /// decided, so the result tree reports all missing items in one pass
    /// rather than stopping at the first failure.
    fn evaluate_group(
        &mut self,
        node: &'a Requirement,
        children: &'a [Requirement],
        depth: usize,
        all: bool,
    ) -> EvaluatedNode {
        let evaluated: Vec<EvaluatedNode> = children
            .iter()
            .map(|child| self.evaluate_node(child, depth + 1))
            .collect();

        let met = if all {
            evaluated.iter().all(|child| child.met)
        } else {
            evaluated.iter().any(|child| child.met)
        };

        EvaluatedNode {
            met,
            label: node.label(),
            details: None,
            children: evaluated,
            outcome: NodeOutcome::Group,
        }
    }

    fn evaluate_course(
        &mut self,
        node: &'a Requirement,
        course_id: &'a str,
        course_code: &str,
        course_title: &str,
    ) -> EvaluatedNode {
        let outcome = NodeOutcome::Course {
            course_id: course_id.to_string(),
            course_code: course_code.to_string(),
            title: course_title.to_string(),
        };

        // Guard against a course requirement resolving to itself. Course
        // nodes are leaves, so under the path-scoped policy the same id in
        // unrelated sibling branches evaluates independently; the global
        // policy reproduces the legacy behaviour of flagging any repeat.
        let repeated = !course_id.is_empty()
            && match self.limits.cycle_policy {
                CyclePolicy::Global => !self.visited.insert(course_id),
                CyclePolicy::PerPath => self.path.contains(&course_id),
            };

        if repeated {
            return EvaluatedNode {
                met: false,
                label: node.label(),
                details: Some(format!("Circular dependency detected for {course_code}")),
                children: Vec::new(),
                outcome,
            };
        }

        self.path.push(course_id);
        let met = self.index.has_course(course_id, course_code);
        self.path.pop();

        let details = if met {
            "Completed".to_string()
        } else {
            format!("Missing: {course_title} ({course_code})")
        };

        EvaluatedNode {
            met,
            label: node.label(),
            details: Some(details),
            children: Vec::new(),
            outcome,
        }
    }

    fn evaluate_credits(&self, node: &Requirement, min_credits: f64) -> EvaluatedNode {
        let current = self.profile.total_credits;
        let met = current >= min_credits;

        // The detail is symmetric: progress is reported even when met.
        let details = if met {
            format!("Have {current} credits (need {min_credits})")
        } else {
            format!("Have {current} credits, need {min_credits}")
        };

        EvaluatedNode {
            met,
            label: node.label(),
            details: Some(details),
            children: Vec::new(),
            outcome: NodeOutcome::TotalCredits {
                required: min_credits,
                current,
            },
        }
    }

    fn evaluate_domain_credits(
        &self,
        node: &Requirement,
        domain: &str,
        min_credits: f64,
    ) -> EvaluatedNode {
        let current = self.profile.credits_in_domain(domain);
        let met = current >= min_credits;

        let details = if met {
            format!("Have {current} credits in {domain} (need {min_credits})")
        } else {
            format!("Have {current} credits in {domain}, need {min_credits}")
        };

        EvaluatedNode {
            met,
            label: node.label(),
            details: Some(details),
            children: Vec::new(),
            outcome: NodeOutcome::DomainCredits {
                domain: domain.to_string(),
                required: min_credits,
                current,
            },
        }
    }

    fn evaluate_topic(&self, node: &Requirement, topic: &str) -> EvaluatedNode {
        let met = self.index.covers_topic(topic);

        let details = if met {
            format!("Topic covered: {topic}")
        } else {
            format!("Missing topic: {topic}")
        };

        EvaluatedNode {
            met,
            label: node.label(),
            details: Some(details),
            children: Vec::new(),
            outcome: NodeOutcome::Topic {
                topic: topic.to_string(),
            },
        }
    }

    fn evaluate_language(&self, node: &Requirement, language: &str, level: &str) -> EvaluatedNode {
        let outcome = NodeOutcome::Language {
            language: language.to_string(),
            required_level: level.to_string(),
        };

        let (met, details) = self.index.language_level(language).map_or_else(
            || (false, format!("No {language} proficiency recorded")),
            |have| match (LanguageLevel::parse(have), LanguageLevel::parse(level)) {
                (Ok(held), Ok(required)) => {
                    let met = held.satisfies(required);
                    let details = if met {
                        format!("{language} proficiency met: have {have}, need {level}")
                    } else {
                        format!("{language}: have {have}, need {level}")
                    };
                    (met, details)
                }
                _ => (
                    false,
                    format!("{language}: unknown level, cannot evaluate (have {have}, need {level})"),
                ),
            },
        );

        EvaluatedNode {
            met,
            label: node.label(),
            details: Some(details),
            children: Vec::new(),
            outcome,
        }
    }

    fn truncated(&self, node: &Requirement, details: String) -> EvaluatedNode {
        EvaluatedNode {
            met: false,
            label: node.label(),
            details: Some(details),
            children: Vec::new(),
            outcome: NodeOutcome::Truncated,
        }
    }
}
