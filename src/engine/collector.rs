//! Flattens an evaluated tree into the structured missing-item report.

use crate::engine::outcome::{
    EvaluatedNode, MissingCourse, MissingCredits, MissingLanguage, NodeOutcome,
};

/// The flat lists derived from one evaluated tree.
#[derive(Debug, Default)]
pub struct Collected {
    pub missing_courses: Vec<MissingCourse>,
    pub missing_credits: Vec<MissingCredits>,
    pub missing_topics: Vec<String>,
    pub missing_languages: Vec<MissingLanguage>,
    pub satisfied_requirements: Vec<String>,
}

/// Walks the evaluated tree depth-first and buckets its leaves.
///
/// Satisfied nodes contribute their label, groups included, so a UI can
/// show a satisfied group as a single summary line. Unsatisfied leaves
/// contribute a typed record; groups, manual-review nodes, unknown kinds,
/// and truncated nodes contribute no missing entries of their own.
pub fn collect(tree: &EvaluatedNode) -> Collected {
    let mut collected = Collected::default();
    walk(tree, &mut collected);
    collected
}

fn walk(node: &EvaluatedNode, collected: &mut Collected) {
    if node.met && !node.label.is_empty() {
        collected.satisfied_requirements.push(node.label.clone());
    }

    if !node.met {
        match &node.outcome {
            NodeOutcome::Course {
                course_id,
                course_code,
                title,
            } => collected.missing_courses.push(MissingCourse {
                course_id: course_id.clone(),
                course_code: course_code.clone(),
                title: title.clone(),
            }),
            NodeOutcome::TotalCredits { required, current } => {
                collected.missing_credits.push(MissingCredits::Total {
                    required: *required,
                    current: *current,
                });
            }
            NodeOutcome::DomainCredits {
                domain,
                required,
                current,
            } => collected.missing_credits.push(MissingCredits::Domain {
                domain: domain.clone(),
                required: *required,
                current: *current,
            }),
            NodeOutcome::Topic { topic } => collected.missing_topics.push(topic.clone()),
            NodeOutcome::Language {
                language,
                required_level,
            } => collected.missing_languages.push(MissingLanguage {
                language: language.clone(),
                required_level: required_level.clone(),
            }),
            NodeOutcome::Group
            | NodeOutcome::ManualReview { .. }
            | NodeOutcome::Unknown { .. }
            | NodeOutcome::Truncated => {}
        }
    }

    for child in &node.children {
        walk(child, collected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(met: bool, label: &str, outcome: NodeOutcome) -> EvaluatedNode {
        EvaluatedNode {
            met,
            label: label.to_string(),
            details: None,
            children: Vec::new(),
            outcome,
        }
    }

    fn group(met: bool, label: &str, children: Vec<EvaluatedNode>) -> EvaluatedNode {
        EvaluatedNode {
            met,
            label: label.to_string(),
            details: None,
            children,
            outcome: NodeOutcome::Group,
        }
    }

    #[test]
    fn satisfied_groups_contribute_their_own_label() {
        let tree = group(
            true,
            "All of the following",
            vec![leaf(
                true,
                "Topic: databases",
                NodeOutcome::Topic {
                    topic: "databases".to_string(),
                },
            )],
        );

        let collected = collect(&tree);

        assert_eq!(
            collected.satisfied_requirements,
            vec!["All of the following", "Topic: databases"]
        );
    }

    #[test]
    fn unmet_groups_contribute_no_missing_entries() {
        let tree = group(
            false,
            "All of the following",
            vec![leaf(
                false,
                "Topic: databases",
                NodeOutcome::Topic {
                    topic: "databases".to_string(),
                },
            )],
        );

        let collected = collect(&tree);

        assert!(collected.satisfied_requirements.is_empty());
        assert_eq!(collected.missing_topics, vec!["databases"]);
        assert!(collected.missing_courses.is_empty());
    }

    #[test]
    fn credit_shortfalls_carry_the_real_current_value() {
        let tree = group(
            false,
            "All of the following",
            vec![
                leaf(
                    false,
                    "90 credits total",
                    NodeOutcome::TotalCredits {
                        required: 90.0,
                        current: 60.0,
                    },
                ),
                leaf(
                    false,
                    "45 credits in Mathematics",
                    NodeOutcome::DomainCredits {
                        domain: "Mathematics".to_string(),
                        required: 45.0,
                        current: 30.0,
                    },
                ),
            ],
        );

        let collected = collect(&tree);

        assert_eq!(
            collected.missing_credits,
            vec![
                MissingCredits::Total {
                    required: 90.0,
                    current: 60.0,
                },
                MissingCredits::Domain {
                    domain: "Mathematics".to_string(),
                    required: 45.0,
                    current: 30.0,
                },
            ]
        );
    }

    #[test]
    fn manual_review_and_unknown_nodes_fill_no_typed_bucket() {
        let tree = group(
            false,
            "All of the following",
            vec![
                leaf(
                    false,
                    "Custom requirement",
                    NodeOutcome::ManualReview {
                        text: "Portfolio".to_string(),
                    },
                ),
                leaf(
                    false,
                    "Unknown requirement type",
                    NodeOutcome::Unknown {
                        tag: "GPA".to_string(),
                    },
                ),
                leaf(false, "skipped", NodeOutcome::Truncated),
            ],
        );

        let collected = collect(&tree);

        assert!(collected.missing_courses.is_empty());
        assert!(collected.missing_credits.is_empty());
        assert!(collected.missing_topics.is_empty());
        assert!(collected.missing_languages.is_empty());
    }
}
