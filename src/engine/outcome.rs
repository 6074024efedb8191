//! Evaluation output types: the annotated tree and the structured diff.

use serde::{Deserialize, Serialize};

/// A requirement node annotated with its evaluation outcome.
///
/// Mirrors the shape of the input tree so a UI can render a pass/fail tree
/// directly. Every node carries the kind-specific data the missing-item
/// collector needs, including the actual credit figures the comparison used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedNode {
    /// Whether the requirement is satisfied.
    pub met: bool,
    /// Display label for the node.
    pub label: String,
    /// Human-readable explanation of the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Evaluated children, for combinator nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EvaluatedNode>,
    /// Kind-specific outcome data.
    pub outcome: NodeOutcome,
}

/// Kind-specific data captured while evaluating a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeOutcome {
    /// An `AND`/`OR` group; the interesting data lives in the children.
    Group,

    /// A prerequisite course check.
    #[serde(rename_all = "camelCase")]
    Course {
        /// Canonical course identifier from the requirement.
        course_id: String,
        /// Course code from the requirement.
        course_code: String,
        /// Course title from the requirement.
        title: String,
    },

    /// A total-credit threshold check.
    #[serde(rename_all = "camelCase")]
    TotalCredits {
        /// The required minimum.
        required: f64,
        /// The profile's actual total at evaluation time.
        current: f64,
    },

    /// A domain-credit threshold check.
    #[serde(rename_all = "camelCase")]
    DomainCredits {
        /// The subject domain.
        domain: String,
        /// The required minimum.
        required: f64,
        /// The profile's actual domain sum at evaluation time.
        current: f64,
    },

    /// A topic coverage check.
    Topic {
        /// The required topic.
        topic: String,
    },

    /// A language proficiency check.
    #[serde(rename_all = "camelCase")]
    Language {
        /// The required language.
        language: String,
        /// The required level, verbatim from the requirement.
        required_level: String,
    },

    /// A free-text requirement that needs human review.
    ManualReview {
        /// The requirement text.
        text: String,
    },

    /// An unrecognized requirement kind.
    Unknown {
        /// The unrecognized tag.
        tag: String,
    },

    /// A node skipped because evaluation hit the depth or node limit.
    Truncated,
}

/// A prerequisite course the profile is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingCourse {
    /// Canonical course identifier.
    pub course_id: String,
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub title: String,
}

/// A credit threshold the profile falls short of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MissingCredits {
    /// A total-credit shortfall.
    Total {
        /// The required minimum.
        required: f64,
        /// The profile's actual total.
        current: f64,
    },
    /// A domain-credit shortfall.
    Domain {
        /// The subject domain.
        domain: String,
        /// The required minimum.
        required: f64,
        /// The profile's actual domain sum.
        current: f64,
    },
}

/// A language proficiency the profile does not meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingLanguage {
    /// The required language.
    pub language: String,
    /// The required level.
    pub required_level: String,
}

/// The complete result of one eligibility evaluation.
///
/// `eligible` is the root node's satisfaction; the four missing buckets are
/// flat lists derived from unmet leaves; `evaluation_tree` is the full
/// annotated tree for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    /// Whether the root requirement is satisfied.
    pub eligible: bool,
    /// Prerequisite courses not on the profile.
    pub missing_courses: Vec<MissingCourse>,
    /// Credit thresholds not reached.
    pub missing_credits: Vec<MissingCredits>,
    /// Topics not covered.
    pub missing_topics: Vec<String>,
    /// Language proficiencies not met.
    pub missing_languages: Vec<MissingLanguage>,
    /// Labels of every satisfied node encountered, groups included.
    pub satisfied_requirements: Vec<String>,
    /// The full annotated evaluation tree.
    pub evaluation_tree: EvaluatedNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credits_serializes_with_type_tag() {
        let total = MissingCredits::Total {
            required: 90.0,
            current: 60.0,
        };
        let json = serde_json::to_value(&total).unwrap();
        assert_eq!(json["type"], "total");
        assert_eq!(json["required"], 90.0);
        assert_eq!(json["current"], 60.0);

        let domain = MissingCredits::Domain {
            domain: "Mathematics".to_string(),
            required: 45.0,
            current: 30.0,
        };
        let json = serde_json::to_value(&domain).unwrap();
        assert_eq!(json["type"], "domain");
        assert_eq!(json["domain"], "Mathematics");
    }

    #[test]
    fn evaluated_node_omits_empty_children() {
        let node = EvaluatedNode {
            met: true,
            label: "Topic: databases".to_string(),
            details: None,
            children: Vec::new(),
            outcome: NodeOutcome::Topic {
                topic: "databases".to_string(),
            },
        };
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("children").is_none());
        assert!(json.get("details").is_none());
        assert_eq!(json["outcome"]["kind"], "topic");
    }
}
