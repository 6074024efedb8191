//! The requirement tree: a course's prerequisite policy as structured data.

use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single node in a course's prerequisite policy.
///
/// Requirement trees arrive from storage as tagged objects (a `type` field
/// plus kind-specific fields) and are treated as read-only input: the
/// evaluator never mutates them. Trees may be arbitrarily deep; the engine
/// applies its own limits during evaluation rather than rejecting input up
/// front.
///
/// A tag outside the seven known kinds deserializes to
/// [`Requirement::Unknown`], which always evaluates as unmet, so malformed
/// trees degrade instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, BorshSerialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    /// Satisfied iff every child is satisfied. Vacuously satisfied when
    /// empty.
    #[serde(rename_all = "camelCase")]
    And {
        /// The conjoined sub-requirements.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Requirement>,
        /// Optional human-readable description of the group.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// Satisfied iff at least one child is satisfied. Vacuously unsatisfied
    /// when empty.
    #[serde(rename_all = "camelCase")]
    Or {
        /// The alternative sub-requirements.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Requirement>,
        /// Optional human-readable description of the group.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// A specific prerequisite course, identified by canonical id with the
    /// course code as a fallback for courses not yet linked to an id.
    #[serde(rename_all = "camelCase")]
    Course {
        /// Canonical course identifier. May be empty when unknown.
        #[serde(default)]
        course_id: String,
        /// Institutional course code, e.g. `"1DL201"`.
        #[serde(default)]
        course_code: String,
        /// Course title, used for labels and missing-item reports.
        #[serde(default)]
        course_title: String,
        /// Optional human-readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// A minimum total-credit threshold.
    #[serde(rename_all = "camelCase")]
    Credits {
        /// Minimum number of credits, inclusive.
        #[serde(default)]
        min_credits: f64,
        /// Optional human-readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// A minimum credit threshold within a single subject domain.
    #[serde(rename_all = "camelCase")]
    DomainCredits {
        /// The subject domain, e.g. `"Mathematics"`.
        #[serde(default)]
        domain: String,
        /// Minimum number of credits in the domain, inclusive.
        #[serde(default)]
        min_credits: f64,
        /// Optional human-readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// A topic that must be covered by completed coursework.
    Topic {
        /// The required topic. Matched case-insensitively.
        #[serde(default)]
        topic: String,
        /// Optional human-readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// A language proficiency requirement.
    Language {
        /// The language, e.g. `"English"`. Matched case-insensitively.
        #[serde(default)]
        language: String,
        /// The required proficiency level, e.g. `"B2"` or `"6.5"`.
        #[serde(default)]
        level: String,
        /// Optional human-readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// A free-text requirement that cannot be checked mechanically. Always
    /// evaluates as unmet and is flagged for manual review.
    Custom {
        /// The requirement text.
        #[serde(default)]
        text: String,
        /// Optional human-readable description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// Fallback for an unrecognized `type` tag. Always evaluates as unmet.
    #[serde(rename = "UNKNOWN")]
    Unknown {
        /// The unrecognized tag, as it appeared on the wire.
        kind: String,
    },
}

impl Requirement {
    /// The node's display label: the explicit `label` if present, otherwise
    /// a default derived from the node's kind.
    #[must_use]
    pub fn label(&self) -> String {
        let explicit = match self {
            Self::And { label, .. }
            | Self::Or { label, .. }
            | Self::Course { label, .. }
            | Self::Credits { label, .. }
            | Self::DomainCredits { label, .. }
            | Self::Topic { label, .. }
            | Self::Language { label, .. }
            | Self::Custom { label, .. } => label.as_deref(),
            Self::Unknown { .. } => None,
        };

        explicit.map_or_else(|| self.default_label(), str::to_string)
    }

    fn default_label(&self) -> String {
        match self {
            Self::And { .. } => "All of the following".to_string(),
            Self::Or { .. } => "One of the following".to_string(),
            Self::Course {
                course_code,
                course_title,
                ..
            } => format!("{course_title} ({course_code})"),
            Self::Credits { min_credits, .. } => format!("{min_credits} credits total"),
            Self::DomainCredits {
                domain,
                min_credits,
                ..
            } => format!("{min_credits} credits in {domain}"),
            Self::Topic { topic, .. } => format!("Topic: {topic}"),
            Self::Language {
                language, level, ..
            } => format!("{language} {level}"),
            Self::Custom { .. } => "Custom requirement".to_string(),
            Self::Unknown { .. } => "Unknown requirement type".to_string(),
        }
    }

    /// The children of a combinator node, or an empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::And { children, .. } | Self::Or { children, .. } => children,
            _ => &[],
        }
    }

    /// Total number of nodes in the tree, including this one.
    ///
    /// Together with [`depth`](Self::depth) this lets callers reject
    /// pathologically large trees before evaluating them.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth of the tree, counting this node as 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or_default()
    }

    /// Returns a fingerprint of the requirement tree.
    ///
    /// The fingerprint is a SHA-256 hash of the Borsh-serialized tree. Any
    /// change to the tree changes the fingerprint, so callers can key cached
    /// evaluation results on it and detect when a stored result has gone
    /// stale.
    ///
    /// # Panics
    ///
    /// Panics if borsh serialization fails, which is only possible when a
    /// credit threshold holds a non-finite value.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let encoded = borsh::to_vec(self).expect("this should never fail");
        let hash = Sha256::digest(encoded);
        format!("{hash:x}")
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GroupFields {
    children: Vec<Requirement>,
    label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CourseFields {
    course_id: String,
    course_code: String,
    course_title: String,
    label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CreditsFields {
    min_credits: f64,
    label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct DomainCreditsFields {
    domain: String,
    min_credits: f64,
    label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TopicFields {
    topic: String,
    label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LanguageFields {
    language: String,
    level: String,
    label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CustomFields {
    text: String,
    label: Option<String>,
}

fn fields<T, E>(value: serde_json::Value) -> Result<T, E>
where
    T: serde::de::DeserializeOwned,
    E: serde::de::Error,
{
    serde_json::from_value(value).map_err(E::custom)
}

impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Buffer the node so the tag can be inspected before committing to a
        // variant. Unrecognized tags become `Unknown` rather than an error.
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        let requirement = match kind.as_str() {
            "AND" => {
                let f: GroupFields = fields(value)?;
                Self::And {
                    children: f.children,
                    label: f.label,
                }
            }
            "OR" => {
                let f: GroupFields = fields(value)?;
                Self::Or {
                    children: f.children,
                    label: f.label,
                }
            }
            "COURSE" => {
                let f: CourseFields = fields(value)?;
                Self::Course {
                    course_id: f.course_id,
                    course_code: f.course_code,
                    course_title: f.course_title,
                    label: f.label,
                }
            }
            "CREDITS" => {
                let f: CreditsFields = fields(value)?;
                Self::Credits {
                    min_credits: f.min_credits,
                    label: f.label,
                }
            }
            "DOMAIN_CREDITS" => {
                let f: DomainCreditsFields = fields(value)?;
                Self::DomainCredits {
                    domain: f.domain,
                    min_credits: f.min_credits,
                    label: f.label,
                }
            }
            "TOPIC" => {
                let f: TopicFields = fields(value)?;
                Self::Topic {
                    topic: f.topic,
                    label: f.label,
                }
            }
            "LANGUAGE" => {
                let f: LanguageFields = fields(value)?;
                Self::Language {
                    language: f.language,
                    level: f.level,
                    label: f.label,
                }
            }
            "CUSTOM" => {
                let f: CustomFields = fields(value)?;
                Self::Custom {
                    text: f.text,
                    label: f.label,
                }
            }
            _ => Self::Unknown { kind },
        };

        Ok(requirement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, code: &str, title: &str) -> Requirement {
        Requirement::Course {
            course_id: id.to_string(),
            course_code: code.to_string(),
            course_title: title.to_string(),
            label: None,
        }
    }

    #[test]
    fn deserializes_nested_tree() {
        let json = r#"{
            "type": "AND",
            "label": "All requirements",
            "children": [
                { "type": "CREDITS", "minCredits": 120 },
                {
                    "type": "OR",
                    "children": [
                        { "type": "COURSE", "courseCode": "1DL201", "courseTitle": "Program Design", "courseId": "" },
                        { "type": "COURSE", "courseCode": "1TD722", "courseTitle": "Scientific Computing", "courseId": "" }
                    ]
                },
                { "type": "LANGUAGE", "language": "English", "level": "B2" }
            ]
        }"#;

        let tree: Requirement = serde_json::from_str(json).unwrap();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.label(), "All requirements");
    }

    #[test]
    fn unrecognized_tag_becomes_unknown() {
        let tree: Requirement =
            serde_json::from_str(r#"{ "type": "GPA", "minGpa": 3.0 }"#).unwrap();
        assert_eq!(
            tree,
            Requirement::Unknown {
                kind: "GPA".to_string()
            }
        );
    }

    #[test]
    fn missing_tag_becomes_unknown() {
        let tree: Requirement = serde_json::from_str(r#"{ "label": "?" }"#).unwrap();
        assert!(matches!(tree, Requirement::Unknown { kind } if kind.is_empty()));
    }

    #[test]
    fn missing_optional_fields_default() {
        let tree: Requirement = serde_json::from_str(r#"{ "type": "AND" }"#).unwrap();
        assert_eq!(
            tree,
            Requirement::And {
                children: Vec::new(),
                label: None,
            }
        );
    }

    #[test]
    fn default_labels_follow_kind() {
        assert_eq!(
            course("c1", "MATH1", "Calculus I").label(),
            "Calculus I (MATH1)"
        );
        assert_eq!(
            Requirement::Credits {
                min_credits: 90.0,
                label: None
            }
            .label(),
            "90 credits total"
        );
        assert_eq!(
            Requirement::DomainCredits {
                domain: "Mathematics".to_string(),
                min_credits: 45.0,
                label: None
            }
            .label(),
            "45 credits in Mathematics"
        );
        assert_eq!(
            Requirement::Unknown {
                kind: "GPA".to_string()
            }
            .label(),
            "Unknown requirement type"
        );
    }

    #[test]
    fn explicit_label_wins() {
        let req = Requirement::Topic {
            topic: "Machine Learning".to_string(),
            label: Some("ML exposure".to_string()),
        };
        assert_eq!(req.label(), "ML exposure");
    }

    #[test]
    fn serializes_with_wire_tags() {
        let req = Requirement::DomainCredits {
            domain: "CS".to_string(),
            min_credits: 45.0,
            label: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "DOMAIN_CREDITS");
        assert_eq!(json["minCredits"], 45.0);
    }

    #[test]
    fn fingerprint_is_stable() {
        let a = course("c1", "MATH1", "Calculus I");
        let b = course("c1", "MATH1", "Calculus I");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let a = course("c1", "MATH1", "Calculus I");
        let b = course("c1", "MATH2", "Calculus II");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
