//! Raw transcript records as produced by the transcript parser or manual
//! entry.

use serde::{Deserialize, Serialize};

/// A single line item from a parsed transcript.
///
/// Entries arrive from an external PDF-transcript parser or a manual form.
/// `matched_course_id` is filled when the entry has been resolved against
/// the course catalogue (see [`crate::matcher`]); unresolved entries still
/// contribute credits to the academic profile but are not individually
/// matchable as completed courses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    /// Canonical id of the catalogue course this entry resolved to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_course_id: Option<String>,

    /// Course code as it appeared on the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_course_code: Option<String>,

    /// Course name as it appeared on the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_course_name: Option<String>,

    /// Credits awarded for the entry.
    #[serde(default)]
    pub credits: f64,

    /// Subject domain of the entry, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Topics covered by the entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    /// Grade awarded, when present on the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}
