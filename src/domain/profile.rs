//! The normalized academic profile built from transcript data.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::transcript::TranscriptEntry;

/// A completed course on a user's record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCourse {
    /// Canonical course identifier.
    pub course_id: String,
    /// Institutional course code. Empty when the transcript carried none.
    #[serde(default)]
    pub course_code: String,
    /// Course title, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Credits awarded.
    #[serde(default)]
    pub credits: f64,
    /// Subject domain, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Topics covered by the course.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    /// Grade awarded, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// A recorded language proficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProficiency {
    /// The language, e.g. `"English"`.
    pub language: String,
    /// The proficiency level, e.g. `"B2"` or `"6.5"`.
    pub level: String,
}

/// A normalized summary of a user's completed coursework.
///
/// Built once per evaluation (see [`AcademicProfile::from_transcript`]) and
/// treated as borrowed-immutable for the duration of any evaluation using
/// it. The ordered collections give deterministic iteration, which keeps
/// evaluation output bit-identical across repeated calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicProfile {
    /// Completed courses with a resolved catalogue identity.
    #[serde(default)]
    pub completed_courses: Vec<CompletedCourse>,
    /// Sum of credits across all transcript entries, matched or not.
    #[serde(default)]
    pub total_credits: f64,
    /// Credit sums grouped by subject domain.
    #[serde(default)]
    pub credits_by_domain: BTreeMap<String, f64>,
    /// Deduplicated topics covered by completed coursework, lowercased.
    #[serde(default)]
    pub covered_topics: BTreeSet<String>,
    /// Recorded language proficiencies.
    ///
    /// Never derived from transcript entries; populated by a separate
    /// upstream step (e.g. a language-certificate form).
    #[serde(default)]
    pub language_proficiency: Vec<LanguageProficiency>,
}

impl AcademicProfile {
    /// Builds a profile from parsed transcript entries in a single pass.
    ///
    /// - Only entries with a resolved `matched_course_id` become
    ///   [`CompletedCourse`] records; unresolved entries still count towards
    ///   the credit totals.
    /// - Topics are case-folded to lowercase at ingestion so the topic
    ///   matcher and the stored set agree on normalization.
    /// - `language_proficiency` is always empty here; transcripts carry no
    ///   proficiency data.
    #[must_use]
    pub fn from_transcript(entries: &[TranscriptEntry]) -> Self {
        let completed_courses = entries
            .iter()
            .filter_map(|entry| {
                let course_id = entry.matched_course_id.clone()?;
                Some(CompletedCourse {
                    course_id,
                    course_code: entry.raw_course_code.clone().unwrap_or_default(),
                    title: entry.raw_course_name.clone(),
                    credits: entry.credits,
                    domain: entry.domain.clone(),
                    topics: entry.topics.clone(),
                    grade: entry.grade.clone(),
                })
            })
            .collect();

        let total_credits = entries.iter().map(|entry| entry.credits).sum();

        let mut credits_by_domain = BTreeMap::new();
        for entry in entries {
            if let Some(domain) = &entry.domain {
                *credits_by_domain.entry(domain.clone()).or_insert(0.0) += entry.credits;
            }
        }

        let covered_topics = entries
            .iter()
            .flat_map(|entry| &entry.topics)
            .map(|topic| topic.to_lowercase())
            .collect();

        Self {
            completed_courses,
            total_credits,
            credits_by_domain,
            covered_topics,
            language_proficiency: Vec::new(),
        }
    }

    /// Credits accumulated in the given domain, or 0 when none.
    #[must_use]
    pub fn credits_in_domain(&self, domain: &str) -> f64 {
        self.credits_by_domain
            .get(domain)
            .copied()
            .unwrap_or_default()
    }

    /// Builds the lookup index used during evaluation.
    pub(crate) fn index(&self) -> ProfileIndex<'_> {
        ProfileIndex::new(self)
    }
}

/// Borrowed lookup structures over a profile, built once per evaluation.
///
/// Keeps the per-node checks O(1) regardless of how many courses the
/// profile lists.
#[derive(Debug)]
pub(crate) struct ProfileIndex<'a> {
    course_ids: HashSet<&'a str>,
    course_codes: HashSet<&'a str>,
    topics: HashSet<String>,
    languages: HashMap<String, &'a str>,
}

impl<'a> ProfileIndex<'a> {
    fn new(profile: &'a AcademicProfile) -> Self {
        let course_ids = profile
            .completed_courses
            .iter()
            .map(|course| course.course_id.as_str())
            .filter(|id| !id.is_empty())
            .collect();

        let course_codes = profile
            .completed_courses
            .iter()
            .map(|course| course.course_code.as_str())
            .filter(|code| !code.is_empty())
            .collect();

        // Case-folded here as well, so hand-constructed profiles with
        // mixed-case topics behave like built ones.
        let topics = profile
            .covered_topics
            .iter()
            .map(|topic| topic.to_lowercase())
            .collect();

        let mut languages: HashMap<String, &'a str> = HashMap::new();
        for proficiency in &profile.language_proficiency {
            languages
                .entry(proficiency.language.to_lowercase())
                .or_insert(proficiency.level.as_str());
        }

        Self {
            course_ids,
            course_codes,
            topics,
            languages,
        }
    }

    /// Whether the profile lists a completed course with this id or code.
    ///
    /// Empty identifiers never match: a requirement without a resolved id
    /// cannot be satisfied by a completed course that also lacks one.
    pub(crate) fn has_course(&self, course_id: &str, course_code: &str) -> bool {
        (!course_id.is_empty() && self.course_ids.contains(course_id))
            || (!course_code.is_empty() && self.course_codes.contains(course_code))
    }

    /// Whether the profile covers the topic, compared case-insensitively.
    pub(crate) fn covers_topic(&self, topic: &str) -> bool {
        self.topics.contains(&topic.to_lowercase())
    }

    /// The recorded level for a language, matched case-insensitively.
    pub(crate) fn language_level(&self, language: &str) -> Option<&'a str> {
        self.languages.get(&language.to_lowercase()).copied()
    }
}
