//! Resolves raw transcript entries against the course catalogue.
//!
//! Transcript parsing produces free-text course names and codes; before a
//! profile can be built, each entry needs a canonical course id. Matching
//! is tiered: an exact code match is authoritative, an exact title match is
//! near-certain, and containment/word-overlap heuristics cover renamed or
//! abbreviated titles with proportionally lower confidence.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::TranscriptEntry;

/// A course as listed in the catalogue, reduced to its matchable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCourse {
    /// Canonical course identifier.
    pub id: String,
    /// Institutional course code.
    pub code: String,
    /// Course title.
    pub title: String,
}

/// A resolved match between a transcript entry and a catalogue course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMatch {
    /// The matched course's canonical id.
    pub course_id: String,
    /// Match confidence in `(0, 1]`; 1.0 only for exact code matches.
    pub confidence: f64,
}

/// Matches a transcript entry against the catalogue.
///
/// Returns `None` when nothing in the catalogue resembles the entry.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn match_course(entry: &TranscriptEntry, catalogue: &[CatalogCourse]) -> Option<CourseMatch> {
    // Exact code match is authoritative.
    if let Some(raw_code) = &entry.raw_course_code {
        let code_upper = raw_code.to_uppercase();
        if let Some(by_code) = catalogue
            .iter()
            .find(|course| course.code.to_uppercase() == code_upper)
        {
            return Some(CourseMatch {
                course_id: by_code.id.clone(),
                confidence: 1.0,
            });
        }
    }

    let title_lower = entry.raw_course_name.as_ref()?.to_lowercase();
    let title_lower = title_lower.trim();
    if title_lower.is_empty() {
        return None;
    }

    let mut best_match: Option<CourseMatch> = None;
    let mut best_score = 0.0_f64;

    for course in catalogue {
        let course_title_lower = course.title.to_lowercase();

        if course_title_lower == title_lower {
            return Some(CourseMatch {
                course_id: course.id.clone(),
                confidence: 0.95,
            });
        }

        // One title containing the other, weighted by length ratio.
        if course_title_lower.contains(title_lower) || title_lower.contains(&course_title_lower) {
            let score = title_lower.len().min(course_title_lower.len()) as f64
                / title_lower.len().max(course_title_lower.len()) as f64;
            if score > best_score && score > 0.5 {
                best_score = score;
                best_match = Some(CourseMatch {
                    course_id: course.id.clone(),
                    confidence: score * 0.8,
                });
            }
        }

        // Shared significant words, weighted by the larger word set.
        let entry_words: HashSet<&str> = title_lower.split_whitespace().collect();
        let course_words: HashSet<&str> = course_title_lower.split_whitespace().collect();
        let overlap = entry_words
            .iter()
            .filter(|word| word.len() > 2 && course_words.contains(*word))
            .count();
        let overlap_score = overlap as f64 / entry_words.len().max(course_words.len()) as f64;

        if overlap_score > best_score && overlap_score > 0.4 {
            best_score = overlap_score;
            best_match = Some(CourseMatch {
                course_id: course.id.clone(),
                confidence: overlap_score * 0.7,
            });
        }
    }

    best_match
}

/// Fills in `matched_course_id` for every entry the catalogue can resolve.
///
/// Entries that already carry a match are left untouched; entries with no
/// plausible catalogue counterpart stay unmatched (they still contribute
/// credits to a profile, just not course completions).
#[must_use]
pub fn resolve_entries(
    mut entries: Vec<TranscriptEntry>,
    catalogue: &[CatalogCourse],
) -> Vec<TranscriptEntry> {
    for entry in &mut entries {
        if entry.matched_course_id.is_none() {
            if let Some(found) = match_course(entry, catalogue) {
                entry.matched_course_id = Some(found.course_id);
            }
        }
    }
    entries
}
