//! Course prerequisite eligibility checking.
//!
//! Decides whether a user's academic history satisfies a course's
//! prerequisite policy, expressed as a nested boolean/constraint tree, and
//! explains exactly what is missing. The engine is a pure function over
//! plain data: it performs no I/O, keeps no state between calls, and never
//! fails on malformed input — unevaluable nodes degrade to "unmet, with
//! diagnostic detail".
//!
//! ```
//! use eligibility::{AcademicProfile, Requirement, TranscriptEntry, evaluate};
//!
//! let tree: Requirement = serde_json::from_str(
//!     r#"{
//!         "type": "AND",
//!         "children": [
//!             { "type": "CREDITS", "minCredits": 90 },
//!             { "type": "COURSE", "courseId": "c1", "courseCode": "MATH1", "courseTitle": "Calculus I" }
//!         ]
//!     }"#,
//! )?;
//!
//! let profile = AcademicProfile::from_transcript(&[TranscriptEntry {
//!     matched_course_id: Some("c1".to_string()),
//!     raw_course_code: Some("MATH1".to_string()),
//!     credits: 95.0,
//!     ..TranscriptEntry::default()
//! }]);
//!
//! let result = evaluate(&tree, &profile);
//! assert!(result.eligible);
//! assert!(result.missing_courses.is_empty());
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod domain;
pub use domain::{
    AcademicProfile, Cefr, CompletedCourse, LanguageLevel, LanguageProficiency, Requirement,
    TranscriptEntry, UnknownLevelError,
};

/// Requirement evaluation and the structured diff it produces.
pub mod engine;
pub use engine::{
    CyclePolicy, EligibilityResult, EvaluatedNode, Limits, MissingCourse, MissingCredits,
    MissingLanguage, NodeOutcome, evaluate, evaluate_all, evaluate_with_limits,
};

/// Transcript-to-catalogue course matching.
pub mod matcher;
pub use matcher::{CatalogCourse, CourseMatch, match_course, resolve_entries};
