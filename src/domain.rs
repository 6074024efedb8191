//! Domain models for eligibility checking.
//!
//! This module contains the core domain types: the requirement tree, the
//! academic profile and its transcript inputs, and language proficiency
//! levels.

/// Requirement tree model and wire format.
pub mod requirement;
pub use requirement::Requirement;

/// Language proficiency levels and their ordering.
pub mod level;
pub use level::{Cefr, LanguageLevel, UnknownLevelError};

/// Academic profile model and the transcript profile builder.
pub mod profile;
pub use profile::{AcademicProfile, CompletedCourse, LanguageProficiency};

/// Raw transcript records.
pub mod transcript;
pub use transcript::TranscriptEntry;
