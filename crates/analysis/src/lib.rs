//! Chat transcript parsing and attendance intent classification for Matchday.
//!
//! Transcripts are read line by line into [`parsers::MessageRecord`]s, which
//! [`classifier::AttendanceClassifier`] groups per sender and scores against
//! the keyword and emoji sets in [`patterns`].

#![deny(missing_docs, unsafe_code)]

/// Attendance intent classification.
pub mod classifier;

/// Transcript parsers.
pub mod parsers;

/// Keyword and emoji pattern sets.
pub mod patterns;

/// Error types for analysis operations.
pub mod error;

pub use classifier::{AttendanceClassifier, AttendanceVerdict, Response};
pub use error::{AnalysisError, AnalysisResult};
pub use parsers::{validate_format, ChatParser, FormatCheck, MessageRecord, WhatsAppParser};
pub use patterns::{Intent, IntentScores, PatternLibrary};
