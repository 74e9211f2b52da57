//! Attendance intent classification over parsed chat messages.

use crate::error::AnalysisResult;
use crate::parsers::MessageRecord;
use crate::patterns::{contextual, IntentScores, PatternLibrary};
use chrono::NaiveDateTime;
use matchday_core::config::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Attendance answer read from a sender's messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    /// Attending.
    Yes,
    /// Undecided.
    Maybe,
    /// Not attending.
    No,
    /// No pattern or phrase matched.
    Unknown,
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Yes => write!(f, "Yes"),
            Response::Maybe => write!(f, "Maybe"),
            Response::No => write!(f, "No"),
            Response::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Classification result for one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceVerdict {
    /// Sender name.
    pub name: String,
    /// Classified answer.
    pub response: Response,
    /// Text of the sender's most recent message.
    pub message: String,
    /// Time of the sender's most recent message.
    #[serde(with = "crate::parsers::timestamp_format")]
    pub timestamp: NaiveDateTime,
    /// Number of messages that were combined for the decision.
    pub message_count: usize,
    /// Pattern match counts behind the decision.
    pub scores: IntentScores,
}

/// Scores each sender's combined messages against a [`PatternLibrary`].
#[derive(Debug, Clone)]
pub struct AttendanceClassifier {
    library: PatternLibrary,
}

impl AttendanceClassifier {
    /// Classifier with every built-in pattern.
    pub fn new() -> AnalysisResult<Self> {
        Ok(Self::with_library(PatternLibrary::new()?))
    }

    /// Classifier with patterns selected by `config`.
    pub fn from_config(config: &ClassifierConfig) -> AnalysisResult<Self> {
        Ok(Self::with_library(PatternLibrary::from_config(config)?))
    }

    /// Classifier over an existing library.
    pub fn with_library(library: PatternLibrary) -> Self {
        Self { library }
    }

    /// Pattern library in use.
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// One verdict per sender whose intent could be determined, in the order
    /// senders first appear. Undetermined senders are left out.
    pub fn classify(&self, records: &[MessageRecord]) -> Vec<AttendanceVerdict> {
        let verdicts: Vec<AttendanceVerdict> = self
            .evaluate(records)
            .into_iter()
            .filter(|v| v.response != Response::Unknown)
            .collect();
        info!(
            "classified {} messages into {} verdicts",
            records.len(),
            verdicts.len()
        );
        verdicts
    }

    /// Like [`classify`](Self::classify) but keeps [`Response::Unknown`] senders.
    pub fn evaluate(&self, records: &[MessageRecord]) -> Vec<AttendanceVerdict> {
        group_by_sender(records)
            .into_iter()
            .filter_map(|(sender, mut messages)| {
                messages.sort_by_key(|m| m.timestamp);
                let latest = *messages.last()?;

                let combined = messages
                    .iter()
                    .map(|m| m.message.to_lowercase())
                    .collect::<Vec<_>>()
                    .join(" ");
                let scores = self.library.score(&combined);
                let response = decide(&scores, &combined);
                debug!(
                    "{}: {:?} over {} messages -> {}",
                    sender,
                    scores,
                    messages.len(),
                    response
                );

                Some(AttendanceVerdict {
                    name: sender.to_string(),
                    response,
                    message: latest.message.clone(),
                    timestamp: latest.timestamp,
                    message_count: messages.len(),
                    scores,
                })
            })
            .collect()
    }
}

/// Group records by sender, preserving first-appearance order.
fn group_by_sender(records: &[MessageRecord]) -> Vec<(&str, Vec<&MessageRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&MessageRecord>)> = Vec::new();

    for record in records {
        let sender = record.sender.as_str();
        match index.get(sender) {
            Some(&idx) => groups[idx].1.push(record),
            None => {
                index.insert(sender, groups.len());
                groups.push((sender, vec![record]));
            }
        }
    }

    groups
}

/// A strict majority wins; otherwise any maybe; otherwise phrase lookup.
fn decide(scores: &IntentScores, text: &str) -> Response {
    let IntentScores {
        positive,
        negative,
        maybe,
    } = *scores;

    if positive > negative && positive > maybe {
        Response::Yes
    } else if negative > positive && negative > maybe {
        Response::No
    } else if maybe > 0 {
        Response::Maybe
    } else {
        contextual_response(text)
    }
}

fn contextual_response(text: &str) -> Response {
    let text = text.to_lowercase();
    let contains_any = |phrases: &[&str]| phrases.iter().any(|p| text.contains(p));

    if contains_any(contextual::FUTURE_INTENT) {
        Response::Yes
    } else if contains_any(contextual::IMPOSSIBILITY) {
        Response::No
    } else if contains_any(contextual::UNCERTAINTY) {
        Response::Maybe
    } else {
        Response::Unknown
    }
}
