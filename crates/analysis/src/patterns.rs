//! Keyword and emoji pattern sets for attendance intent.
//!
//! Each keyword becomes its own case-insensitive regex so overlapping
//! phrases ("ben varım" and "varım") both contribute to a score. Word
//! boundaries are applied only on sides where the phrase starts or ends with
//! a word character; emoji markers therefore match literally.

use crate::error::AnalysisResult;
use matchday_core::config::{ClassifierConfig, Language};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Attendance intent a pattern set votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Will attend.
    Positive,
    /// Will not attend.
    Negative,
    /// Undecided.
    Maybe,
}

/// Keyword lists for one language.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable {
    /// Phrases signalling attendance.
    pub positive: &'static [&'static str],
    /// Phrases signalling absence.
    pub negative: &'static [&'static str],
    /// Phrases signalling uncertainty.
    pub maybe: &'static [&'static str],
}

/// Turkish keywords.
pub const TURKISH: KeywordTable = KeywordTable {
    positive: &[
        "geliyorum",
        "gelirim",
        "varım",
        "katılıyorum",
        "katılırım",
        "evet",
        "tamam",
        "ok",
        "olur",
        "geleceğim",
        "ben de var",
        "ben varım",
        "bende varım",
        "tabii",
        "kesinlikle",
    ],
    negative: &[
        "gelemem",
        "gelemiyorum",
        "yokum",
        "katılamam",
        "katılamıyorum",
        "hayır",
        "olmaz",
        "maalesef",
        "üzgünüm",
        "gidemem",
        "mümkün değil",
    ],
    maybe: &[
        "belki",
        "muhtemelen",
        "sanırım",
        "galiba",
        "bakacağım",
        "deneyeceğim",
        "emin değilim",
        "sonra söylerim",
        "bakarım",
    ],
};

/// English keywords.
pub const ENGLISH: KeywordTable = KeywordTable {
    positive: &["yes", "coming", "will come", "count me in", "i'm in", "sure", "okay"],
    negative: &["no", "can't", "cannot", "won't", "will not", "not coming", "sorry"],
    maybe: &["maybe", "probably", "might", "not sure", "will try", "let me check"],
};

/// Emoji markers, independent of language.
pub const EMOJI: KeywordTable = KeywordTable {
    positive: &["👍", "✅", "☑️", "✓", "👌", "💪", "⚽"],
    negative: &["❌", "❎", "👎", "😢", "😞", "🚫"],
    maybe: &["🤔", "🤷", "❓", "❔", "🤷‍♂️", "🤷‍♀️"],
};

/// Phrases checked by substring when the scores are inconclusive.
pub mod contextual {
    /// Future-intent phrases read as attending.
    pub const FUTURE_INTENT: &[&str] = &["geleceğim", "orada olacağım", "katılacağım"];
    /// Impossibility phrases read as not attending.
    pub const IMPOSSIBILITY: &[&str] = &["gidemem", "olmaz", "mümkün değil"];
    /// Uncertainty phrases read as maybe.
    pub const UNCERTAINTY: &[&str] = &["emin değilim", "bakacağım", "sonra söylerim"];
}

fn keywords(lang: Language) -> &'static KeywordTable {
    match lang {
        Language::Turkish => &TURKISH,
        Language::English => &ENGLISH,
    }
}

/// Compiled patterns voting for one intent.
#[derive(Debug, Clone)]
pub struct PatternSet {
    intent: Intent,
    patterns: Vec<Regex>,
}

impl PatternSet {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            patterns: Vec::new(),
        }
    }

    fn push_phrase(&mut self, phrase: &str) -> AnalysisResult<()> {
        if let Some(regex) = phrase_regex(phrase)? {
            self.patterns.push(regex);
        }
        Ok(())
    }

    /// Intent this set votes for.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Total number of non-overlapping matches of every pattern in `text`.
    pub fn score(&self, text: &str) -> usize {
        self.patterns.iter().map(|p| p.find_iter(text).count()).sum()
    }
}

/// Match counts per intent for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentScores {
    /// Positive pattern matches.
    pub positive: usize,
    /// Negative pattern matches.
    pub negative: usize,
    /// Maybe pattern matches.
    pub maybe: usize,
}

/// Positive, negative and maybe pattern sets.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    positive: PatternSet,
    negative: PatternSet,
    maybe: PatternSet,
}

impl PatternLibrary {
    /// Library with every built-in language and the emoji markers.
    pub fn new() -> AnalysisResult<Self> {
        Self::from_config(&ClassifierConfig::default())
    }

    /// Library restricted to the configured languages plus extra keywords.
    pub fn from_config(config: &ClassifierConfig) -> AnalysisResult<Self> {
        let mut tables: Vec<&KeywordTable> =
            config.languages.iter().map(|lang| keywords(*lang)).collect();
        if config.emoji {
            tables.push(&EMOJI);
        }

        let mut positive = PatternSet::new(Intent::Positive);
        let mut negative = PatternSet::new(Intent::Negative);
        let mut maybe = PatternSet::new(Intent::Maybe);

        for table in tables {
            for phrase in table.positive {
                positive.push_phrase(phrase)?;
            }
            for phrase in table.negative {
                negative.push_phrase(phrase)?;
            }
            for phrase in table.maybe {
                maybe.push_phrase(phrase)?;
            }
        }

        for phrase in &config.extra_positive {
            positive.push_phrase(phrase)?;
        }
        for phrase in &config.extra_negative {
            negative.push_phrase(phrase)?;
        }
        for phrase in &config.extra_maybe {
            maybe.push_phrase(phrase)?;
        }

        Ok(Self {
            positive,
            negative,
            maybe,
        })
    }

    /// Pattern set for `intent`.
    pub fn set(&self, intent: Intent) -> &PatternSet {
        match intent {
            Intent::Positive => &self.positive,
            Intent::Negative => &self.negative,
            Intent::Maybe => &self.maybe,
        }
    }

    /// Score `text` against all three sets.
    pub fn score(&self, text: &str) -> IntentScores {
        IntentScores {
            positive: self.positive.score(text),
            negative: self.negative.score(text),
            maybe: self.maybe.score(text),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive regex for a phrase; inner whitespace matches any run of
/// whitespace. Blank phrases yield `None`.
fn phrase_regex(phrase: &str) -> AnalysisResult<Option<Regex>> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let (first, last) = match (words.first(), words.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(None),
    };

    let body = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join(r"\s+");

    let lead = if first.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if last.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };

    Ok(Some(Regex::new(&format!("(?i){}{}{}", lead, body, trail))?))
}
