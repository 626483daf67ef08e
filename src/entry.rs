//! Core data structures for the mindful journal.
//!
//! This module contains the daily journal entry, the closed mood and emotion
//! vocabularies, and the unvalidated draft a caller hands to the store.
use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Maximum number of sentences a single day's entry may hold.
pub const MAX_SENTENCES: usize = 3;

/// Recommended upper bound for a sentence. Not enforced by the store.
pub const RECOMMENDED_SENTENCE_LEN: usize = 150;

/// How the day felt overall. Exactly one per entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    /// Every mood, in the order statistics are reported.
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Neutral, Mood::Sad];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional emotion tags attached to an entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Grateful,
    Energetic,
    Calm,
}

impl Emotion {
    pub const ALL: [Emotion; 3] = [Emotion::Grateful, Emotion::Energetic, Emotion::Calm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Grateful => "grateful",
            Emotion::Energetic => "energetic",
            Emotion::Calm => "calm",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one day's journal entry as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Identifier of the entry, always the ISO form of `date`
    pub id: String,
    /// The calendar day this entry belongs to
    pub date: NaiveDate,
    /// Short reflections, at least one once persisted
    pub sentences: Vec<String>,
    /// Overall mood of the day
    pub mood: Mood,
    /// Emotion tags, kept sorted so the stored form is stable
    pub emotions: BTreeSet<Emotion>,
}

impl JournalEntry {
    /// Creates an entry for `date`, deriving the id from the date.
    pub fn new(
        date: NaiveDate,
        sentences: Vec<String>,
        mood: Mood,
        emotions: impl IntoIterator<Item = Emotion>,
    ) -> Self {
        JournalEntry {
            id: date.format("%Y-%m-%d").to_string(),
            date,
            sentences,
            mood,
            emotions: emotions.into_iter().collect(),
        }
    }
}

/// Unvalidated input for today's entry.
///
/// `mood` is optional here so that a missing mood can be reported as a
/// validation failure instead of being impossible to express.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub sentences: Vec<String>,
    pub mood: Option<Mood>,
    pub emotions: Vec<Emotion>,
}

impl EntryDraft {
    pub fn new(sentences: Vec<String>, mood: Option<Mood>, emotions: Vec<Emotion>) -> Self {
        EntryDraft {
            sentences,
            mood,
            emotions,
        }
    }

    /// Sentences that carry any non-whitespace content, in their original order.
    pub fn filled_sentences(&self) -> Vec<String> {
        self.sentences
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Toggles an emotion on or off, mirroring a tap on an emotion chip.
    pub fn toggle_emotion(&mut self, emotion: Emotion) {
        if let Some(pos) = self.emotions.iter().position(|e| *e == emotion) {
            self.emotions.remove(pos);
        } else {
            self.emotions.push(emotion);
        }
    }
}

impl From<&JournalEntry> for EntryDraft {
    fn from(entry: &JournalEntry) -> Self {
        EntryDraft {
            sentences: entry.sentences.clone(),
            mood: Some(entry.mood),
            emotions: entry.emotions.iter().copied().collect(),
        }
    }
}
