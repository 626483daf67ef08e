//! String encoding of journal entries for the key-value store.
use log::{error, trace};

use crate::{JournalEntry, JournalError, Result, MAX_SENTENCES};

/// Serializes an entry to the JSON string stored under its key.
pub fn encode(entry: &JournalEntry) -> Result<String> {
    trace!("Encoding journal entry {}", entry.id);
    serde_json::to_string(entry).map_err(|e| {
        error!("Failed to encode journal entry {}: {}", entry.id, e);
        JournalError::Serialization(e)
    })
}

/// Parses a stored value back into an entry.
///
/// Any malformed value, unknown mood or emotion, an id that does not name
/// the entry's own date, or a sentence list that a save could never have
/// produced (empty, blank, or longer than [`MAX_SENTENCES`]) is a
/// [`JournalError::Decode`].
pub fn decode(raw: &str) -> Result<JournalEntry> {
    let entry: JournalEntry =
        serde_json::from_str(raw).map_err(|e| JournalError::decode(e.to_string()))?;

    let expected_id = entry.date.format("%Y-%m-%d").to_string();
    if entry.id != expected_id {
        return Err(JournalError::decode(format!(
            "entry id {} does not match its date {}",
            entry.id, expected_id
        )));
    }

    if entry.sentences.is_empty() || entry.sentences.len() > MAX_SENTENCES {
        return Err(JournalError::decode(format!(
            "entry {} has {} sentences, expected 1 to {}",
            entry.id,
            entry.sentences.len(),
            MAX_SENTENCES
        )));
    }
    if entry.sentences.iter().any(|s| s.trim().is_empty()) {
        return Err(JournalError::decode(format!(
            "entry {} contains a blank sentence",
            entry.id
        )));
    }

    Ok(entry)
}
