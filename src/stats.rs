//! Mood statistics over a set of entries.
use serde::Serialize;

use crate::{JournalEntry, Mood};

/// Count and share of one mood within a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodStat {
    pub mood: Mood,
    pub count: usize,
    /// Whole-number percentage of the total, 0 when there are no entries
    pub percentage: u32,
}

/// One stat per mood, in `happy, neutral, sad` order.
///
/// Percentages are rounded independently and therefore need not sum to 100.
pub fn summarize(entries: &[JournalEntry]) -> Vec<MoodStat> {
    let mut counts = [0usize; 3];
    for entry in entries {
        counts[mood_index(entry.mood)] += 1;
    }

    let total = entries.len();
    Mood::ALL
        .iter()
        .zip(counts)
        .map(|(&mood, count)| MoodStat {
            mood,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn mood_index(mood: Mood) -> usize {
    match mood {
        Mood::Happy => 0,
        Mood::Neutral => 1,
        Mood::Sad => 2,
    }
}

/// `round(100 * count / total)`, halves rounded up.
fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * count + total) / (2 * total)) as u32
}
