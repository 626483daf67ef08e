use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error, info, trace, warn};

use crate::{
    codec, Clock, EntryDraft, JournalEntry, JournalError, KeyValueStore, Keyspace, MonthAnchor,
    Result, SystemClock, MAX_SENTENCES,
};

/// Reads and writes journal entries in a shared key-value store.
///
/// The store is the only writer of journal keys. Every operation goes to the
/// backing storage; nothing is cached between calls.
pub struct JournalStore {
    /// Backing key-value storage
    kv: Arc<dyn KeyValueStore>,

    /// Where "today" comes from
    clock: Arc<dyn Clock>,

    /// Naming convention for journal keys
    keyspace: Keyspace,
}

impl JournalStore {
    /// Creates a store over `kv` using the system clock and the default keyspace.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_parts(kv, Arc::new(SystemClock), Keyspace::default())
    }

    pub fn with_parts(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, keyspace: Keyspace) -> Self {
        Self {
            kv,
            clock,
            keyspace,
        }
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The month containing today, evaluated on every call.
    pub fn current_anchor(&self) -> MonthAnchor {
        MonthAnchor::of(self.clock.today())
    }

    /// Today's entry, if one has been saved and can still be read.
    pub async fn get_today(&self) -> Result<Option<JournalEntry>> {
        self.get_entry(self.clock.today()).await
    }

    /// The entry for `date`.
    ///
    /// A stored value that no longer decodes is logged and reported as absent;
    /// only storage failures are returned as errors.
    pub async fn get_entry(&self, date: NaiveDate) -> Result<Option<JournalEntry>> {
        let key = self.keyspace.key_for(date);
        debug!("Loading journal entry {}", key);

        let Some(raw) = self.kv.get(&key).await? else {
            trace!("No entry stored under {}", key);
            return Ok(None);
        };

        match codec::decode(&raw) {
            Ok(entry) if entry.date == date => Ok(Some(entry)),
            Ok(entry) => {
                warn!(
                    "Ignoring entry under {} whose date is {}",
                    key, entry.date
                );
                Ok(None)
            }
            Err(e) => {
                warn!("Ignoring unreadable entry under {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Validates `draft` and stores it as today's entry, replacing any earlier
    /// entry for today.
    ///
    /// Blank sentences are dropped first. Nothing is written when the draft is
    /// rejected.
    pub async fn save(&self, draft: EntryDraft) -> Result<JournalEntry> {
        let entry = validate(draft, self.clock.today())?;
        let key = self.keyspace.key_for(entry.date);
        info!("Saving journal entry: {}", entry.id);

        let value = codec::encode(&entry)?;
        self.kv.set(&key, &value).await.map_err(|e| {
            error!("Failed to write entry {}: {}", key, e);
            e
        })?;

        info!("Journal entry saved successfully: {}", entry.id);
        Ok(entry)
    }

    /// Entries dated within `anchor`, most recent first.
    pub async fn list_month(&self, anchor: MonthAnchor) -> Result<Vec<JournalEntry>> {
        let mut entries: Vec<JournalEntry> = self
            .load_journal()
            .await?
            .into_iter()
            .filter(|entry| anchor.contains(entry.date))
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        debug!("Found {} entries for {}", entries.len(), anchor);
        Ok(entries)
    }

    /// Every readable entry, oldest first.
    pub async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = self.load_journal().await?;
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(entries)
    }

    /// Deletes every journal entry and nothing else. Returns how many keys
    /// were removed.
    pub async fn clear_all(&self) -> Result<usize> {
        let keys = self.journal_keys().await?;
        info!("Clearing {} journal entries", keys.len());

        if !keys.is_empty() {
            self.kv.multi_remove(&keys).await.map_err(|e| {
                error!("Failed to clear journal entries: {}", e);
                e
            })?;
        }

        Ok(keys.len())
    }

    /// All keys in the store that belong to the journal.
    async fn journal_keys(&self) -> Result<Vec<String>> {
        let keys: Vec<String> = self
            .kv
            .get_all_keys()
            .await?
            .into_iter()
            .filter(|key| self.keyspace.is_journal_key(key))
            .collect();
        trace!("{} journal keys present", keys.len());
        Ok(keys)
    }

    /// Reads and decodes the whole journal. Values that fail to decode, or
    /// whose date disagrees with their key, are skipped.
    async fn load_journal(&self) -> Result<Vec<JournalEntry>> {
        let keys = self.journal_keys().await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::with_capacity(keys.len());
        let mut skipped = 0usize;

        for (key, value) in self.kv.multi_get(&keys).await? {
            let Some(raw) = value else {
                // removed between enumeration and read
                continue;
            };
            match codec::decode(&raw) {
                Ok(entry) if self.keyspace.date_of(&key) == Some(entry.date) => {
                    entries.push(entry)
                }
                Ok(entry) => {
                    warn!("Skipping entry under {} dated {}", key, entry.date);
                    skipped += 1;
                }
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", key, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} unreadable journal entries", skipped);
        }
        Ok(entries)
    }
}

/// Turns a draft into the entry that would be stored for `date`.
fn validate(draft: EntryDraft, date: NaiveDate) -> Result<JournalEntry> {
    let sentences = draft.filled_sentences();
    if sentences.is_empty() {
        return Err(JournalError::validation("write at least one sentence"));
    }
    if sentences.len() > MAX_SENTENCES {
        return Err(JournalError::validation(format!(
            "at most {} sentences per day, got {}",
            MAX_SENTENCES,
            sentences.len()
        )));
    }
    let Some(mood) = draft.mood else {
        return Err(JournalError::validation("select a mood first"));
    };

    Ok(JournalEntry::new(date, sentences, mood, draft.emotions))
}
