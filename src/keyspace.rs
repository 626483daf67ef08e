//! Mapping between calendar days and storage keys.
//!
//! Journal entries share the key-value store with anything else the host
//! keeps there, so journal keys are recognised by a fixed prefix followed by
//! a canonical `YYYY-MM-DD` date. A key that only shares the prefix is not a
//! journal key.
use chrono::NaiveDate;

/// Prefix used by the mobile app for every journal key.
pub const DEFAULT_KEY_PREFIX: &str = "journal_";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The key convention for one journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Default for Keyspace {
    fn default() -> Self {
        Keyspace::new(DEFAULT_KEY_PREFIX)
    }
}

impl Keyspace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Keyspace {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Storage key for the entry of `date`.
    pub fn key_for(&self, date: NaiveDate) -> String {
        format!("{}{}", self.prefix, date.format(DATE_FORMAT))
    }

    /// Recovers the date encoded in a journal key, without reading it.
    ///
    /// Returns `None` for keys outside the journal keyspace, including keys
    /// whose date part is not in canonical zero-padded form.
    pub fn date_of(&self, key: &str) -> Option<NaiveDate> {
        let rest = key.strip_prefix(self.prefix.as_str())?;
        let date = NaiveDate::parse_from_str(rest, DATE_FORMAT).ok()?;
        (date.format(DATE_FORMAT).to_string() == rest).then_some(date)
    }

    pub fn is_journal_key(&self, key: &str) -> bool {
        self.date_of(key).is_some()
    }
}
