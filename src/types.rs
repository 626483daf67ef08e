//! Shared types for the mindful journal: the crate `Result` alias and the
//! command-line subcommands.
use clap::Subcommand;

use crate::{Emotion, JournalError, Mood, MonthAnchor};

/// A specialized Result type for journal operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Available subcommands for the mindful application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write (or rewrite) today's entry
    Write {
        /// A sentence for today; repeat for up to three
        #[clap(short, long = "sentence")]
        sentences: Vec<String>,

        /// How the day felt overall
        #[clap(short, long, value_enum)]
        mood: Option<Mood>,

        /// Emotions to tag the day with (comma-separated)
        #[clap(short, long, value_enum, value_delimiter = ',')]
        emotions: Vec<Emotion>,

        /// Drop the emotions kept from an earlier save today
        #[clap(long, conflicts_with = "emotions")]
        clear_emotions: bool,

        /// Write the sentences in an editor, one per line
        #[clap(long)]
        edit: bool,
    },

    /// Show today's entry
    Today {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List a month's entries with its mood breakdown
    Month {
        /// Month to show as YYYY-MM (defaults to the current month)
        month: Option<MonthAnchor>,

        /// Move this many months forward (negative for backward)
        #[clap(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show only the mood breakdown for a month
    Stats {
        /// Month to summarize as YYYY-MM (defaults to the current month)
        month: Option<MonthAnchor>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Summarize the whole journal
    Summary,

    /// Delete every journal entry
    Clear {
        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
