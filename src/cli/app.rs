//! CLI module for the mindful journal
//!
//! This module turns parsed commands into calls on the journal store and
//! renders the results for the terminal.
use std::{
    fs::read_to_string,
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
    sync::Arc,
};

use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    editor_template, preview, sentences_from_editor, summarize, Commands, Config, Emotion,
    EntryDraft, JournalEntry, JournalError, JournalStore, Mood, MonthAnchor, MoodStat,
    Result, RECOMMENDED_SENTENCE_LEN,
};

/// CLI Application handler - processes CLI commands and interfaces with JournalStore
pub struct App {
    /// The journal store backend
    store: Arc<JournalStore>,

    /// Application configuration
    config: Config,

    /// Where `config --set` and `config --reset` write to
    config_path: Option<PathBuf>,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    pub fn new(
        store: Arc<JournalStore>,
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        Self {
            store,
            config,
            config_path,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Write {
                sentences,
                mood,
                emotions,
                clear_emotions,
                edit,
            } => {
                let fields = WriteFields {
                    sentences,
                    mood,
                    emotions,
                    clear_emotions,
                };
                self.write_entry(fields, edit).await?
            }

            Commands::Today { json } => self.show_today(json).await?,

            Commands::Month {
                month,
                offset,
                json,
            } => {
                let anchor = shift(month.unwrap_or_else(|| self.store.current_anchor()), offset)?;
                self.show_month(anchor, json).await?
            }

            Commands::Stats { month, json } => {
                let anchor = month.unwrap_or_else(|| self.store.current_anchor());
                self.show_stats(anchor, json).await?
            }

            Commands::Summary => self.show_summary().await?,

            Commands::Clear { force } => self.clear(force).await?,

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    async fn write_entry(&self, fields: WriteFields, open_editor: bool) -> Result<()> {
        if open_editor && !fields.sentences.is_empty() {
            return Err(JournalError::ApplicationError {
                message: "Cannot specify both --sentence and --edit options".to_string(),
            });
        }

        let existing = self.store.get_today().await?;

        let fields = if open_editor {
            let current = existing
                .as_ref()
                .map(|entry| entry.sentences.clone())
                .unwrap_or_default();
            WriteFields {
                sentences: self.open_editor_for_sentences(&current)?,
                ..fields
            }
        } else {
            fields
        };

        let draft = fields.merge_into(existing.as_ref());

        for sentence in draft.filled_sentences() {
            if sentence.chars().count() > RECOMMENDED_SENTENCE_LEN {
                println!(
                    "Note: \"{}\" is longer than {} characters.",
                    preview(&sentence, 30),
                    RECOMMENDED_SENTENCE_LEN
                );
            }
        }

        let entry = self.store.save(draft).await?;
        println!(
            "{} Entry for {} saved.",
            console::style("Saved!").green().bold(),
            entry.date
        );
        if self.verbose {
            self.display_entry(&entry);
        }
        Ok(())
    }

    fn open_editor_for_sentences(&self, current: &[String]) -> Result<Vec<String>> {
        let temp_file = Builder::new().suffix(".txt").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();
        std::fs::write(&temp_path, editor_template(current))?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor to write today's entry. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(sentences_from_editor(&content))
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| JournalError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let Some((program, rest)) = args.split_first() else {
            return Err(JournalError::EditorError {
                message: "Empty editor command".to_string(),
            });
        };

        debug!("Launching editor {} for {}", program, file_path.display());
        let status = Command::new(program).args(rest).arg(file_path).status()?;

        if !status.success() {
            return Err(JournalError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }

    async fn show_today(&self, json: bool) -> Result<()> {
        match self.store.get_today().await? {
            Some(entry) if json => println!("{}", serde_json::to_string_pretty(&entry)?),
            Some(entry) => self.display_entry(&entry),
            None if json => println!("null"),
            None => println!(
                "Nothing written for {} yet. Use `mindful write` to start.",
                self.store.today()
            ),
        }
        Ok(())
    }

    async fn show_month(&self, anchor: MonthAnchor, json: bool) -> Result<()> {
        let entries = self.store.list_month(anchor).await?;
        let stats = summarize(&entries);

        if json {
            let body = serde_json::json!({
                "month": anchor.to_string(),
                "stats": stats,
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }

        println!("{}", console::style(anchor.label()).bold());
        if entries.is_empty() {
            println!("No entries this month. Start journaling to see your mood patterns!");
            return Ok(());
        }

        self.display_stats(&stats);
        println!();

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }
            self.display_entry_brief(entry);
        }

        println!(
            "\n{} entr{}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" }
        );
        Ok(())
    }

    async fn show_stats(&self, anchor: MonthAnchor, json: bool) -> Result<()> {
        let stats = summarize(&self.store.list_month(anchor).await?);
        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("{}", console::style(anchor.label()).bold());
            self.display_stats(&stats);
        }
        Ok(())
    }

    async fn show_summary(&self) -> Result<()> {
        let entries = self.store.list_all().await?;
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            println!("No journal entries found.");
            return Ok(());
        };

        println!(
            "Found {} journal entr{} from {} to {}.",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            first.date,
            last.date
        );
        self.display_stats(&summarize(&entries));
        Ok(())
    }

    async fn clear(&self, force: bool) -> Result<()> {
        if !force {
            print!(
                "This will permanently delete all your journal entries and cannot be undone. Are you sure? [y/N] "
            );
            stdout().flush()?;

            let mut answer = String::new();
            stdin().read_line(&mut answer)?;
            if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        let removed = self.store.clear_all().await?;
        println!("All journal data has been cleared ({} entries).", removed);
        Ok(())
    }

    fn handle_config(&self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        let mut config = self.config.clone();

        if reset {
            config = Config::default();
        }
        if let Some(assignment) = set {
            config.set(&assignment)?;
        }

        if reset || config != self.config {
            let path = self
                .config_path
                .clone()
                .or_else(Config::default_path)
                .ok_or_else(|| JournalError::ConfigError {
                    message: "no configuration path available".to_string(),
                })?;
            config.save(&path)?;
            println!("Configuration written to {}", path.display());
        }

        if show || !reset {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Ok(())
    }

    fn display_entry(&self, entry: &JournalEntry) {
        println!(
            "{} | {}",
            console::style(entry.date).bold(),
            styled_mood(entry.mood)
        );
        for sentence in &entry.sentences {
            println!("  - {}", sentence);
        }
        if !entry.emotions.is_empty() {
            println!("Emotions: {}", console::style(emotion_list(entry)).cyan());
        }
    }

    fn display_entry_brief(&self, entry: &JournalEntry) {
        println!(
            "{} | {}",
            entry.date.format("%a %d %b"),
            styled_mood(entry.mood)
        );
        if let Some(first) = entry.sentences.first() {
            println!("{}", preview(first, 100));
        }
        if !entry.emotions.is_empty() {
            println!("{}", console::style(emotion_list(entry)).cyan());
        }
    }

    fn display_stats(&self, stats: &[MoodStat]) {
        for stat in stats {
            println!(
                "{:<8} {:>3} ({:>3}%)",
                styled_mood(stat.mood),
                stat.count,
                stat.percentage
            );
        }
    }
}

/// What `write` was asked to change about today's entry.
#[derive(Debug, Default)]
struct WriteFields {
    sentences: Vec<String>,
    mood: Option<Mood>,
    emotions: Vec<Emotion>,
    clear_emotions: bool,
}

impl WriteFields {
    /// Builds the draft to save. Whatever was not given is kept from
    /// `previous`, today's entry if one exists.
    fn merge_into(self, previous: Option<&JournalEntry>) -> EntryDraft {
        let previous = previous.map(EntryDraft::from).unwrap_or_default();
        let sentences = if self.sentences.is_empty() {
            previous.sentences
        } else {
            self.sentences
        };
        let emotions = if self.clear_emotions {
            Vec::new()
        } else if self.emotions.is_empty() {
            previous.emotions
        } else {
            self.emotions
        };
        EntryDraft::new(sentences, self.mood.or(previous.mood), emotions)
    }
}

/// Moves `anchor` by `offset` months.
fn shift(anchor: MonthAnchor, offset: i32) -> Result<MonthAnchor> {
    anchor
        .checked_add_months(offset)
        .ok_or_else(|| JournalError::InvalidMonth {
            value: format!("{} {:+} months", anchor, offset),
        })
}

fn styled_mood(mood: Mood) -> console::StyledObject<&'static str> {
    let style = console::style(mood.as_str());
    match mood {
        Mood::Happy => style.green(),
        Mood::Neutral => style.yellow(),
        Mood::Sad => style.red(),
    }
}

fn emotion_list(entry: &JournalEntry) -> String {
    entry
        .emotions
        .iter()
        .map(|e| format!("#{}", e))
        .collect::<Vec<_>>()
        .join(" ")
}
