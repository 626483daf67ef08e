use crate::MAX_SENTENCES;

/// Marker that starts a comment line in the editor template.
const COMMENT_PREFIX: &str = "#";

/// Text placed in the editor for `write --edit`, pre-filled with `existing`.
pub fn editor_template(existing: &[String]) -> String {
    let mut template = String::new();
    for sentence in existing {
        template.push_str(sentence);
        template.push('\n');
    }
    template.push_str(&format!(
        "\n# Write up to {} short sentences about today, one per line.\n",
        MAX_SENTENCES
    ));
    template.push_str("# Lines starting with # are ignored. Save and exit when done.\n");
    template
}

/// Sentences from edited text: every non-blank line that is not a comment.
pub fn sentences_from_editor(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT_PREFIX))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Shortens `text` to at most `max_chars` characters for one-line previews.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
