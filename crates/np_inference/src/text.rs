//! Local post-processing applied to model output before it is stored.

/// Hard character clamp with an ellipsis marker. `max` includes the
/// three marker characters.
pub fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clamped: String = text.chars().take(max - 3).collect();
    clamped.push_str("...");
    clamped
}

/// Collapse every newline run into a single space.
pub fn collapse_newlines(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Collapse runs of blank lines so paragraphs are separated by exactly
/// one empty line.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    out.trim().to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rebuild the text sentence by sentence until the word budget runs
/// out, discarding the partially fitting remainder. Sentences are split
/// on the literal ". " on purpose; see the module tests.
pub fn truncate_sentences(text: &str, word_budget: usize) -> String {
    let mut result = String::new();
    let mut words = 0;
    for sentence in text.split(". ") {
        let sentence_words = word_count(sentence);
        if words + sentence_words > word_budget {
            break;
        }
        result.push_str(sentence);
        result.push_str(". ");
        words += sentence_words;
    }
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_leaves_short_text_alone() {
        assert_eq!(clamp_chars("short", 500), "short");
    }

    #[test]
    fn clamp_truncates_with_marker() {
        let long = "x".repeat(600);
        let clamped = clamp_chars(&long, 500);
        assert_eq!(clamped.chars().count(), 500);
        assert!(clamped.ends_with("..."));
    }

    #[test]
    fn newline_runs_become_single_spaces() {
        assert_eq!(
            collapse_newlines("one\ntwo\n\n\nthree"),
            "one two three"
        );
    }

    #[test]
    fn blank_line_runs_become_paragraph_breaks() {
        assert_eq!(
            collapse_blank_lines("first paragraph\n\n\n\nsecond paragraph"),
            "first paragraph\n\nsecond paragraph"
        );
    }

    #[test]
    fn truncation_keeps_whole_sentences_within_budget() {
        // Ten sentences of ten words each.
        let sentence = "one two three four five six seven eight nine ten";
        let text = vec![sentence; 10].join(". ");

        let truncated = truncate_sentences(&text, 35);
        assert_eq!(word_count(&truncated), 30);
        assert!(truncated.ends_with("ten."));
    }

    #[test]
    fn truncation_stops_at_first_overflow() {
        let text = "a b c. d e f g h i j k l m n. o p";
        // The second sentence does not fit, so nothing after the first
        // sentence survives even though "o p" alone would fit.
        assert_eq!(truncate_sentences(text, 5), "a b c.");
    }
}
