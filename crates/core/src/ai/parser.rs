//! Extraction of a triage label from a model response.
//!
//! Models asked for a single word sometimes reason aloud first, so the answer is usually the
//! last line. The parser tries, in order:
//! 1. the last line that is exactly a label (case-insensitive, surrounding whitespace ignored),
//! 2. the last non-empty line, returned verbatim (trimmed) for the caller to judge.

use crate::triage::TriageLevel;

/// Outcome of parsing a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMatch {
    /// A line matched one of the four labels exactly.
    Exact(TriageLevel),
    /// No line matched; this is the last non-empty line.
    LastLine(String),
    /// The response had no non-empty lines.
    Empty,
}

/// Parses a raw model response.
pub fn parse_triage_answer(response: &str) -> LabelMatch {
    if let Some(level) = response
        .lines()
        .rev()
        .find_map(|line| line.trim().parse::<TriageLevel>().ok())
    {
        return LabelMatch::Exact(level);
    }

    match response.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => LabelMatch::LastLine(line.to_string()),
        None => LabelMatch::Empty,
    }
}

/// Interprets a last-line fallback: a label wrapped in punctuation or markdown is accepted.
pub(crate) fn loose_label(line: &str) -> Option<TriageLevel> {
    line.trim_matches(|c: char| !c.is_ascii_alphabetic())
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_answer() {
        assert_eq!(
            parse_triage_answer("Urgent"),
            LabelMatch::Exact(TriageLevel::Urgent)
        );
        assert_eq!(
            parse_triage_answer("  critical \n"),
            LabelMatch::Exact(TriageLevel::Critical)
        );
    }

    #[test]
    fn reasoning_before_answer() {
        let response = "The patient reports chest pain.\nThis needs prompt review.\n\nUrgent\n";
        assert_eq!(
            parse_triage_answer(response),
            LabelMatch::Exact(TriageLevel::Urgent)
        );
    }

    #[test]
    fn last_exact_line_wins() {
        let response = "Low\nOn reflection:\nCritical\nbecause of the seizure";
        assert_eq!(
            parse_triage_answer(response),
            LabelMatch::Exact(TriageLevel::Critical)
        );
    }

    #[test]
    fn label_inside_sentence_is_not_exact() {
        assert_eq!(
            parse_triage_answer("I would say Moderate.\n"),
            LabelMatch::LastLine("I would say Moderate.".into())
        );
    }

    #[test]
    fn falls_back_to_last_non_empty_line() {
        assert_eq!(
            parse_triage_answer("first\n**Low**\n   \n"),
            LabelMatch::LastLine("**Low**".into())
        );
    }

    #[test]
    fn blank_response() {
        assert_eq!(parse_triage_answer(""), LabelMatch::Empty);
        assert_eq!(parse_triage_answer("\n  \n"), LabelMatch::Empty);
    }

    #[test]
    fn loose_label_strips_decoration() {
        assert_eq!(loose_label("**Low**"), Some(TriageLevel::Low));
        assert_eq!(loose_label("Urgent."), Some(TriageLevel::Urgent));
        assert_eq!(loose_label("I would say Moderate."), None);
    }
}
