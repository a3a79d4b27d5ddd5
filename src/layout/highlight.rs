//! Keyword bolding.
//!
//! Only the first keyword (in list order) found in a string is bolded; every
//! occurrence of that keyword is split into its own bold run and all other
//! keywords in the same string stay plain.

use crate::model::TextRun;
use regex::{Regex, RegexBuilder};

/// Keywords bolded in experience text, in priority order.
pub const HIGHLIGHT_KEYWORDS: [&str; 6] = [
    "AWS",
    "Amazon",
    "Google",
    "Data Center",
    "Microsoft",
    "data center",
];

/// Case-insensitive first-match-wins keyword highlighter.
pub struct Highlighter {
    patterns: Vec<Regex>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Highlighter for [`HIGHLIGHT_KEYWORDS`].
    pub fn new() -> Self {
        Self::with_keywords(&HIGHLIGHT_KEYWORDS)
    }

    /// Highlighter for a custom keyword list.
    pub fn with_keywords(keywords: &[&str]) -> Self {
        let patterns = keywords
            .iter()
            .map(|kw| {
                RegexBuilder::new(&regex::escape(kw))
                    .case_insensitive(true)
                    .build()
                    .expect("escaped keyword is a valid pattern")
            })
            .collect();
        Self { patterns }
    }

    /// Split `text` into runs, bolding the first matching keyword.
    pub fn highlight(&self, text: &str) -> Vec<TextRun> {
        let Some(pattern) = self.patterns.iter().find(|p| p.is_match(text)) else {
            return vec![TextRun::plain(text)];
        };

        let mut runs = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                runs.push(TextRun::plain(&text[last..m.start()]));
            }
            runs.push(TextRun::bold(m.as_str()));
            last = m.end();
        }
        if last < text.len() {
            runs.push(TextRun::plain(&text[last..]));
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(runs: &[TextRun]) -> Vec<(&str, bool)> {
        runs.iter().map(|r| (r.text.as_str(), r.style.bold)).collect()
    }

    #[test]
    fn test_first_keyword_wins() {
        let runs = Highlighter::new().highlight("Worked at AWS and Google");
        assert_eq!(
            describe(&runs),
            vec![("Worked at ", false), ("AWS", true), (" and Google", false)]
        );
    }

    #[test]
    fn test_list_order_not_position() {
        let runs = Highlighter::new().highlight("Google Cloud then Amazon");
        assert_eq!(
            describe(&runs),
            vec![("Google Cloud then ", false), ("Amazon", true)]
        );
    }

    #[test]
    fn test_every_occurrence_case_insensitive() {
        let runs = Highlighter::new().highlight("aws migration, then AWS support");
        assert_eq!(
            describe(&runs),
            vec![
                ("aws", true),
                (" migration, then ", false),
                ("AWS", true),
                (" support", false)
            ]
        );
    }

    #[test]
    fn test_no_keyword() {
        let runs = Highlighter::new().highlight("Hospital expansion");
        assert_eq!(describe(&runs), vec![("Hospital expansion", false)]);
    }

    #[test]
    fn test_custom_keywords_are_escaped() {
        let runs = Highlighter::with_keywords(&["C++"]).highlight("Wrote C++ daily");
        assert_eq!(
            describe(&runs),
            vec![("Wrote ", false), ("C++", true), (" daily", false)]
        );
    }
}
