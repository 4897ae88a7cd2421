//! Blank-marker templates.
//!
//! A template such as `"_____ _____ I'm _____"` mixes literal text with blank
//! markers. A blank marker is a maximal run of three or more underscores.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("_{3,}").expect("blank marker pattern is valid"));

/// Placeholder shown for an empty blank when rendering a preview.
pub const EMPTY_BLANK: &str = "_____";

/// One piece of a decomposed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, kept verbatim (including surrounding spaces).
    Literal(String),
    /// A fillable blank carrying its 0-based position among blanks.
    Blank(usize),
}

/// A template split into literal and blank segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    blank_count: usize,
}

impl Template {
    /// Decompose `raw` into ordered segments.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut blank_count = 0;
        let mut cursor = 0;

        for marker in BLANK_MARKER.find_iter(raw) {
            if marker.start() > cursor {
                segments.push(Segment::Literal(raw[cursor..marker.start()].to_string()));
            }
            segments.push(Segment::Blank(blank_count));
            blank_count += 1;
            cursor = marker.end();
        }
        if cursor < raw.len() {
            segments.push(Segment::Literal(raw[cursor..].to_string()));
        }

        Self {
            segments,
            blank_count,
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.blank_count
    }

    /// Render the template, filling blanks via `fill`.
    pub fn render<'a>(&self, mut fill: impl FnMut(usize) -> &'a str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Blank(idx) => out.push_str(fill(*idx)),
            }
        }
        normalize_whitespace(&out)
    }
}

/// Number of blank markers in `template`.
#[must_use]
pub fn count_blanks(template: &str) -> usize {
    BLANK_MARKER.find_iter(template).count()
}

/// Collapse whitespace runs to single spaces and trim both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_maximal_runs_only() {
        assert_eq!(count_blanks("_____ _____ I'm _____"), 3);
        assert_eq!(count_blanks("a ___ b"), 1);
        assert_eq!(count_blanks("a__b"), 0);
        assert_eq!(count_blanks("__________"), 1);
        assert_eq!(count_blanks("no blanks here"), 0);
    }

    #[test]
    fn parse_keeps_literal_text_between_blanks() {
        let template = Template::parse("_____ _____ I'm _____");
        assert_eq!(template.blank_count(), 3);
        assert_eq!(
            template.segments(),
            &[
                Segment::Blank(0),
                Segment::Literal(" ".into()),
                Segment::Blank(1),
                Segment::Literal(" I'm ".into()),
                Segment::Blank(2),
            ]
        );
    }

    #[test]
    fn parse_trailing_literal() {
        let template = Template::parse("He said ____ criteria.");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("He said ".into()),
                Segment::Blank(0),
                Segment::Literal(" criteria.".into()),
            ]
        );
    }

    #[test]
    fn render_normalizes_whitespace() {
        let template = Template::parse("  ___   and ___ ");
        let words = ["this", "that"];
        assert_eq!(template.render(|i| words[i]), "this and that");
    }

    #[test]
    fn normalize_collapses_tabs_and_newlines() {
        assert_eq!(normalize_whitespace(" a \t b\n\nc "), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
    }
}
