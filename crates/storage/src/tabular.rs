//! Pipe-delimited question tables.
//!
//! Format, one header row then one record per line:
//!
//! ```text
//! id|context|template|scrambledWordsJSON|correctSentence|distractor|difficulty
//! ```

use quiz_core::ingest::{IngestReport, RowIssue, Validator};
use quiz_core::model::QuestionDraft;
use tracing::warn;

/// Number of fields in a well-formed row.
pub const EXPECTED_COLUMNS: usize = 7;

/// How strictly the field count of each row is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    /// Rows need at least seven fields; trailing extras are ignored.
    #[default]
    AtLeast,
    /// Rows need exactly seven fields. Used by the pre-release validator.
    Exact,
}

impl ColumnPolicy {
    fn accepts(self, found: usize) -> bool {
        match self {
            ColumnPolicy::AtLeast => found >= EXPECTED_COLUMNS,
            ColumnPolicy::Exact => found == EXPECTED_COLUMNS,
        }
    }
}

/// Parse and validate a whole table.
///
/// Row numbers in diagnostics are 1-based line numbers of the input, so the
/// header is normally row 1. Blank lines are skipped. This never fails: every
/// problem ends up in the report's diagnostics.
#[must_use]
pub fn parse_tabular(text: &str, policy: ColumnPolicy) -> IngestReport {
    let mut validator = Validator::new();
    let mut header_seen = false;

    for (idx, line) in text.lines().enumerate() {
        let row = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }
        parse_row(&mut validator, row, line, policy);
    }

    validator.finish()
}

fn parse_row(validator: &mut Validator, row: usize, line: &str, policy: ColumnPolicy) {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let found = fields.len();
    let id = (found > 1).then(|| fields[0]);

    if !policy.accepts(found) {
        validator.reject(
            row,
            id,
            RowIssue::FieldCount {
                expected: EXPECTED_COLUMNS,
                found,
            },
        );
        return;
    }
    if found > EXPECTED_COLUMNS {
        warn!(row, found, "ignoring extra columns");
    }

    let scrambled_words = match serde_json::from_str::<Vec<String>>(fields[3]) {
        Ok(words) => words,
        Err(e) => {
            validator.reject(row, id, RowIssue::ScrambledWordsJson(e.to_string()));
            return;
        }
    };

    let draft = QuestionDraft {
        id: fields[0].to_string(),
        context: fields[1].to_string(),
        template: fields[2].to_string(),
        scrambled_words,
        correct_sentence: fields[4].to_string(),
        distractor: fields[5].to_string(),
        difficulty: Some(fields[6].to_string()),
    };
    validator.submit(row, draft);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::ingest::IssueKind;
    use quiz_core::model::{Difficulty, QuestionError};

    const HEADER: &str = "id|context|template|scrambledWords|correctSentence|distractor|difficulty";

    fn table(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn parses_valid_rows_and_trims_fields() {
        let text = table(&[
            r#" m-1 | How are you? | _____ _____ I'm _____ | ["happy","very","glad"] | very happy I'm glad | sad | Middle School "#,
        ]);
        let report = parse_tabular(&text, ColumnPolicy::AtLeast);

        assert!(report.is_clean());
        let q = &report.questions[0];
        assert_eq!(q.id().as_str(), "m-1");
        assert_eq!(q.context(), "How are you?");
        assert_eq!(q.template(), "_____ _____ I'm _____");
        assert_eq!(q.distractor(), "sad");
        assert_eq!(q.difficulty(), Difficulty::MiddleSchool);
    }

    #[test]
    fn six_field_row_is_rejected_without_failing() {
        let text = table(&[
            r#"m-1|How are you?|_____ _____ I'm _____|["happy","very","glad"]|very happy I'm glad|sad"#,
            r#"m-2|Ready?|I ___ ready|["am"]|I am ready|is|Middle School"#,
        ]);
        let report = parse_tabular(&text, ColumnPolicy::AtLeast);

        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].id().as_str(), "m-2");
        assert_eq!(report.diagnostics.len(), 1);
        let diag = &report.diagnostics[0];
        assert_eq!(diag.row, 2);
        assert_eq!(diag.id.as_deref(), Some("m-1"));
        assert_eq!(
            diag.issue,
            RowIssue::FieldCount {
                expected: 7,
                found: 6
            }
        );
        assert_eq!(report.count_of(IssueKind::Malformed), 1);
    }

    #[test]
    fn blank_word_mismatch_is_rejected() {
        let text = table(&[
            r#"u-1|Why?|___ ___ ___|["because","I"]|because I can|can't|University"#,
        ]);
        let report = parse_tabular(&text, ColumnPolicy::AtLeast);

        assert!(report.questions.is_empty());
        assert_eq!(
            report.diagnostics[0].issue,
            RowIssue::Invalid(QuestionError::BlankMismatch {
                blanks: 3,
                words: 2
            })
        );
    }

    #[test]
    fn bad_json_reports_row_number() {
        let text = table(&["", r#"u-1|Why?|___|[because]|because|so|University"#]);
        let report = parse_tabular(&text, ColumnPolicy::AtLeast);

        assert!(report.questions.is_empty());
        assert_eq!(report.diagnostics[0].row, 3);
        assert!(matches!(
            report.diagnostics[0].issue,
            RowIssue::ScrambledWordsJson(_)
        ));
    }

    #[test]
    fn duplicate_ids_keep_first_row() {
        let text = table(&[
            r#"h-1|First?|I ___|["do"]|I do|did|High School"#,
            r#"h-1|Second?|I ___|["did"]|I did|do|High School"#,
        ]);
        let report = parse_tabular(&text, ColumnPolicy::AtLeast);

        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].context(), "First?");
        assert_eq!(report.diagnostics[0].issue, RowIssue::DuplicateId);
        assert_eq!(report.diagnostics[0].row, 3);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let text = table(&[r#"h-1|Really?|I ___|["do"]|I do|did|Grad School"#]);
        let report = parse_tabular(&text, ColumnPolicy::AtLeast);
        assert_eq!(
            report.diagnostics[0].issue,
            RowIssue::Invalid(QuestionError::UnknownDifficulty("Grad School".into()))
        );
    }

    #[test]
    fn extra_columns_depend_on_policy() {
        let text = table(&[r#"h-1|Really?|I ___|["do"]|I do|did|High School|note"#]);

        let lenient = parse_tabular(&text, ColumnPolicy::AtLeast);
        assert_eq!(lenient.questions.len(), 1);

        let strict = parse_tabular(&text, ColumnPolicy::Exact);
        assert!(strict.questions.is_empty());
        assert_eq!(
            strict.diagnostics[0].issue,
            RowIssue::FieldCount {
                expected: 7,
                found: 8
            }
        );
    }

    #[test]
    fn crlf_and_header_only_inputs() {
        let text = format!("{HEADER}\r\nh-1|Really?|I ___|[\"do\"]|I do|did|High School\r\n");
        assert_eq!(parse_tabular(&text, ColumnPolicy::Exact).questions.len(), 1);

        let empty = parse_tabular(HEADER, ColumnPolicy::AtLeast);
        assert!(empty.is_clean());
        assert!(empty.questions.is_empty());
    }
}
