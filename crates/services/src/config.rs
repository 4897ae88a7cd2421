use std::env;

use quiz_core::model::Difficulty;

pub const DEFAULT_DATA_PATH: &str = "public/questions.csv";
pub const DEFAULT_QUESTION_COUNT: usize = 9;
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 600;

/// Where the question table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    File(String),
    Url(String),
}

/// Session settings, read from `QUIZ_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub data: DataLocation,
    pub question_count: usize,
    pub time_limit_secs: u32,
    pub difficulty: Difficulty,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data: DataLocation::File(DEFAULT_DATA_PATH.into()),
            question_count: DEFAULT_QUESTION_COUNT,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            difficulty: Difficulty::University,
        }
    }
}

impl QuizConfig {
    /// Defaults overridden by any valid `QUIZ_*` variables; invalid values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("QUIZ_DATA_URL").filter(|v| !v.trim().is_empty()) {
            config.data = DataLocation::Url(url);
        } else if let Some(path) = lookup("QUIZ_DATA_PATH").filter(|v| !v.trim().is_empty()) {
            config.data = DataLocation::File(path);
        }
        if let Some(count) = lookup("QUIZ_QUESTION_COUNT")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            config.question_count = count;
        }
        if let Some(secs) = lookup("QUIZ_TIME_LIMIT_SECS").and_then(|v| v.parse().ok()) {
            config.time_limit_secs = secs;
        }
        if let Some(difficulty) = lookup("QUIZ_DIFFICULTY").and_then(|v| v.parse().ok()) {
            config.difficulty = difficulty;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        assert_eq!(QuizConfig::from_lookup(|_| None), QuizConfig::default());
    }

    #[test]
    fn env_overrides_and_ignores_garbage() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_DATA_URL", "https://example.test/questions.csv"),
            ("QUIZ_DATA_PATH", "ignored.csv"),
            ("QUIZ_QUESTION_COUNT", "5"),
            ("QUIZ_TIME_LIMIT_SECS", "soon"),
            ("QUIZ_DIFFICULTY", "High School"),
        ]));
        assert_eq!(
            config.data,
            DataLocation::Url("https://example.test/questions.csv".into())
        );
        assert_eq!(config.question_count, 5);
        assert_eq!(config.time_limit_secs, DEFAULT_TIME_LIMIT_SECS);
        assert_eq!(config.difficulty, Difficulty::HighSchool);
    }

    #[test]
    fn zero_question_count_is_ignored() {
        let config = QuizConfig::from_lookup(lookup(&[("QUIZ_QUESTION_COUNT", "0")]));
        assert_eq!(config.question_count, DEFAULT_QUESTION_COUNT);
    }
}
