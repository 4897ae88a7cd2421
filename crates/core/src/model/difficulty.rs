use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target learner level of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Middle School")]
    MiddleSchool,
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "University")]
    University,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::MiddleSchool,
        Difficulty::HighSchool,
        Difficulty::University,
    ];

    /// Label used in the tabular data source.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::MiddleSchool => "Middle School",
            Difficulty::HighSchool => "High School",
            Difficulty::University => "University",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{raw}'")]
pub struct ParseDifficultyError {
    pub raw: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Labels match exactly after trimming; "university" is not "University".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label() == trimmed)
            .ok_or_else(|| ParseDifficultyError {
                raw: trimmed.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels() {
        assert_eq!("Middle School".parse(), Ok(Difficulty::MiddleSchool));
        assert_eq!(" High School ".parse(), Ok(Difficulty::HighSchool));
        assert_eq!("University".parse(), Ok(Difficulty::University));
    }

    #[test]
    fn rejects_unknown_or_misspelled_labels() {
        let err = "Univercity".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.raw, "Univercity");
        assert!("university".parse::<Difficulty>().is_err());
    }

    #[test]
    fn display_matches_label() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
    }
}
