use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal shown in the output region while a lookup is in flight.
pub const LOADING_INDICATOR: &str = "...loading";
/// Literal shown when the service answered with an empty result list.
pub const NO_RESULTS_INDICATOR: &str = "(no results)";

/// Which relation a lookup asks the word service for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Rhyme,
    Synonym,
}

impl QueryMode {
    /// Query parameter selecting this relation on the `words` endpoint.
    pub const fn relation_param(self) -> &'static str {
        match self {
            QueryMode::Rhyme => "rel_rhy",
            QueryMode::Synonym => "ml",
        }
    }

    /// Description line announced for a lookup of `term` in this mode.
    pub fn description(self, term: &str) -> String {
        match self {
            QueryMode::Rhyme => format!("Words that rhyme with {term}: "),
            QueryMode::Synonym => format!("Words with a meaning similar to {term}: "),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Rhyme => write!(f, "rhyme"),
            QueryMode::Synonym => write!(f, "synonym"),
        }
    }
}

/// One record from the word service. Rhyme responses carry a syllable count;
/// synonym responses usually do not. Extra wire fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub word: String,
    #[serde(
        rename = "numSyllables",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub num_syllables: Option<u32>,
}

impl WordResult {
    pub fn new(word: impl Into<String>, num_syllables: Option<u32>) -> Self {
        Self {
            word: word.into(),
            num_syllables,
        }
    }
}

/// Grouping key for rhyme results: the syllable count, with a trailing bucket
/// for records the service returned without one. The derived `Ord` is the
/// display order, counted groups ascending with the unknown group last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Counted(u32),
    Unknown,
}

impl GroupKey {
    pub fn from_count(count: Option<u32>) -> Self {
        match count {
            Some(n) => GroupKey::Counted(n),
            None => GroupKey::Unknown,
        }
    }

    pub const fn count(self) -> Option<u32> {
        match self {
            GroupKey::Counted(n) => Some(n),
            GroupKey::Unknown => None,
        }
    }

    /// Header label: singular only for a count of exactly one; the unknown
    /// bucket takes the plural fallback.
    pub fn heading(self) -> String {
        match self {
            GroupKey::Counted(1) => "1 syllable".to_string(),
            GroupKey::Counted(n) => format!("{n} syllables"),
            GroupKey::Unknown => "unknown syllables".to_string(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.heading())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGroup {
    pub key: GroupKey,
    pub words: Vec<WordResult>,
}

/// Content cell of the view: whatever the output region currently renders.
/// Recreated fresh on every query, never cached across queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Blank,
    Loading,
    NoResults,
    /// Rhyme results, bucketed by syllable count, fewest first.
    Grouped(Vec<WordGroup>),
    /// Synonym results in service order, unlabelled.
    Flat(Vec<WordResult>),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Blank => Ok(()),
            Output::Loading => f.write_str(LOADING_INDICATOR),
            Output::NoResults => f.write_str(NO_RESULTS_INDICATOR),
            Output::Grouped(groups) => {
                let mut first = true;
                for group in groups {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "{}:", group.key)?;
                    for word in &group.words {
                        write!(f, "\n  {}", word.word)?;
                    }
                }
                Ok(())
            }
            Output::Flat(words) => {
                let mut first = true;
                for word in words {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    f.write_str(&word.word)?;
                }
                Ok(())
            }
        }
    }
}
