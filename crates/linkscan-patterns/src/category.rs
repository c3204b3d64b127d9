//! Pattern categories: a named, weighted group of triggers.

use aho_corasick::{AhoCorasick, MatchKind};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use linkscan_common::{LinkscanError, Result};

/// How literal triggers are matched against the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain case-insensitive containment. "zte" matches inside "aztec".
    #[default]
    Substring,
    /// Containment bounded by non-alphanumeric characters (or text edges).
    Word,
}

/// Declarative form of a category, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Literal triggers, in priority order.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Regex triggers, tried after every literal trigger.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            match_mode: MatchMode::Substring,
            triggers: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers.extend(triggers.into_iter().map(Into::into));
        self
    }

    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// A compiled category. Immutable once built.
#[derive(Debug, Clone)]
pub struct PatternCategory {
    name: String,
    weight: u32,
    mode: MatchMode,
    /// Lowercased literal triggers; index = automaton pattern id.
    triggers: Vec<String>,
    automaton: Option<AhoCorasick>,
    regexes: Vec<Regex>,
}

impl PatternCategory {
    pub fn compile(spec: &CategorySpec) -> Result<Self> {
        if spec.name.trim().is_empty() {
            return Err(LinkscanError::config("category name must not be empty"));
        }

        let mut triggers: Vec<String> = Vec::with_capacity(spec.triggers.len());
        for raw in &spec.triggers {
            if raw.trim().is_empty() {
                return Err(LinkscanError::config(format!(
                    "category `{}` contains an empty trigger",
                    spec.name
                )));
            }
            let lowered = raw.to_lowercase();
            if !triggers.contains(&lowered) {
                triggers.push(lowered);
            }
        }

        let automaton = if triggers.is_empty() {
            None
        } else {
            // Standard semantics so overlapping iteration reports every trigger.
            let ac = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&triggers)
                .map_err(|e| LinkscanError::InvalidPattern {
                    category: spec.name.clone(),
                    pattern: "<literal triggers>".to_string(),
                    reason: e.to_string(),
                })?;
            Some(ac)
        };

        let mut regexes = Vec::with_capacity(spec.patterns.len());
        for pattern in &spec.patterns {
            if pattern.trim().is_empty() {
                return Err(LinkscanError::config(format!(
                    "category `{}` contains an empty regex pattern",
                    spec.name
                )));
            }
            let re = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| LinkscanError::InvalidPattern {
                    category: spec.name.clone(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
            regexes.push(re);
        }

        Ok(Self {
            name: spec.name.clone(),
            weight: spec.weight,
            mode: spec.match_mode,
            triggers,
            automaton,
            regexes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Lowercased literal triggers in priority order.
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn regex_count(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.regexes.is_empty()
    }

    /// First trigger (in declaration order) found in `text`.
    ///
    /// `text` must already be lowercased. Literal triggers win over regex
    /// patterns; a regex match reports the pattern source as the trigger.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }

        if let Some(ac) = &self.automaton {
            let best = ac
                .find_overlapping_iter(text)
                .filter(|m| {
                    self.mode == MatchMode::Substring || is_word_bounded(text, m.start(), m.end())
                })
                .map(|m| m.pattern().as_usize())
                .min();
            if let Some(idx) = best {
                return Some(&self.triggers[idx]);
            }
        }

        self.regexes
            .iter()
            .find(|re| re.is_match(text))
            .map(|re| re.as_str())
    }

    /// True if any trigger matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}

/// True when the span is not glued to an alphanumeric neighbour.
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
