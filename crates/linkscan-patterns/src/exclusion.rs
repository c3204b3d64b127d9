//! False-positive exclusion filter.
//!
//! A flat list of substrings; any hit suppresses classification outright.

use aho_corasick::{AhoCorasick, MatchKind};

use linkscan_common::{LinkscanError, Result};

#[derive(Debug, Clone, Default)]
pub struct FalsePositiveFilter {
    /// Lowercased entries; index = automaton pattern id.
    entries: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl FalsePositiveFilter {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lowered: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            if entry.trim().is_empty() {
                return Err(LinkscanError::config("exclusion list contains an empty entry"));
            }
            let entry = entry.to_lowercase();
            if !lowered.contains(&entry) {
                lowered.push(entry);
            }
        }

        let automaton = if lowered.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&lowered)
                .map_err(|e| {
                    LinkscanError::config(format!("cannot build exclusion automaton: {e}"))
                })?;
            Some(ac)
        };

        Ok(Self {
            entries: lowered,
            automaton,
        })
    }

    /// A filter that never fires.
    pub fn empty() -> Self {
        Self::default()
    }

    /// First exclusion entry (declaration order) contained in `text`.
    /// `text` must already be lowercased.
    pub fn matched_exclusion(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }
        let ac = self.automaton.as_ref()?;
        ac.find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|idx| self.entries[idx].as_str())
    }

    pub fn is_false_positive(&self, text: &str) -> bool {
        self.matched_exclusion(text).is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
