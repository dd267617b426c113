use hashbrown::HashMap;

use crate::common::{BOS_EOS_CONNECTION_ID, BOS_EOS_FEATURE};
use crate::dictionary::connector::Connector;
use crate::dictionary::lexicon::{LexMatch, WordParam};
use crate::dictionary::{LexType, WordIdx};
use crate::errors::{Result, TsumugiError};

const BOS_EOS_WORD_ID: u32 = 0;

struct SyntheticEntry {
    surface: Vec<char>,
    param: WordParam,
    feature: String,
}

/// Entries that bypass the trie: the sentence sentinels and injected words.
pub struct SyntheticEntries {
    entries: Vec<SyntheticEntry>,  // BOS/EOS at BOS_EOS_WORD_ID
    first_chars: HashMap<char, Vec<u32>>,
}

impl Default for SyntheticEntries {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticEntries {
    pub fn new() -> Self {
        let sentinel = SyntheticEntry {
            surface: vec![],
            param: WordParam::new(BOS_EOS_CONNECTION_ID, BOS_EOS_CONNECTION_ID, 0),
            feature: BOS_EOS_FEATURE.to_string(),
        };
        Self {
            entries: vec![sentinel],
            first_chars: HashMap::new(),
        }
    }

    /// Entry placed before the first character.
    #[inline(always)]
    pub fn begin_of_sentence(&self) -> (WordIdx, WordParam) {
        self.sentinel()
    }

    /// Entry placed after the last character.
    #[inline(always)]
    pub fn end_of_sentence(&self) -> (WordIdx, WordParam) {
        self.sentinel()
    }

    #[inline(always)]
    fn sentinel(&self) -> (WordIdx, WordParam) {
        let e = &self.entries[BOS_EOS_WORD_ID as usize];
        (WordIdx::new(LexType::Synthetic, BOS_EOS_WORD_ID), e.param)
    }

    /// Registers a forced entry, returning its identifier.
    pub fn inject(&mut self, surface: &str, param: WordParam, feature: &str) -> Result<WordIdx> {
        let surface: Vec<_> = surface.chars().collect();
        let first = *surface
            .first()
            .ok_or_else(|| TsumugiError::invalid_argument("surface", "must not be empty."))?;
        let word_id = u32::try_from(self.entries.len())?;
        self.entries.push(SyntheticEntry {
            surface,
            param,
            feature: feature.to_string(),
        });
        self.first_chars.entry(first).or_default().push(word_id);
        Ok(WordIdx::new(LexType::Synthetic, word_id))
    }

    /// Returns the number of injected entries.
    pub fn num_injected(&self) -> usize {
        self.entries.len() - 1
    }

    /// Enumerates injected entries whose surface is a prefix of `input`,
    /// in injection order.
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = LexMatch> + 'a {
        input
            .first()
            .and_then(|c| self.first_chars.get(c))
            .into_iter()
            .flatten()
            .filter_map(move |&word_id| {
                let e = &self.entries[word_id as usize];
                input.starts_with(&e.surface).then(|| {
                    LexMatch::new(
                        WordIdx::new(LexType::Synthetic, word_id),
                        e.param,
                        e.surface.len(),
                    )
                })
            })
    }

    pub fn word_param(&self, word_idx: WordIdx) -> Option<WordParam> {
        debug_assert_eq!(word_idx.lex_type, LexType::Synthetic);
        self.entries.get(word_idx.word_id as usize).map(|e| e.param)
    }

    pub fn word_feature(&self, word_idx: WordIdx) -> Option<&str> {
        debug_assert_eq!(word_idx.lex_type, LexType::Synthetic);
        self.entries
            .get(word_idx.word_id as usize)
            .map(|e| e.feature.as_str())
    }

    /// Checks if all connection ids are within the matrix.
    pub fn verify(&self, conn: &Connector) -> bool {
        self.entries
            .iter()
            .all(|e| conn.contains(e.param.right_id, e.param.left_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let entries = SyntheticEntries::new();
        let (bos, bos_param) = entries.begin_of_sentence();
        let (eos, eos_param) = entries.end_of_sentence();
        assert_eq!(bos, eos);
        assert_eq!(bos_param, WordParam::new(0, 0, 0));
        assert_eq!(eos_param, WordParam::new(0, 0, 0));
        assert_eq!(entries.word_feature(bos), Some("BOS/EOS"));
        assert_eq!(entries.num_injected(), 0);
    }

    #[test]
    fn test_inject_and_match() {
        let mut entries = SyntheticEntries::new();
        let a = entries
            .inject("東京", WordParam::new(1, 1, -100), "forced")
            .unwrap();
        let b = entries
            .inject("東京タワー", WordParam::new(1, 1, -200), "forced")
            .unwrap();
        entries.inject("京都", WordParam::new(1, 1, 0), "other").unwrap();

        let input: Vec<_> = "東京タワー".chars().collect();
        let matches: Vec<_> = entries.common_prefix_iterator(&input).collect();
        assert_eq!(
            matches,
            vec![
                LexMatch::new(a, WordParam::new(1, 1, -100), 2),
                LexMatch::new(b, WordParam::new(1, 1, -200), 5),
            ]
        );
        assert_eq!(entries.common_prefix_iterator(&input[1..]).count(), 0);
        assert_eq!(entries.common_prefix_iterator(&[]).count(), 0);
    }

    #[test]
    fn test_empty_surface() {
        let mut entries = SyntheticEntries::new();
        assert!(entries.inject("", WordParam::default(), "*").is_err());
    }
}
