mod builder;
mod feature;
pub(crate) mod map;
mod param;

use bincode::{Decode, Encode};

use crate::dictionary::connector::Connector;
use crate::dictionary::{LexType, WordIdx};
use feature::WordFeatures;
use map::WordMap;
use param::WordParams;

pub use param::WordParam;

/// Lexicon of words.
pub struct Lexicon {
    map: WordMap,
    params: WordParams,
    features: WordFeatures,
    lex_type: LexType,
}

/// Entry part of a [`Lexicon`], serialized apart from the trie.
#[derive(Decode, Encode)]
pub struct LexiconEntries {
    params: WordParams,
    features: WordFeatures,
}

impl Lexicon {
    pub(crate) fn from_parts(map: WordMap, entries: LexiconEntries, lex_type: LexType) -> Self {
        Self {
            map,
            params: entries.params,
            features: entries.features,
            lex_type,
        }
    }

    pub(crate) fn map(&self) -> &WordMap {
        &self.map
    }

    pub(crate) fn entries(&self) -> (&WordParams, &WordFeatures) {
        (&self.params, &self.features)
    }

    /// Checks that parameters and features agree on the number of words.
    pub(crate) fn is_consistent(&self) -> bool {
        self.params.len() == self.features.len()
    }

    #[inline(always)]
    pub(crate) fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = LexMatch> + 'a {
        self.map
            .common_prefix_iterator(input)
            .filter_map(move |(word_id, end_char)| {
                let param = self.params.get(word_id as usize)?;
                Some(LexMatch::new(
                    WordIdx::new(self.lex_type, word_id),
                    param,
                    end_char,
                ))
            })
    }

    #[inline(always)]
    pub(crate) fn word_param(&self, word_idx: WordIdx) -> Option<WordParam> {
        debug_assert_eq!(word_idx.lex_type, self.lex_type);
        self.params.get(word_idx.word_id as usize)
    }

    #[inline(always)]
    pub(crate) fn word_feature(&self, word_idx: WordIdx) -> Option<&str> {
        debug_assert_eq!(word_idx.lex_type, self.lex_type);
        self.features.get(word_idx.word_id as usize)
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.params.len()
    }

    /// Checks if all connection ids are within the matrix.
    pub(crate) fn verify(&self, conn: &Connector) -> bool {
        self.params
            .iter()
            .all(|p| conn.contains(p.right_id, p.left_id))
    }
}

#[derive(Eq, PartialEq, Debug)]
pub struct LexMatch {
    word_idx: WordIdx,
    word_param: WordParam,
    end_char: usize,
}

impl LexMatch {
    #[inline(always)]
    pub const fn new(word_idx: WordIdx, word_param: WordParam, end_char: usize) -> Self {
        Self {
            word_idx,
            word_param,
            end_char,
        }
    }

    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    #[inline(always)]
    pub const fn word_idx(&self) -> WordIdx {
        self.word_idx
    }

    #[inline(always)]
    pub const fn word_param(&self) -> WordParam {
        self.word_param
    }
}

/// A row of a lexicon in the MeCab format.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RawWordEntry {
    /// Surface string.
    pub surface: String,
    /// Connection ids and word cost.
    pub param: WordParam,
    /// Comma-separated feature string.
    pub feature: String,
}

impl RawWordEntry {
    /// Creates a new instance.
    pub fn new<S, F>(surface: S, param: WordParam, feature: F) -> Self
    where
        S: Into<String>,
        F: Into<String>,
    {
        Self {
            surface: surface.into(),
            param,
            feature: feature.into(),
        }
    }
}
