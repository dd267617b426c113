mod builder;

use bincode::{Decode, Encode};

use crate::dictionary::character::CharInfo;
use crate::dictionary::connector::Connector;
use crate::dictionary::lexicon::WordParam;
use crate::dictionary::{LexType, WordIdx};
use crate::sentence::Sentence;

/// Generic morpheme used for unknown words of a category.
#[derive(Default, Debug, Clone, Eq, PartialEq, Decode, Encode)]
pub struct UnkEntry {
    pub cate_id: u16,
    pub left_id: u16,
    pub right_id: u16,
    pub word_cost: i16,
    pub feature: String,
}

/// Candidate of an unknown word.
#[derive(Default, Debug, Clone)]
pub struct UnkWord {
    start_char: usize,
    end_char: usize,
    word_param: WordParam,
    word_id: u32,
}

impl UnkWord {
    #[inline(always)]
    pub const fn start_char(&self) -> usize {
        self.start_char
    }

    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    #[inline(always)]
    pub const fn word_param(&self) -> WordParam {
        self.word_param
    }

    #[inline(always)]
    pub const fn word_idx(&self) -> WordIdx {
        WordIdx::new(LexType::Unknown, self.word_id)
    }
}

/// Handler of unknown words.
#[derive(Decode, Encode)]
pub struct UnkHandler {
    offsets: Vec<usize>, // indexed by category id
    entries: Vec<UnkEntry>,
}

impl UnkHandler {
    /// Generates unknown-word candidates starting at `start_char`.
    ///
    /// Nothing is generated if a lexicon word matched and the category is not
    /// invoked. Otherwise, a grouping category yields the single character,
    /// prefixes up to its `length`, and the maximal run; a non-grouping
    /// category yields the single character only.
    pub(crate) fn gen_unk_words<F>(
        &self,
        sent: &Sentence,
        start_char: usize,
        has_matched: bool,
        mut f: F,
    ) where
        F: FnMut(UnkWord),
    {
        let cinfo = sent.char_info(start_char);
        if has_matched && !cinfo.invoke() {
            return;
        }

        if cinfo.group() {
            let groupable = sent.groupable(start_char);
            let max_prefix = usize::from(cinfo.length()).max(1).min(groupable);
            for len in 1..=max_prefix {
                f = self.scan_entries(start_char, start_char + len, cinfo, f);
            }
            if max_prefix < groupable {
                self.scan_entries(start_char, start_char + groupable, cinfo, f);
            }
        } else {
            self.scan_entries(start_char, start_char + 1, cinfo, f);
        }
    }

    #[inline(always)]
    fn entry_range(&self, cinfo: CharInfo) -> (usize, usize) {
        let base_id = cinfo.base_id() as usize;
        let start = self.offsets[base_id];
        let end = self.offsets[base_id + 1];
        if start == end {
            // Falls back to DEFAULT, which always has an entry.
            (self.offsets[0], self.offsets[1])
        } else {
            (start, end)
        }
    }

    #[inline(always)]
    fn scan_entries<F>(&self, start_char: usize, end_char: usize, cinfo: CharInfo, mut f: F) -> F
    where
        F: FnMut(UnkWord),
    {
        let (start, end) = self.entry_range(cinfo);
        for word_id in start..end {
            let e = &self.entries[word_id];
            f(UnkWord {
                start_char,
                end_char,
                word_param: WordParam::new(e.left_id, e.right_id, e.word_cost),
                word_id: word_id as u32,
            });
        }
        f
    }

    /// Gets the first entry for the character, used to label forced splits.
    pub(crate) fn first_entry(&self, cinfo: CharInfo) -> (WordIdx, WordParam) {
        let (start, _) = self.entry_range(cinfo);
        let e = &self.entries[start];
        (
            WordIdx::new(LexType::Unknown, start as u32),
            WordParam::new(e.left_id, e.right_id, e.word_cost),
        )
    }

    pub(crate) fn word_param(&self, word_idx: WordIdx) -> Option<WordParam> {
        debug_assert_eq!(word_idx.lex_type, LexType::Unknown);
        self.entries
            .get(word_idx.word_id as usize)
            .map(|e| WordParam::new(e.left_id, e.right_id, e.word_cost))
    }

    pub(crate) fn word_feature(&self, word_idx: WordIdx) -> Option<&str> {
        debug_assert_eq!(word_idx.lex_type, LexType::Unknown);
        self.entries
            .get(word_idx.word_id as usize)
            .map(|e| e.feature.as_str())
    }

    /// Checks if the handler is well-formed for `num_categories` categories.
    pub(crate) fn is_consistent(&self, num_categories: usize) -> bool {
        self.offsets.len() == num_categories + 1
            && self.offsets.windows(2).all(|w| w[0] <= w[1])
            && self.offsets.last() == Some(&self.entries.len())
            && self.offsets[0] < self.offsets[1]
    }

    /// Checks if all connection ids are within the matrix.
    pub(crate) fn verify(&self, conn: &Connector) -> bool {
        self.entries
            .iter()
            .all(|e| conn.contains(e.right_id, e.left_id))
    }
}
