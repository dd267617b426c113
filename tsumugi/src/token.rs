//! Container of resultant tokens.
use std::ops::Range;

use crate::dictionary::{LexType, WordIdx};
use crate::tokenizer::worker::{TopNode, Worker};
use crate::utils;

const NUM_POS_FIELDS: usize = 4;
const BASE_FORM_FIELD: usize = 6;
const READING_FIELD: usize = 7;
const PRONUNCIATION_FIELD: usize = 8;

/// Resultant token.
pub struct Token<'a> {
    worker: &'a Worker<'a>,
    index: usize,
}

impl<'a> Token<'a> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'a Worker<'a>, index: usize) -> Self {
        Self { worker, index }
    }

    #[inline(always)]
    fn top_node(&self) -> &'a TopNode {
        &self.worker.top_nodes[self.index]
    }

    /// Gets the position range of the token in characters.
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        let node = self.top_node();
        node.start_char..node.end_char
    }

    /// Gets the position range of the token in bytes.
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        let sent = &self.worker.sent;
        let node = self.top_node();
        sent.byte_position(node.start_char)..sent.byte_position(node.end_char)
    }

    /// Gets the start position of the token in characters.
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.top_node().start_char
    }

    /// Gets the surface string of the token.
    #[inline(always)]
    pub fn surface(&self) -> &'a str {
        &self.worker.sent.raw()[self.range_byte()]
    }

    /// Gets the identifier of the word.
    #[inline(always)]
    pub fn word_idx(&self) -> WordIdx {
        self.top_node().word_idx
    }

    /// Gets the lexicon type where the token is from.
    #[inline(always)]
    pub fn lex_type(&self) -> LexType {
        self.top_node().word_idx.lex_type
    }

    /// Gets the feature string of the token.
    #[inline(always)]
    pub fn feature(&self) -> &'a str {
        self.worker
            .tokenizer
            .dictionary()
            .word_feature(self.top_node().word_idx)
    }

    /// Splits the feature string into fields, respecting quotes.
    pub fn features(&self) -> Vec<String> {
        utils::parse_csv_row(self.feature())
    }

    /// Gets the part-of-speech fields, the first four of the feature.
    pub fn part_of_speech(&self) -> Vec<String> {
        part_of_speech(self.feature())
    }

    /// Gets the base form, if the feature has one.
    pub fn base_form(&self) -> Option<String> {
        feature_field(self.feature(), BASE_FORM_FIELD)
    }

    /// Gets the reading, if the feature has one.
    pub fn reading(&self) -> Option<String> {
        feature_field(self.feature(), READING_FIELD)
    }

    /// Gets the pronunciation, if the feature has one.
    pub fn pronunciation(&self) -> Option<String> {
        feature_field(self.feature(), PRONUNCIATION_FIELD)
    }

    /// Gets the left id of the token's node.
    #[inline(always)]
    pub fn left_id(&self) -> u16 {
        self.top_node().word_param.left_id
    }

    /// Gets the right id of the token's node.
    #[inline(always)]
    pub fn right_id(&self) -> u16 {
        self.top_node().word_param.right_id
    }

    /// Gets the word cost of the token's node.
    #[inline(always)]
    pub fn word_cost(&self) -> i16 {
        self.top_node().word_param.word_cost
    }

    /// Gets the total cost from BOS to the token's node.
    #[inline(always)]
    pub fn total_cost(&self) -> i64 {
        self.top_node().total_cost
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("surface", &self.surface())
            .field("range_char", &self.range_char())
            .field("lex_type", &self.lex_type())
            .field("feature", &self.feature())
            .field("total_cost", &self.total_cost())
            .finish()
    }
}

/// Iterator of tokens.
pub struct TokenIter<'a> {
    worker: &'a Worker<'a>,
    i: usize,
}

impl<'a> TokenIter<'a> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'a Worker<'a>, i: usize) -> Self {
        Self { worker, i }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token<'a>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.worker.num_tokens() {
            let t = self.worker.token(self.i);
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}

/// Token owning its surface and feature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBuf {
    /// Surface string.
    pub surface: String,

    /// Position range in characters.
    pub range_char: Range<usize>,

    /// Position range in bytes.
    pub range_byte: Range<usize>,

    /// Identifier of the word.
    pub word_idx: WordIdx,

    /// Feature string.
    pub feature: String,

    /// Left connection id.
    pub left_id: u16,

    /// Right connection id.
    pub right_id: u16,

    /// Word cost.
    pub word_cost: i16,

    /// Total cost from BOS.
    pub total_cost: i64,
}

impl TokenBuf {
    /// Gets the start position of the token in characters.
    #[inline(always)]
    pub const fn offset(&self) -> usize {
        self.range_char.start
    }

    /// Gets the lexicon type where the token is from.
    #[inline(always)]
    pub const fn lex_type(&self) -> LexType {
        self.word_idx.lex_type
    }

    /// Splits the feature string into fields, respecting quotes.
    pub fn features(&self) -> Vec<String> {
        utils::parse_csv_row(&self.feature)
    }

    /// Gets the part-of-speech fields, the first four of the feature.
    pub fn part_of_speech(&self) -> Vec<String> {
        part_of_speech(&self.feature)
    }

    /// Gets the base form, if the feature has one.
    pub fn base_form(&self) -> Option<String> {
        feature_field(&self.feature, BASE_FORM_FIELD)
    }

    /// Gets the reading, if the feature has one.
    pub fn reading(&self) -> Option<String> {
        feature_field(&self.feature, READING_FIELD)
    }

    /// Gets the pronunciation, if the feature has one.
    pub fn pronunciation(&self) -> Option<String> {
        feature_field(&self.feature, PRONUNCIATION_FIELD)
    }
}

impl From<Token<'_>> for TokenBuf {
    fn from(t: Token<'_>) -> Self {
        Self {
            surface: t.surface().to_string(),
            range_char: t.range_char(),
            range_byte: t.range_byte(),
            word_idx: t.word_idx(),
            feature: t.feature().to_string(),
            left_id: t.left_id(),
            right_id: t.right_id(),
            word_cost: t.word_cost(),
            total_cost: t.total_cost(),
        }
    }
}

fn part_of_speech(feature: &str) -> Vec<String> {
    let mut fields = utils::parse_csv_row(feature);
    fields.truncate(NUM_POS_FIELDS);
    fields
}

// "*" marks an absent field.
fn feature_field(feature: &str, i: usize) -> Option<String> {
    utils::parse_csv_row(feature)
        .into_iter()
        .nth(i)
        .filter(|f| f != "*")
}
