//! Viterbi-based tokenizer.
mod config;
mod decompose;
pub(crate) mod lattice;
pub(crate) mod search;
pub mod worker;

use regex::Regex;

use crate::common::KANJI_CATEGORIES;
use crate::dictionary::{Dictionary, LexType, WordIdx, WordParam};
use crate::errors::{Result, TsumugiError};
use crate::sentence::Sentence;
use crate::token::TokenBuf;
use crate::tokenizer::lattice::Lattice;
use crate::tokenizer::worker::Worker;

pub use config::{Mode, Penalty, TokenizerConfig, DEFAULT_COMPOUND_PATTERN};

/// Sources of candidates placed in a lattice.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LatticeSources {
    unknown: bool,
    synthetic: bool,
    exclude_whole: bool,
}

impl LatticeSources {
    /// Every source, used for input sentences.
    pub const ALL: Self = Self {
        unknown: true,
        synthetic: true,
        exclude_whole: false,
    };

    /// Lexicon words only, without the one spanning the whole sentence.
    pub const PARTS: Self = Self {
        unknown: false,
        synthetic: false,
        exclude_whole: true,
    };

    #[inline(always)]
    const fn admits(&self, start_char: usize, end_char: usize, len_char: usize) -> bool {
        !(self.exclude_whole && start_char == 0 && end_char == len_char)
    }
}

/// Tokenizer.
///
/// It holds the dictionary and the settings, which are never modified after
/// construction, so it can be shared by workers in multiple threads.
pub struct Tokenizer {
    dict: Dictionary,
    config: TokenizerConfig,
    compound_re: Option<Regex>,
    kanji_cateset: u32,
}

impl Tokenizer {
    /// Creates a new instance with the default settings of [`Mode::Baseline`].
    ///
    /// # Arguments
    ///
    ///  - `dict`: Dictionary to be used.
    pub fn new(dict: Dictionary) -> Self {
        let kanji_cateset = dict.char_prop().cate_idset_of(&KANJI_CATEGORIES);
        Self {
            dict,
            config: TokenizerConfig::default(),
            compound_re: None,
            kanji_cateset,
        }
    }

    /// Creates a new instance with the given settings.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::InvalidArgument`] is returned when
    ///  - a length threshold, `min_compound_len`, or `strict_max_len` is zero,
    ///  - a penalty is negative,
    ///  - `compound_pattern` is not a valid regular expression, or
    ///  - `split_on_nakaguro` is set but `SYMBOL` is not defined in the dictionary.
    pub fn with_config(dict: Dictionary, config: TokenizerConfig) -> Result<Self> {
        config.validate()?;
        let compound_re = Regex::new(&config.compound_pattern)
            .map_err(|e| TsumugiError::invalid_argument("compound_pattern", e.to_string()))?;
        let dict = if config.split_on_nakaguro {
            dict.reset_char_categories('・', &["SYMBOL"]).map_err(|_| {
                TsumugiError::invalid_argument(
                    "split_on_nakaguro",
                    "SYMBOL is not defined in the dictionary.",
                )
            })?
        } else {
            dict
        };
        let kanji_cateset = dict.char_prop().cate_idset_of(&KANJI_CATEGORIES);
        tracing::debug!(?config, "created a tokenizer");
        Ok(Self {
            dict,
            config,
            compound_re: Some(compound_re),
            kanji_cateset,
        })
    }

    /// Gets the reference to the dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Gets the reference to the settings.
    pub const fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Creates a new worker.
    pub fn new_worker(&self) -> Worker<'_> {
        Worker::new(self)
    }

    /// Tokenizes a sentence, returning owned tokens.
    ///
    /// To tokenize many sentences, reuse a [`Worker`] instead.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::DisconnectedLattice`] is returned when no path reaches the
    /// end of the sentence, which a dictionary built by this crate never causes.
    pub fn tokenize<S>(&self, input: S) -> Result<Vec<TokenBuf>>
    where
        S: AsRef<str>,
    {
        let mut worker = self.new_worker();
        worker.reset_sentence(input);
        worker.tokenize()?;
        Ok(worker.token_iter().map(TokenBuf::from).collect())
    }

    #[inline(always)]
    pub(crate) const fn kanji_cateset(&self) -> u32 {
        self.kanji_cateset
    }

    /// Checks if a word may be decomposed.
    pub(crate) fn is_compound(&self, word_idx: WordIdx, len_char: usize) -> bool {
        let Some(compound_re) = self.compound_re.as_ref() else {
            return false;
        };
        match word_idx.lex_type {
            LexType::System => {
                len_char >= self.config.min_compound_len
                    && compound_re.is_match(self.dict.word_feature(word_idx))
            }
            LexType::User | LexType::Unknown | LexType::Synthetic => false,
        }
    }

    pub(crate) fn build_lattice(
        &self,
        sent: &Sentence,
        lattice: &mut Lattice,
        sources: LatticeSources,
        bos: (WordIdx, WordParam),
        eos: (WordIdx, WordParam),
    ) {
        lattice.reset(sent.len_char(), bos);

        for start_char in 0..sent.len_char() {
            // Nodes starting here would be unreachable.
            if !lattice.has_previous_node(start_char) {
                continue;
            }
            self.add_lattice_edges(sent, lattice, start_char, sources);
        }

        lattice.insert_eos(eos);

        tracing::trace!(
            len_char = sent.len_char(),
            num_nodes = lattice.num_nodes(),
            "built a lattice"
        );
    }

    fn add_lattice_edges(
        &self,
        sent: &Sentence,
        lattice: &mut Lattice,
        start_char: usize,
        sources: LatticeSources,
    ) {
        let mut has_matched = false;

        let len_char = sent.len_char();
        let suffix = &sent.chars()[start_char..];

        if let Some(user_lexicon) = self.dict.user_lexicon() {
            for m in user_lexicon.common_prefix_iterator(suffix) {
                let end_char = start_char + m.end_char();
                debug_assert!(end_char <= len_char);
                if sources.admits(start_char, end_char, len_char) {
                    lattice.insert_node(start_char, end_char, m.word_idx(), m.word_param());
                    has_matched = true;
                }
            }
        }

        for m in self.dict.system_lexicon().common_prefix_iterator(suffix) {
            let end_char = start_char + m.end_char();
            debug_assert!(end_char <= len_char);
            if sources.admits(start_char, end_char, len_char) {
                lattice.insert_node(start_char, end_char, m.word_idx(), m.word_param());
                has_matched = true;
            }
        }

        if sources.synthetic {
            for m in self.dict.synthetic().common_prefix_iterator(suffix) {
                let end_char = start_char + m.end_char();
                lattice.insert_node(start_char, end_char, m.word_idx(), m.word_param());
                has_matched = true;
            }
        }

        if sources.unknown {
            self.dict
                .unk_handler()
                .gen_unk_words(sent, start_char, has_matched, |w| {
                    lattice.insert_node(w.start_char(), w.end_char(), w.word_idx(), w.word_param());
                });
        }
    }
}
