use std::str::FromStr;

use crate::errors::{Result, TsumugiError};

/// Default pattern over feature strings selecting compound-eligible entries.
pub const DEFAULT_COMPOUND_PATTERN: &str = "^名詞,";

/// Granularity of the resultant tokens.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Tokens of the minimum-cost path as they are.
    #[default]
    Baseline,

    /// Compound nouns are split into their parts when the split is cheaper.
    CompoundSplit,

    /// In addition to [`Mode::CompoundSplit`], tokens longer than
    /// [`TokenizerConfig::strict_max_len`] are cut into fixed-width pieces.
    CompoundSplitStrict,
}

impl Mode {
    /// Checks if compound nouns are decomposed in this mode.
    #[inline(always)]
    pub const fn splits_compounds(self) -> bool {
        !matches!(self, Self::Baseline)
    }
}

impl FromStr for Mode {
    type Err = TsumugiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "baseline" => Ok(Self::Baseline),
            "compound-split" => Ok(Self::CompoundSplit),
            "compound-split-strict" => Ok(Self::CompoundSplitStrict),
            _ => Err(TsumugiError::invalid_argument(
                "mode",
                format!("{s} is not one of baseline, compound-split, compound-split-strict"),
            )),
        }
    }
}

/// Extra costs added to long unknown words.
///
/// A kanji-only span of at least `kanji_length_threshold` characters costs
/// `kanji_penalty` more; any other span of at least `other_length_threshold`
/// characters costs `other_penalty` more.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Penalty {
    /// Minimum length of a penalized kanji-only span.
    pub kanji_length_threshold: usize,

    /// Cost added to a penalized kanji-only span.
    pub kanji_penalty: i32,

    /// Minimum length of a penalized span of other characters.
    pub other_length_threshold: usize,

    /// Cost added to a penalized span of other characters.
    pub other_penalty: i32,
}

impl Default for Penalty {
    fn default() -> Self {
        Self {
            kanji_length_threshold: 2,
            kanji_penalty: 3000,
            other_length_threshold: 7,
            other_penalty: 1700,
        }
    }
}

impl Penalty {
    /// Computes the extra cost of a span.
    #[inline(always)]
    pub const fn span_cost(&self, len_char: usize, kanji_only: bool) -> i32 {
        if kanji_only && len_char >= self.kanji_length_threshold {
            self.kanji_penalty
        } else if len_char >= self.other_length_threshold {
            self.other_penalty
        } else {
            0
        }
    }

    fn validate(&self) -> Result<()> {
        if self.kanji_length_threshold == 0 || self.other_length_threshold == 0 {
            return Err(TsumugiError::invalid_argument(
                "penalty",
                "length thresholds must be at least 1.",
            ));
        }
        if self.kanji_penalty < 0 || self.other_penalty < 0 {
            return Err(TsumugiError::invalid_argument(
                "penalty",
                "penalties must not be negative.",
            ));
        }
        Ok(())
    }
}

/// Settings of a [`Tokenizer`](crate::Tokenizer), fixed at its construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenizerConfig {
    /// Granularity of tokens.
    pub mode: Mode,

    /// Extra costs of long unknown words.
    pub penalty: Penalty,

    /// Regular expression over feature strings of system-lexicon words that
    /// may be decomposed.
    pub compound_pattern: String,

    /// Minimum number of characters of a decomposable word.
    pub min_compound_len: usize,

    /// Maximum number of characters of a token in [`Mode::CompoundSplitStrict`].
    pub strict_max_len: usize,

    /// Treats `・` as a symbol so that it always separates tokens.
    pub split_on_nakaguro: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            penalty: Penalty::default(),
            compound_pattern: DEFAULT_COMPOUND_PATTERN.to_string(),
            min_compound_len: 3,
            strict_max_len: 7,
            split_on_nakaguro: false,
        }
    }
}

impl TokenizerConfig {
    /// Checks the settings, except for the pattern compiled by the tokenizer.
    pub(crate) fn validate(&self) -> Result<()> {
        self.penalty.validate()?;
        if self.min_compound_len == 0 {
            return Err(TsumugiError::invalid_argument(
                "min_compound_len",
                "must be at least 1.",
            ));
        }
        if self.strict_max_len == 0 {
            return Err(TsumugiError::invalid_argument(
                "strict_max_len",
                "must be at least 1.",
            ));
        }
        Ok(())
    }
}
