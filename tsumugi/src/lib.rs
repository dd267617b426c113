//! # Tsumugi
//!
//! Tsumugi is a lattice-based morphological analyzer for Japanese text.
//! An input string is segmented into morphemes by searching the minimum-cost
//! path over candidates drawn from a system lexicon, an optional user lexicon,
//! injected entries, and unknown-word rules driven by character categories.
//!
//! ## Examples
//!
//! ```
//! use tsumugi::{SystemDictionaryBuilder, Tokenizer};
//!
//! let lexicon_csv = "京都,0,0,1,名詞,固有名詞,地名,一般,*,*,京都,キョウト,キョート\n\
//!                    東京,0,0,1,名詞,固有名詞,地名,一般,*,*,東京,トウキョウ,トーキョー";
//! let matrix_def = "1 1\n0 0 0";
//! let char_def = "DEFAULT 0 1 0";
//! let unk_def = "DEFAULT,0,0,100,名詞,一般,*,*,*,*,*";
//!
//! let dict = SystemDictionaryBuilder::from_readers(
//!     lexicon_csv.as_bytes(),
//!     matrix_def.as_bytes(),
//!     char_def.as_bytes(),
//!     unk_def.as_bytes(),
//! )
//! .unwrap();
//!
//! let tokenizer = Tokenizer::new(dict);
//! let mut worker = tokenizer.new_worker();
//!
//! worker.reset_sentence("京都東京");
//! worker.tokenize().unwrap();
//! assert_eq!(worker.num_tokens(), 2);
//!
//! let t = worker.token(1);
//! assert_eq!(t.surface(), "東京");
//! assert_eq!(t.range_char(), 2..4);
//! assert_eq!(t.reading(), Some("トウキョウ".to_string()));
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod common;
pub mod dictionary;
pub mod errors;
mod sentence;
pub mod token;
pub mod tokenizer;
mod utils;

#[cfg(test)]
mod tests;

pub use dictionary::{Dictionary, SystemDictionaryBuilder};
pub use tokenizer::{Mode, Penalty, Tokenizer, TokenizerConfig};
