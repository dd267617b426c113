//! Dictionary for tokenization.
pub(crate) mod builder;
pub(crate) mod character;
pub(crate) mod connector;
pub(crate) mod lexicon;
pub mod resource;
pub(crate) mod synthetic;
pub(crate) mod unknown;
pub(crate) mod word_idx;

use bincode::Decode;

use crate::common;
use crate::errors::{Result, TsumugiError};
use character::CharProperty;
use connector::Connector;
use lexicon::map::WordMap;
use lexicon::{Lexicon, LexiconEntries};
use resource::ResourceResolver;
use synthetic::SyntheticEntries;
use unknown::UnkHandler;

pub use builder::SystemDictionaryBuilder;
pub use lexicon::{RawWordEntry, WordParam};
pub use word_idx::WordIdx;

/// Type of a lexicon that contains the word.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum LexType {
    /// System lexicon.
    System,
    /// User lexicon.
    User,
    /// Unknown words.
    Unknown,
    /// Sentence sentinels and injected words.
    Synthetic,
}

impl Default for LexType {
    fn default() -> Self {
        Self::System
    }
}

/// Parameters and feature of a word.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct WordEntry<'a> {
    /// Identifier of the word.
    pub word_idx: WordIdx,

    /// Connection ids and cost of the word.
    pub param: WordParam,

    /// Feature string of the word.
    pub feature: &'a str,
}

/// Inner data of [`Dictionary`].
struct DictionaryInner {
    system_lexicon: Lexicon,
    user_lexicon: Option<Lexicon>,
    connector: Connector,
    char_prop: CharProperty,
    unk_handler: UnkHandler,
    synthetic: SyntheticEntries,
}

/// Dictionary for tokenization.
pub struct Dictionary(DictionaryInner);

impl Dictionary {
    /// Gets the reference to the system lexicon.
    #[inline(always)]
    pub(crate) const fn system_lexicon(&self) -> &Lexicon {
        &self.0.system_lexicon
    }

    /// Gets the reference to the user lexicon.
    #[inline(always)]
    pub(crate) const fn user_lexicon(&self) -> Option<&Lexicon> {
        self.0.user_lexicon.as_ref()
    }

    /// Gets the reference to the connection matrix.
    #[inline(always)]
    pub(crate) const fn connector(&self) -> &Connector {
        &self.0.connector
    }

    /// Gets the reference to the character property.
    #[inline(always)]
    pub(crate) const fn char_prop(&self) -> &CharProperty {
        &self.0.char_prop
    }

    /// Gets the reference to the handler of unknown words.
    #[inline(always)]
    pub(crate) const fn unk_handler(&self) -> &UnkHandler {
        &self.0.unk_handler
    }

    /// Gets the reference to the synthetic entries.
    #[inline(always)]
    pub(crate) const fn synthetic(&self) -> &SyntheticEntries {
        &self.0.synthetic
    }

    /// Gets the feature string of a word placed in a lattice.
    #[inline(always)]
    pub(crate) fn word_feature(&self, word_idx: WordIdx) -> &str {
        self.entry(word_idx).map_or("", |e| e.feature)
    }

    /// Looks up the parameters and feature of a word.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::NotFound`] is returned when no word has the identifier.
    pub fn entry(&self, word_idx: WordIdx) -> Result<WordEntry<'_>> {
        let found = match word_idx.lex_type {
            LexType::System => {
                let lex = self.system_lexicon();
                lex.word_param(word_idx).zip(lex.word_feature(word_idx))
            }
            LexType::User => self
                .user_lexicon()
                .and_then(|lex| lex.word_param(word_idx).zip(lex.word_feature(word_idx))),
            LexType::Unknown => {
                let unk = self.unk_handler();
                unk.word_param(word_idx).zip(unk.word_feature(word_idx))
            }
            LexType::Synthetic => {
                let syn = self.synthetic();
                syn.word_param(word_idx).zip(syn.word_feature(word_idx))
            }
        };
        found
            .map(|(param, feature)| WordEntry {
                word_idx,
                param,
                feature,
            })
            .ok_or_else(|| {
                TsumugiError::not_found(format!(
                    "no {:?} word has id {}",
                    word_idx.lex_type, word_idx.word_id
                ))
            })
    }

    /// Returns the category names of a character, the base category first.
    pub fn categories(&self, c: char) -> Vec<&str> {
        self.char_prop().categories(c)
    }

    /// Gets the connection cost between two connection ids.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::NotFound`] is returned when an id is outside the matrix.
    pub fn connection_cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        if !self.connector().contains(right_id, left_id) {
            return Err(TsumugiError::not_found(format!(
                "({right_id}, {left_id}) is outside the {}x{} matrix",
                self.connector().num_right(),
                self.connector().num_left()
            )));
        }
        Ok(self.connector().cost(right_id, left_id))
    }

    /// Serializes the dictionary into named resources.
    ///
    /// Injected words are not part of the resources. Reassigned character
    /// categories are stored with the character definitions.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn to_resources(&self) -> Result<Vec<(&'static str, Vec<u8>)>> {
        let config = common::bincode_config();
        let system = self.system_lexicon();
        let mut resources = vec![
            (resource::TRIE, bincode::encode_to_vec(system.map(), config)?),
            (resource::ENTRIES, bincode::encode_to_vec(system.entries(), config)?),
            (
                resource::CHAR_DEF,
                bincode::encode_to_vec((self.char_prop(), self.unk_handler()), config)?,
            ),
            (resource::MATRIX, bincode::encode_to_vec(self.connector(), config)?),
        ];
        if let Some(user) = self.user_lexicon() {
            let (params, features) = user.entries();
            resources.push((
                resource::USER,
                bincode::encode_to_vec((user.map(), params, features), config)?,
            ));
        }
        Ok(resources)
    }

    /// Loads a dictionary from named resources.
    ///
    /// # Errors
    ///
    ///  - [`TsumugiError::DictionaryLoad`] is returned when a required resource
    ///    is missing, truncated, or malformed.
    ///  - [`TsumugiError::InconsistentDictionary`] is returned when an entry
    ///    refers to a connection id outside the matrix.
    pub fn from_resolver<R>(resolver: &R) -> Result<Self>
    where
        R: ResourceResolver + ?Sized,
    {
        let map: WordMap = decode(resource::TRIE, &resolver.read_required(resource::TRIE)?)?;
        let entries: LexiconEntries =
            decode(resource::ENTRIES, &resolver.read_required(resource::ENTRIES)?)?;
        let (char_prop, unk_handler): (CharProperty, UnkHandler) =
            decode(resource::CHAR_DEF, &resolver.read_required(resource::CHAR_DEF)?)?;
        let connector: Connector =
            decode(resource::MATRIX, &resolver.read_required(resource::MATRIX)?)?;

        let system_lexicon = Lexicon::from_parts(map, entries, LexType::System);
        if !system_lexicon.is_consistent() {
            return Err(TsumugiError::dictionary_load(
                resource::ENTRIES,
                "the numbers of parameters and features differ.",
            ));
        }
        if !connector.is_consistent() {
            return Err(TsumugiError::dictionary_load(
                resource::MATRIX,
                "the matrix shape does not match its cells.",
            ));
        }
        if !char_prop.is_consistent() || !unk_handler.is_consistent(char_prop.num_categories()) {
            return Err(TsumugiError::dictionary_load(
                resource::CHAR_DEF,
                "character categories and unknown-word entries disagree.",
            ));
        }

        let user_lexicon = match resolver.read(resource::USER)? {
            Some(bytes) => {
                let (map, entries): (WordMap, LexiconEntries) = decode(resource::USER, &bytes)?;
                let lex = Lexicon::from_parts(map, entries, LexType::User);
                if !lex.is_consistent() {
                    return Err(TsumugiError::dictionary_load(
                        resource::USER,
                        "the numbers of parameters and features differ.",
                    ));
                }
                Some(lex)
            }
            None => None,
        };

        let dict = Self(DictionaryInner {
            system_lexicon,
            user_lexicon,
            connector,
            char_prop,
            unk_handler,
            synthetic: SyntheticEntries::new(),
        });
        dict.verify()?;

        tracing::info!(
            num_system_words = dict.system_lexicon().len(),
            num_user_words = dict.user_lexicon().map_or(0, |lex| lex.len()),
            num_categories = dict.char_prop().num_categories(),
            "loaded a dictionary"
        );
        Ok(dict)
    }

    /// Checks that every entry refers to connection ids within the matrix.
    fn verify(&self) -> Result<()> {
        let conn = self.connector();
        if !self.system_lexicon().verify(conn) {
            return Err(TsumugiError::inconsistent_dictionary(
                "system lexicon",
                "it includes connection ids outside the matrix.",
            ));
        }
        if let Some(lex) = self.user_lexicon() {
            if !lex.verify(conn) {
                return Err(TsumugiError::inconsistent_dictionary(
                    "user lexicon",
                    "it includes connection ids outside the matrix.",
                ));
            }
        }
        if !self.unk_handler().verify(conn) {
            return Err(TsumugiError::inconsistent_dictionary(
                "unknown-word entries",
                "they include connection ids outside the matrix.",
            ));
        }
        if !self.synthetic().verify(conn) {
            return Err(TsumugiError::inconsistent_dictionary(
                "synthetic entries",
                "BOS/EOS or injected words refer to connection ids outside the matrix.",
            ));
        }
        Ok(())
    }
}

fn decode<T>(name: &str, bytes: &[u8]) -> Result<T>
where
    T: Decode,
{
    let (data, num_bytes) = bincode::decode_from_slice(bytes, common::bincode_config())
        .map_err(|e| TsumugiError::dictionary_load(name, e.to_string()))?;
    if num_bytes != bytes.len() {
        let msg = format!("{} trailing bytes", bytes.len() - num_bytes);
        return Err(TsumugiError::dictionary_load(name, msg));
    }
    Ok(data)
}
