use std::io::Read;

use crate::dictionary::{
    CharProperty, Connector, Dictionary, DictionaryInner, LexType, Lexicon, RawWordEntry,
    SyntheticEntries, UnkHandler, WordParam,
};
use crate::errors::{Result, TsumugiError};

/// Builder of a [`Dictionary`] from source files in the MeCab format.
pub struct SystemDictionaryBuilder {}

impl SystemDictionaryBuilder {
    /// Creates a new dictionary from readers in the MeCab format.
    ///
    /// # Arguments
    ///
    ///  - `system_lexicon_rdr`: A reader of a lexicon file `*.csv`.
    ///  - `connector_rdr`: A reader of matrix file `matrix.def`.
    ///  - `char_prop_rdr`: A reader of character definition file `char.def`.
    ///  - `unk_handler`: A reader of unknown definition file `unk.def`.
    ///
    /// # Errors
    ///
    ///  - [`TsumugiError::InvalidFormat`] is returned when an input format is invalid.
    ///  - [`TsumugiError::InconsistentDictionary`] is returned when an entry refers
    ///    to a connection id outside the matrix.
    pub fn from_readers<S, C, P, U>(
        system_lexicon_rdr: S,
        connector_rdr: C,
        char_prop_rdr: P,
        unk_handler_rdr: U,
    ) -> Result<Dictionary>
    where
        S: Read,
        C: Read,
        P: Read,
        U: Read,
    {
        let system_lexicon = Lexicon::from_reader(system_lexicon_rdr, LexType::System)?;
        let connector = Connector::from_reader(connector_rdr)?;
        let char_prop = CharProperty::from_reader(char_prop_rdr)?;
        let unk_handler = UnkHandler::from_reader(unk_handler_rdr, &char_prop)?;

        let dict = Dictionary(DictionaryInner {
            system_lexicon,
            user_lexicon: None,
            connector,
            char_prop,
            unk_handler,
            synthetic: SyntheticEntries::new(),
        });
        dict.verify()?;
        Ok(dict)
    }
}

impl Dictionary {
    /// Resets the user lexicon from a reader.
    ///
    /// # Arguments
    ///
    ///  - `user_lexicon_rdr`: A reader of a lexicon file `*.csv` in the MeCab format.
    ///                        If `None`, clear the current user lexicon.
    ///
    /// # Errors
    ///
    ///  - [`TsumugiError::InvalidFormat`] is returned when an input format is invalid.
    ///  - [`TsumugiError::InconsistentDictionary`] is returned when an entry refers
    ///    to a connection id outside the matrix.
    pub fn reset_user_lexicon_from_reader<R>(self, user_lexicon_rdr: Option<R>) -> Result<Self>
    where
        R: Read,
    {
        let user_lexicon = user_lexicon_rdr
            .map(|rdr| Lexicon::from_reader(rdr, LexType::User))
            .transpose()?;
        self.reset_user_lexicon(user_lexicon)
    }

    /// Resets the user lexicon from parsed entries.
    ///
    /// # Errors
    ///
    ///  - [`TsumugiError::InvalidArgument`] is returned when an entry has an
    ///    empty surface.
    ///  - [`TsumugiError::InconsistentDictionary`] is returned when an entry refers
    ///    to a connection id outside the matrix.
    pub fn reset_user_lexicon_from_entries<I>(self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawWordEntry>,
    {
        let user_lexicon = Lexicon::from_entries(entries, LexType::User)?;
        self.reset_user_lexicon(Some(user_lexicon))
    }

    fn reset_user_lexicon(mut self, user_lexicon: Option<Lexicon>) -> Result<Self> {
        if let Some(lex) = user_lexicon.as_ref() {
            if !lex.verify(self.connector()) {
                return Err(TsumugiError::inconsistent_dictionary(
                    "user lexicon",
                    "it includes connection ids outside the matrix.",
                ));
            }
        }
        self.0.user_lexicon = user_lexicon;
        Ok(self)
    }

    /// Reassigns the categories of a character, the first name becoming its base.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::InvalidArgument`] is returned when a name is undefined,
    /// no name is given, or the character is outside the BMP.
    pub fn reset_char_categories<S>(mut self, c: char, names: &[S]) -> Result<Self>
    where
        S: AsRef<str>,
    {
        self.0.char_prop.set_categories(c, names)?;
        Ok(self)
    }

    /// Injects a word that bypasses the lexicons.
    ///
    /// An injected word is placed wherever its surface appears and suppresses
    /// unknown words of non-invoked categories there, as lexicon words do.
    ///
    /// # Errors
    ///
    ///  - [`TsumugiError::InvalidArgument`] is returned when the surface is empty.
    ///  - [`TsumugiError::InconsistentDictionary`] is returned when the parameter
    ///    refers to a connection id outside the matrix.
    pub fn inject(mut self, surface: &str, param: WordParam, feature: &str) -> Result<Self> {
        if !self.connector().contains(param.right_id, param.left_id) {
            return Err(TsumugiError::inconsistent_dictionary(
                "synthetic entries",
                format!("{surface} refers to connection ids outside the matrix."),
            ));
        }
        let word_idx = self.0.synthetic.inject(surface, param, feature)?;
        tracing::debug!(
            surface,
            word_id = word_idx.word_id,
            num_injected = self.0.synthetic.num_injected(),
            "injected a word"
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::WordIdx;

    const MATRIX_DEF: &str = "1 1\n0 0 0";
    const CHAR_DEF: &str = "DEFAULT 0 1 0\nSYMBOL 1 0 0\n0x0021..0x002F SYMBOL";
    const UNK_DEF: &str = "DEFAULT,0,0,100,*\nSYMBOL,0,0,200,記号";

    fn build() -> Dictionary {
        SystemDictionaryBuilder::from_readers(
            "自然,0,0,0,名詞".as_bytes(),
            MATRIX_DEF.as_bytes(),
            CHAR_DEF.as_bytes(),
            UNK_DEF.as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_oor_lex() {
        let lexicon_csv = "自然,1,1,0";
        let result = SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            MATRIX_DEF.as_bytes(),
            CHAR_DEF.as_bytes(),
            UNK_DEF.as_bytes(),
        );
        assert!(matches!(result, Err(TsumugiError::InconsistentDictionary(_))));
    }

    #[test]
    fn test_oor_unk() {
        let unk_def = "DEFAULT,1,1,100,*";
        let result = SystemDictionaryBuilder::from_readers(
            "自然,0,0,0".as_bytes(),
            MATRIX_DEF.as_bytes(),
            CHAR_DEF.as_bytes(),
            unk_def.as_bytes(),
        );
        assert!(matches!(result, Err(TsumugiError::InconsistentDictionary(_))));
    }

    #[test]
    fn test_empty_matrix() {
        let result = SystemDictionaryBuilder::from_readers(
            "自然,0,0,0".as_bytes(),
            "0 0".as_bytes(),
            CHAR_DEF.as_bytes(),
            UNK_DEF.as_bytes(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_lexicon() {
        let dict = build()
            .reset_user_lexicon_from_reader(Some("言語,0,0,0,名詞,一般".as_bytes()))
            .unwrap();
        let e = dict.entry(WordIdx::new(LexType::User, 0)).unwrap();
        assert_eq!(e.feature, "名詞,一般");

        let dict = dict.reset_user_lexicon_from_reader(None::<&[u8]>).unwrap();
        assert!(dict.entry(WordIdx::new(LexType::User, 0)).is_err());
    }

    #[test]
    fn test_user_lexicon_from_entries() {
        let entries = vec![RawWordEntry::new("言語", WordParam::new(0, 0, 10), "名詞")];
        let dict = build().reset_user_lexicon_from_entries(entries).unwrap();
        let e = dict.entry(WordIdx::new(LexType::User, 0)).unwrap();
        assert_eq!(e.param, WordParam::new(0, 0, 10));
    }

    #[test]
    fn test_oor_user() {
        let result = build().reset_user_lexicon_from_reader(Some("言語,0,3,0".as_bytes()));
        assert!(matches!(result, Err(TsumugiError::InconsistentDictionary(_))));
    }

    #[test]
    fn test_reset_char_categories() {
        let dict = build();
        assert_eq!(dict.categories('・'), vec!["DEFAULT"]);
        let dict = dict.reset_char_categories('・', &["SYMBOL"]).unwrap();
        assert_eq!(dict.categories('・'), vec!["SYMBOL"]);
        assert!(dict.reset_char_categories('・', &["KANJI"]).is_err());
    }

    #[test]
    fn test_inject() {
        let dict = build()
            .inject("東京", WordParam::new(0, 0, -10), "固有名詞")
            .unwrap();
        let e = dict.entry(WordIdx::new(LexType::Synthetic, 1)).unwrap();
        assert_eq!(e.feature, "固有名詞");
        assert!(dict.inject("京都", WordParam::new(1, 0, 0), "*").is_err());
    }
}
