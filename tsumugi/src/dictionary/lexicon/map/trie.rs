use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};

use crate::errors::{Result, TsumugiError};

/// Double-array trie from surfaces to postings offsets.
///
/// The records are serialized instead of the double array, which is rebuilt
/// and validated on decoding.
pub struct Trie {
    da: crawdad::Trie,
    records: Vec<(String, u32)>,
}

impl Encode for Trie {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.records, encoder)?;
        Ok(())
    }
}

impl Decode for Trie {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let records: Vec<(String, u32)> = Decode::decode(decoder)?;
        Self::from_records(records)
            .map_err(|e| DecodeError::OtherString(format!("invalid double-array trie: {e}")))
    }
}

bincode::impl_borrow_decode!(Trie);

impl Trie {
    /// Builds the double array from records sorted by key without duplicates.
    pub fn from_records(records: Vec<(String, u32)>) -> Result<Self> {
        if records.iter().any(|(k, _)| k.is_empty()) {
            return Err(TsumugiError::invalid_argument("records", "empty key"));
        }
        if records.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(TsumugiError::invalid_argument(
                "records",
                "keys must be sorted without duplicates",
            ));
        }
        let da = crawdad::Trie::from_records(records.iter().map(|(k, v)| (k, *v)))
            .map_err(|e| TsumugiError::invalid_argument("records", e.to_string()))?;
        Ok(Self { da, records })
    }

    /// Enumerates all keys that are prefixes of `input`, shortest first.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = TrieMatch> + 'a {
        self.da
            .common_prefix_search(input.iter().cloned())
            .map(move |(value, end_char)| TrieMatch::new(value, end_char))
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    pub value: u32,
    pub end_char: usize,
}

impl TrieMatch {
    #[inline(always)]
    pub const fn new(value: u32, end_char: usize) -> Self {
        Self { value, end_char }
    }
}
