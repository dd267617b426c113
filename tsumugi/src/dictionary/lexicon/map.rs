pub mod posting;
pub mod trie;

use std::collections::BTreeMap;

use bincode::{Decode, Encode};

use crate::errors::Result;
use posting::Postings;
use trie::Trie;

/// Mapping from surfaces to word ids.
///
/// Distinct surfaces are keys of the trie, whose values point to the group of
/// word ids sharing the surface.
#[derive(Decode, Encode)]
pub struct WordMap {
    trie: Trie,
    postings: Postings,
}

impl WordMap {
    /// Builds the mapping, where the `i`-th surface gets the word id `i`.
    pub fn new<I, W>(surfaces: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for (word_id, surface) in surfaces.into_iter().enumerate() {
            groups
                .entry(surface.as_ref().to_string())
                .or_default()
                .push(u32::try_from(word_id)?);
        }

        let mut postings = Postings::default();
        let mut records = Vec::with_capacity(groups.len());
        for (surface, word_ids) in groups {
            records.push((surface, postings.push_group(&word_ids)?));
        }
        Ok(Self {
            trie: Trie::from_records(records)?,
            postings,
        })
    }

    /// Returns `(word_id, end_char)` of every word that is a prefix of `input`,
    /// in increasing order of `end_char`.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = (u32, usize)> + 'a {
        self.trie.common_prefix_iterator(input).flat_map(move |m| {
            self.postings
                .group(m.value)
                .iter()
                .map(move |&word_id| (word_id, m.end_char))
        })
    }
}
