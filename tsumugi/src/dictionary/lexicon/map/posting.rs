use bincode::{Decode, Encode};

use crate::errors::Result;
use crate::utils::FromU32;

/// Groups of word ids stored back to back, each group led by its size.
///
/// A group is addressed by the offset of its size cell.
#[derive(Default, Decode, Encode)]
pub struct Postings {
    data: Vec<u32>,
}

impl Postings {
    /// Appends a group and returns its offset.
    pub fn push_group(&mut self, word_ids: &[u32]) -> Result<u32> {
        let offset = u32::try_from(self.data.len())?;
        self.data.push(u32::try_from(word_ids.len())?);
        self.data.extend_from_slice(word_ids);
        Ok(offset)
    }

    /// Gets the word ids of the group at `offset`.
    ///
    /// An offset or size outside the data yields no ids.
    #[inline(always)]
    pub fn group(&self, offset: u32) -> &[u32] {
        let offset = usize::from_u32(offset);
        let Some(&size) = self.data.get(offset) else {
            return &[];
        };
        self.data
            .get(offset + 1..offset + 1 + usize::from_u32(size))
            .unwrap_or_default()
    }
}
