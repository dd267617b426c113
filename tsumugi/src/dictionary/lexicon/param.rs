use bincode::{Decode, Encode};

/// Parameters of a morpheme used in the lattice search.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Decode, Encode)]
pub struct WordParam {
    /// Left connection id, looked up with the right id of the preceding morpheme.
    pub left_id: u16,
    /// Right connection id, looked up with the left id of the following morpheme.
    pub right_id: u16,
    /// Cost of the morpheme itself. Lower is more preferred.
    pub word_cost: i16,
}

impl WordParam {
    /// Creates a new instance.
    #[inline(always)]
    pub const fn new(left_id: u16, right_id: u16, word_cost: i16) -> Self {
        Self {
            left_id,
            right_id,
            word_cost,
        }
    }
}

#[derive(Default, Decode, Encode)]
pub struct WordParams {
    params: Vec<WordParam>,
}

impl WordParams {
    pub fn new<I>(params: I) -> Self
    where
        I: IntoIterator<Item = WordParam>,
    {
        Self {
            params: params.into_iter().collect(),
        }
    }

    #[inline(always)]
    pub fn get(&self, word_id: usize) -> Option<WordParam> {
        self.params.get(word_id).copied()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordParam> {
        self.params.iter()
    }
}
