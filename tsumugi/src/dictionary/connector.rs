mod builder;

use bincode::{Decode, Encode};

/// Dense matrix of connection costs.
#[derive(Decode, Encode)]
pub struct Connector {
    data: Vec<i16>,
    num_right: usize,
    num_left: usize,
}

impl Connector {
    pub const fn new(data: Vec<i16>, num_right: usize, num_left: usize) -> Self {
        Self {
            data,
            num_right,
            num_left,
        }
    }

    /// Returns the number of right connection ids.
    #[inline(always)]
    pub const fn num_right(&self) -> usize {
        self.num_right
    }

    /// Returns the number of left connection ids.
    #[inline(always)]
    pub const fn num_left(&self) -> usize {
        self.num_left
    }

    /// Checks if the matrix has a cell for the pair.
    #[inline(always)]
    pub const fn contains(&self, right_id: u16, left_id: u16) -> bool {
        (right_id as usize) < self.num_right && (left_id as usize) < self.num_left
    }

    /// Checks if the matrix shape agrees with the data length.
    pub(crate) fn is_consistent(&self) -> bool {
        self.num_right.checked_mul(self.num_left) == Some(self.data.len())
    }

    #[inline(always)]
    fn index(&self, right_id: u16, left_id: u16) -> usize {
        debug_assert!(usize::from(right_id) < self.num_right);
        debug_assert!(usize::from(left_id) < self.num_left);
        let index = usize::from(left_id) * self.num_right + usize::from(right_id);
        debug_assert!(index < self.data.len());
        index
    }

    /// Gets the cost of connecting a morpheme ending with `right_id`
    /// to one starting with `left_id`.
    #[inline(always)]
    pub fn cost(&self, right_id: u16, left_id: u16) -> i32 {
        let index = self.index(right_id, left_id);
        i32::from(self.data[index])
    }
}
