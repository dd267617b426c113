use crate::dictionary::{LexType, WordIdx, WordParam};

/// Position of a node in a [`Lattice`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    row: u32,
    slot: u32,
}

impl NodeId {
    #[inline(always)]
    const fn new(row: usize, slot: usize) -> Self {
        Self {
            row: row as u32,
            slot: slot as u32,
        }
    }

    #[inline(always)]
    pub const fn row(&self) -> usize {
        self.row as usize
    }

    #[inline(always)]
    pub const fn slot(&self) -> usize {
        self.slot as usize
    }
}

#[derive(Default, Debug, Clone)]
pub struct Node {
    word_idx: WordIdx,
    word_param: WordParam,
    start_char: usize,
    end_char: usize,
}

impl Node {
    #[inline(always)]
    pub const fn word_idx(&self) -> WordIdx {
        self.word_idx
    }

    #[inline(always)]
    pub const fn lex_type(&self) -> LexType {
        self.word_idx.lex_type
    }

    #[inline(always)]
    pub const fn word_param(&self) -> WordParam {
        self.word_param
    }

    #[inline(always)]
    pub const fn left_id(&self) -> u16 {
        self.word_param.left_id
    }

    #[inline(always)]
    pub const fn right_id(&self) -> u16 {
        self.word_param.right_id
    }

    #[inline(always)]
    pub const fn word_cost(&self) -> i32 {
        self.word_param.word_cost as i32
    }

    /// Start position in characters. BOS starts and ends at 0.
    #[inline(always)]
    pub const fn start_char(&self) -> usize {
        self.start_char
    }

    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    #[inline(always)]
    pub const fn len_char(&self) -> usize {
        self.end_char - self.start_char
    }
}

/// Candidate nodes of a sentence.
///
/// `rows[start_char + 1]` holds the nodes starting at `start_char`, with BOS in
/// the first row and EOS in the last. `ends[end_char]` lists the nodes ending at
/// `end_char` in insertion order.
#[derive(Default)]
pub struct Lattice {
    rows: Vec<Vec<Node>>,
    ends: Vec<Vec<NodeId>>,
    len_char: usize,
    num_nodes: usize,
}

impl Lattice {
    pub fn reset(&mut self, new_len_char: usize, bos: (WordIdx, WordParam)) {
        Self::reset_vec(&mut self.rows, new_len_char + 2);
        Self::reset_vec(&mut self.ends, new_len_char + 1);
        self.len_char = new_len_char;
        self.num_nodes = 0;
        self.insert_bos(bos);
    }

    fn reset_vec<T>(data: &mut Vec<Vec<T>>, new_len: usize) {
        for v in data.iter_mut() {
            v.clear();
        }
        let cur_len = data.len();
        if cur_len <= new_len {
            data.reserve(new_len - cur_len);
            for _ in cur_len..new_len {
                data.push(Vec::with_capacity(16))
            }
        }
    }

    /// Returns the number of characters of the set sentence.
    #[inline(always)]
    pub const fn len_char(&self) -> usize {
        self.len_char
    }

    /// Returns the number of nodes including BOS and EOS.
    #[inline(always)]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of rows, i.e., `len_char + 2`.
    #[inline(always)]
    pub const fn num_rows(&self) -> usize {
        self.len_char + 2
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &[Node] {
        &self.rows[row]
    }

    #[inline(always)]
    pub fn ends(&self, end_char: usize) -> &[NodeId] {
        &self.ends[end_char]
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.rows[id.row()][id.slot()]
    }

    #[inline(always)]
    pub const fn bos_id(&self) -> NodeId {
        NodeId::new(0, 0)
    }

    /// Returns the id of EOS, or `None` before [`Lattice::insert_eos`].
    #[inline(always)]
    pub fn eos_id(&self) -> Option<NodeId> {
        let row = self.num_rows() - 1;
        (!self.rows[row].is_empty()).then(|| NodeId::new(row, 0))
    }

    fn insert_bos(&mut self, (word_idx, word_param): (WordIdx, WordParam)) {
        self.rows[0].push(Node {
            word_idx,
            word_param,
            start_char: 0,
            end_char: 0,
        });
        let bos_id = self.bos_id();
        self.ends[0].push(bos_id);
        self.num_nodes += 1;
    }

    pub fn insert_eos(&mut self, (word_idx, word_param): (WordIdx, WordParam)) {
        let row = self.num_rows() - 1;
        debug_assert!(self.rows[row].is_empty());
        self.rows[row].push(Node {
            word_idx,
            word_param,
            start_char: self.len_char,
            end_char: self.len_char,
        });
        self.num_nodes += 1;
    }

    pub fn insert_node(
        &mut self,
        start_char: usize,
        end_char: usize,
        word_idx: WordIdx,
        word_param: WordParam,
    ) {
        debug_assert!(start_char < end_char);
        debug_assert!(end_char <= self.len_char);

        let row = start_char + 1;
        let id = NodeId::new(row, self.rows[row].len());
        self.rows[row].push(Node {
            word_idx,
            word_param,
            start_char,
            end_char,
        });
        self.ends[end_char].push(id);
        self.num_nodes += 1;
    }

    /// Checks if at least one node ends at the position.
    #[inline(always)]
    pub fn has_previous_node(&self, i: usize) -> bool {
        self.ends.get(i).map(|d| !d.is_empty()).unwrap_or(false)
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lattice {{ rows: [")?;
        for (i, r) in self.rows[..self.num_rows()].iter().enumerate() {
            writeln!(f, "{} => {:?}", i, r)?;
        }
        writeln!(f, "]}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel() -> (WordIdx, WordParam) {
        (WordIdx::new(LexType::Synthetic, 0), WordParam::default())
    }

    #[test]
    fn test_rows_and_ends() {
        let mut lattice = Lattice::default();
        lattice.reset(2, sentinel());
        lattice.insert_node(0, 1, WordIdx::new(LexType::System, 0), WordParam::default());
        lattice.insert_node(0, 2, WordIdx::new(LexType::System, 1), WordParam::default());
        lattice.insert_node(1, 2, WordIdx::new(LexType::Unknown, 0), WordParam::default());
        assert_eq!(lattice.eos_id(), None);
        lattice.insert_eos(sentinel());

        assert_eq!(lattice.num_rows(), 4);
        assert_eq!(lattice.num_nodes(), 5);
        assert_eq!(lattice.row(1).len(), 2);
        assert_eq!(lattice.row(2).len(), 1);
        assert_eq!(lattice.ends(0), &[lattice.bos_id()]);
        assert_eq!(lattice.ends(2), &[NodeId::new(1, 1), NodeId::new(2, 0)]);
        assert_eq!(lattice.eos_id(), Some(NodeId::new(3, 0)));
        assert_eq!(lattice.node(NodeId::new(2, 0)).lex_type(), LexType::Unknown);
        assert!(lattice.has_previous_node(1));
        assert!(!lattice.has_previous_node(3));
    }

    #[test]
    fn test_reset_reuses_buffers() {
        let mut lattice = Lattice::default();
        lattice.reset(3, sentinel());
        lattice.insert_node(0, 3, WordIdx::new(LexType::System, 0), WordParam::default());
        lattice.reset(1, sentinel());
        assert_eq!(lattice.num_nodes(), 1);
        assert!(lattice.row(1).is_empty());
        assert!(!lattice.has_previous_node(1));
    }
}
