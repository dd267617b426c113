use crate::dictionary::connector::Connector;
use crate::dictionary::LexType;
use crate::errors::{Result, TsumugiError};
use crate::sentence::Sentence;
use crate::tokenizer::config::Penalty;
use crate::tokenizer::lattice::{Lattice, Node, NodeId};

#[derive(Clone, Copy, Debug)]
struct PathCell {
    cost: i64,
    prev: Option<NodeId>,
}

/// Minimum-cost path search over a [`Lattice`].
///
/// Path costs and back-pointers are kept in cells parallel to the lattice rows,
/// where `None` marks an unreachable node. Costs are accumulated in `i64`,
/// so long inputs never overflow.
#[derive(Default)]
pub struct PathSearcher {
    cells: Vec<Vec<Option<PathCell>>>,
}

impl PathSearcher {
    fn reset(&mut self, lattice: &Lattice) {
        let num_rows = lattice.num_rows();
        if self.cells.len() < num_rows {
            self.cells.resize_with(num_rows, Vec::new);
        }
        for (row, cells) in self.cells[..num_rows].iter_mut().enumerate() {
            cells.clear();
            cells.resize(lattice.row(row).len(), None);
        }
    }

    /// Computes the minimum path cost of every node from BOS.
    ///
    /// For ties, the predecessor inserted first is preferred. If `penalty` is
    /// given, it is added to unknown words.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::DisconnectedLattice`] is returned when EOS is unreachable.
    pub fn search(
        &mut self,
        lattice: &Lattice,
        sent: &Sentence,
        connector: &Connector,
        penalty: Option<&Penalty>,
    ) -> Result<()> {
        self.reset(lattice);
        self.cells[0][0] = Some(PathCell {
            cost: 0,
            prev: None,
        });

        for row in 1..lattice.num_rows() {
            let start_char = row - 1;
            for (slot, node) in lattice.row(row).iter().enumerate() {
                let node_cost = i64::from(node.word_cost())
                    + i64::from(Self::penalty_cost(node, sent, penalty));
                let mut best: Option<PathCell> = None;
                for &left_id in lattice.ends(start_char) {
                    let Some(left) = self.cell(left_id) else {
                        continue;
                    };
                    let left_node = lattice.node(left_id);
                    let cost = left.cost
                        + i64::from(connector.cost(left_node.right_id(), node.left_id()))
                        + node_cost;
                    if best.map_or(true, |best| cost < best.cost) {
                        best = Some(PathCell {
                            cost,
                            prev: Some(left_id),
                        });
                    }
                }
                self.cells[row][slot] = best;
            }
        }

        match lattice.eos_id() {
            Some(eos_id) if self.cell(eos_id).is_some() => Ok(()),
            _ => Err(TsumugiError::disconnected_lattice(lattice.len_char())),
        }
    }

    /// Gets the extra cost of a node.
    #[inline(always)]
    pub fn penalty_cost(node: &Node, sent: &Sentence, penalty: Option<&Penalty>) -> i32 {
        let Some(penalty) = penalty else {
            return 0;
        };
        match node.lex_type() {
            LexType::Unknown => penalty.span_cost(
                node.len_char(),
                sent.is_kanji_only(node.start_char(), node.end_char()),
            ),
            LexType::System | LexType::User | LexType::Synthetic => 0,
        }
    }

    #[inline(always)]
    fn cell(&self, id: NodeId) -> Option<PathCell> {
        self.cells[id.row()][id.slot()]
    }

    /// Gets the minimum path cost from BOS to the node, if reachable.
    #[inline(always)]
    pub fn path_cost(&self, id: NodeId) -> Option<i64> {
        self.cell(id).map(|cell| cell.cost)
    }

    /// Appends the nodes of the minimum-cost path in order, excluding BOS and EOS.
    ///
    /// It must be called after a successful [`PathSearcher::search`].
    pub fn append_best_path(&self, lattice: &Lattice, path: &mut Vec<NodeId>) {
        let Some(eos_id) = lattice.eos_id() else {
            return;
        };
        let offset = path.len();
        let mut prev = self.cell(eos_id).and_then(|cell| cell.prev);
        while let Some(id) = prev {
            if id == lattice.bos_id() {
                break;
            }
            path.push(id);
            prev = self.cell(id).and_then(|cell| cell.prev);
        }
        path[offset..].reverse();
    }
}
