use crate::common::BOS_EOS_CONNECTION_ID;
use crate::dictionary::WordParam;
use crate::sentence::Sentence;
use crate::tokenizer::lattice::{Lattice, NodeId};
use crate::tokenizer::search::PathSearcher;
use crate::tokenizer::worker::TopNode;
use crate::tokenizer::{LatticeSources, Tokenizer};

/// Context of a token on the minimum-cost path.
#[derive(Clone, Copy, Debug)]
pub struct Boundary {
    /// Right id of the preceding token, or of BOS.
    pub prev_right_id: u16,
    /// Left id of the following token, or of EOS.
    pub next_left_id: u16,
    /// Total cost up to the preceding token.
    pub prev_total: i64,
}

/// Splitter of compound words into lexicon words.
///
/// The surface of a compound is tokenized again between virtual sentinels
/// carrying the connection ids of its neighbours, with lexicon words only and
/// without the compound itself.
#[derive(Default)]
pub struct Decomposer {
    sent: Sentence,
    lattice: Lattice,
    searcher: PathSearcher,
    path: Vec<NodeId>,
}

impl Decomposer {
    /// Appends the parts of `whole` to `out` if it is a compound and splitting
    /// it is strictly cheaper than keeping it. Returns `false` otherwise,
    /// leaving `out` untouched.
    ///
    /// Both sides are scored by connection and word costs only; no length
    /// penalty is involved.
    pub fn decompose(
        &mut self,
        tokenizer: &Tokenizer,
        sent: &Sentence,
        whole: &TopNode,
        boundary: Boundary,
        out: &mut Vec<TopNode>,
    ) -> bool {
        if !tokenizer.is_compound(whole.word_idx, whole.len_char()) {
            return false;
        }

        let dict = tokenizer.dictionary();
        let connector = dict.connector();
        let surface =
            &sent.raw()[sent.byte_position(whole.start_char)..sent.byte_position(whole.end_char)];
        self.sent.set_sentence(surface);
        self.sent
            .compile(dict.char_prop(), tokenizer.kanji_cateset());

        let (sentinel_idx, _) = dict.synthetic().begin_of_sentence();
        let bos = (
            sentinel_idx,
            WordParam::new(BOS_EOS_CONNECTION_ID, boundary.prev_right_id, 0),
        );
        let eos = (
            sentinel_idx,
            WordParam::new(boundary.next_left_id, BOS_EOS_CONNECTION_ID, 0),
        );
        tokenizer.build_lattice(&self.sent, &mut self.lattice, LatticeSources::PARTS, bos, eos);

        if self
            .searcher
            .search(&self.lattice, &self.sent, connector, None)
            .is_err()
        {
            return false;
        }
        let Some(split_cost) = self
            .lattice
            .eos_id()
            .and_then(|eos_id| self.searcher.path_cost(eos_id))
        else {
            return false;
        };

        let param = whole.word_param;
        let whole_cost = i64::from(connector.cost(boundary.prev_right_id, param.left_id))
            + i64::from(param.word_cost)
            + i64::from(connector.cost(param.right_id, boundary.next_left_id));
        if split_cost >= whole_cost {
            return false;
        }

        self.path.clear();
        self.searcher.append_best_path(&self.lattice, &mut self.path);
        for &id in &self.path {
            let node = self.lattice.node(id);
            out.push(TopNode {
                start_char: whole.start_char + node.start_char(),
                end_char: whole.start_char + node.end_char(),
                word_idx: node.word_idx(),
                word_param: node.word_param(),
                total_cost: boundary.prev_total + self.searcher.path_cost(id).unwrap_or_default(),
            });
        }

        tracing::trace!(
            surface,
            whole_cost,
            split_cost,
            num_parts = self.path.len(),
            "decomposed a compound"
        );
        true
    }
}
