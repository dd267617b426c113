//! Provider of a routine for tokenization.
use crate::dictionary::{WordIdx, WordParam};
use crate::errors::Result;
use crate::sentence::Sentence;
use crate::token::{Token, TokenIter};
use crate::tokenizer::decompose::{Boundary, Decomposer};
use crate::tokenizer::lattice::{Lattice, Node, NodeId};
use crate::tokenizer::search::PathSearcher;
use crate::tokenizer::{LatticeSources, Mode, Tokenizer};

/// Node of a resultant token.
#[derive(Clone, Debug)]
pub(crate) struct TopNode {
    pub start_char: usize,
    pub end_char: usize,
    pub word_idx: WordIdx,
    pub word_param: WordParam,
    pub total_cost: i64,
}

impl TopNode {
    fn from_node(node: &Node, total_cost: i64) -> Self {
        Self {
            start_char: node.start_char(),
            end_char: node.end_char(),
            word_idx: node.word_idx(),
            word_param: node.word_param(),
            total_cost,
        }
    }

    #[inline(always)]
    pub const fn len_char(&self) -> usize {
        self.end_char - self.start_char
    }
}

/// Provider of a routine for tokenization.
///
/// It holds the internal data structures used in tokenization,
/// which can be reused to avoid unnecessary memory reallocation.
pub struct Worker<'t> {
    pub(crate) tokenizer: &'t Tokenizer,
    pub(crate) sent: Sentence,
    lattice: Lattice,
    searcher: PathSearcher,
    path: Vec<NodeId>,
    pub(crate) top_nodes: Vec<TopNode>,
    decomposer: Decomposer,
}

impl<'t> Worker<'t> {
    /// Creates a new instance.
    pub(crate) fn new(tokenizer: &'t Tokenizer) -> Self {
        Self {
            tokenizer,
            sent: Sentence::new(),
            lattice: Lattice::default(),
            searcher: PathSearcher::default(),
            path: vec![],
            top_nodes: vec![],
            decomposer: Decomposer::default(),
        }
    }

    /// Resets the input sentence to be tokenized.
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.sent.clear();
        self.top_nodes.clear();
        let input = input.as_ref();
        if !input.is_empty() {
            self.sent.set_sentence(input);
            self.sent.compile(
                self.tokenizer.dictionary().char_prop(),
                self.tokenizer.kanji_cateset(),
            );
        }
    }

    /// Tokenizes the input sentence set in `reset_sentence()`.
    ///
    /// # Errors
    ///
    /// [`TsumugiError::DisconnectedLattice`](crate::errors::TsumugiError::DisconnectedLattice)
    /// is returned when no path reaches the end of the sentence.
    pub fn tokenize(&mut self) -> Result<()> {
        self.top_nodes.clear();
        self.path.clear();
        if self.sent.len_char() == 0 {
            return Ok(());
        }

        let tokenizer = self.tokenizer;
        let dict = tokenizer.dictionary();
        let config = tokenizer.config();
        let synthetic = dict.synthetic();
        tokenizer.build_lattice(
            &self.sent,
            &mut self.lattice,
            LatticeSources::ALL,
            synthetic.begin_of_sentence(),
            synthetic.end_of_sentence(),
        );
        self.searcher.search(
            &self.lattice,
            &self.sent,
            dict.connector(),
            Some(&config.penalty),
        )?;
        self.searcher.append_best_path(&self.lattice, &mut self.path);

        if config.mode.splits_compounds() {
            self.decompose_path();
        } else {
            for &id in &self.path {
                let total_cost = self.searcher.path_cost(id).unwrap_or_default();
                self.top_nodes
                    .push(TopNode::from_node(self.lattice.node(id), total_cost));
            }
        }
        if config.mode == Mode::CompoundSplitStrict {
            self.split_long_tokens(config.strict_max_len);
        }

        tracing::trace!(
            len_char = self.sent.len_char(),
            num_nodes = self.lattice.num_nodes(),
            num_tokens = self.top_nodes.len(),
            "tokenized a sentence"
        );
        Ok(())
    }

    fn decompose_path(&mut self) {
        let tokenizer = self.tokenizer;
        let (_, bos_param) = tokenizer.dictionary().synthetic().begin_of_sentence();
        let (_, eos_param) = tokenizer.dictionary().synthetic().end_of_sentence();

        let mut prev_total = 0;
        for (i, &id) in self.path.iter().enumerate() {
            let node = self.lattice.node(id);
            let total_cost = self.searcher.path_cost(id).unwrap_or_default();
            let whole = TopNode::from_node(node, total_cost);
            let boundary = Boundary {
                prev_right_id: self
                    .top_nodes
                    .last()
                    .map_or(bos_param.right_id, |t| t.word_param.right_id),
                next_left_id: self
                    .path
                    .get(i + 1)
                    .map_or(eos_param.left_id, |&next| self.lattice.node(next).left_id()),
                prev_total,
            };
            if !self.decomposer.decompose(
                tokenizer,
                &self.sent,
                &whole,
                boundary,
                &mut self.top_nodes,
            ) {
                self.top_nodes.push(whole);
            }
            prev_total = total_cost;
        }
    }

    /// Cuts tokens longer than `max_len` into pieces of `max_len` characters.
    ///
    /// The pieces are labeled as unknown words of their first characters and
    /// share the total cost of the token they are cut from.
    fn split_long_tokens(&mut self, max_len: usize) {
        if self.top_nodes.iter().all(|t| t.len_char() <= max_len) {
            return;
        }
        let tokenizer = self.tokenizer;
        let unk_handler = tokenizer.dictionary().unk_handler();
        let top_nodes = std::mem::take(&mut self.top_nodes);
        for t in top_nodes {
            if t.len_char() <= max_len {
                self.top_nodes.push(t);
                continue;
            }
            let mut start_char = t.start_char;
            while start_char < t.end_char {
                let end_char = (start_char + max_len).min(t.end_char);
                let (word_idx, word_param) =
                    unk_handler.first_entry(self.sent.char_info(start_char));
                self.top_nodes.push(TopNode {
                    start_char,
                    end_char,
                    word_idx,
                    word_param,
                    total_cost: t.total_cost,
                });
                start_char = end_char;
            }
        }
    }

    /// Gets the number of resultant tokens.
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.top_nodes.len()
    }

    /// Gets the `i`-th resultant token.
    #[inline(always)]
    pub fn token<'w>(&'w self, i: usize) -> Token<'w> {
        Token::new(self, i)
    }

    /// Creates an iterator of resultant tokens.
    #[inline(always)]
    pub fn token_iter<'w>(&'w self) -> TokenIter<'w> {
        TokenIter::new(self, 0)
    }
}
