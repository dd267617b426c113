use proptest::prelude::*;

use crate::dictionary::connector::Connector;
use crate::dictionary::{Dictionary, SystemDictionaryBuilder};
use crate::sentence::Sentence;
use crate::tokenizer::lattice::Lattice;
use crate::tokenizer::search::PathSearcher;
use crate::tokenizer::{LatticeSources, Mode, Penalty, Tokenizer, TokenizerConfig};

const LEX_CSV: &str = include_str!("./resources/lex.csv");
const USER_CSV: &str = include_str!("./resources/user.csv");
const MATRIX_DEF: &str = include_str!("./resources/matrix.def");
const CHAR_DEF: &str = include_str!("./resources/char.def");
const UNK_DEF: &str = include_str!("./resources/unk.def");

const ALPHABET: &[char] = &[
    '東', '京', '都', '自', '然', '言', '語', '処', '理', 'に', 'は', '行', 'く', 'a', 'b', '1',
    '一', '二', 'タ', 'ワ', 'ー', '・', ' ', '、', '!', 'Ω',
];

fn build_dict() -> Dictionary {
    SystemDictionaryBuilder::from_readers(
        LEX_CSV.as_bytes(),
        MATRIX_DEF.as_bytes(),
        CHAR_DEF.as_bytes(),
        UNK_DEF.as_bytes(),
    )
    .unwrap()
    .reset_user_lexicon_from_reader(Some(USER_CSV.as_bytes()))
    .unwrap()
}

fn build_tokenizer(mode: Mode, penalty: Penalty) -> Tokenizer {
    let config = TokenizerConfig {
        mode,
        penalty,
        ..TokenizerConfig::default()
    };
    Tokenizer::with_config(build_dict(), config).unwrap()
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Baseline),
        Just(Mode::CompoundSplit),
        Just(Mode::CompoundSplitStrict),
    ]
}

fn text_strategy(chars: &'static [char], max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(chars), 0..max_len)
        .prop_map(|v| v.into_iter().collect())
}

// Odd penalties never tie with the lattice costs, which are multiples of 50.
fn odd_penalty_strategy() -> impl Strategy<Value = i32> {
    (0..10000i32).prop_map(|p| 2 * p + 1)
}

/// Minimum cost over every path from `pos` to EOS, enumerated exhaustively.
fn brute_force_cost(
    lattice: &Lattice,
    sent: &Sentence,
    connector: &Connector,
    penalty: &Penalty,
    prev_right_id: u16,
    pos: usize,
) -> Option<i64> {
    if pos == lattice.len_char() {
        let eos = lattice.node(lattice.eos_id()?);
        return Some(i64::from(connector.cost(prev_right_id, eos.left_id())));
    }
    lattice
        .row(pos + 1)
        .iter()
        .filter_map(|node| {
            let cost = i64::from(connector.cost(prev_right_id, node.left_id()))
                + i64::from(node.word_cost())
                + i64::from(PathSearcher::penalty_cost(node, sent, Some(penalty)));
            brute_force_cost(
                lattice,
                sent,
                connector,
                penalty,
                node.right_id(),
                node.end_char(),
            )
            .map(|rest| cost + rest)
        })
        .min()
}

proptest! {
    #[test]
    fn test_tokens_cover_input(mode in mode_strategy(), input in text_strategy(ALPHABET, 16)) {
        let tokenizer = build_tokenizer(mode, Penalty::default());
        let tokens = tokenizer.tokenize(&input).unwrap();

        let joined: String = tokens.iter().map(|t| t.surface.as_str()).collect();
        prop_assert_eq!(&joined, &input);

        let mut pos_char = 0;
        let mut pos_byte = 0;
        for t in &tokens {
            prop_assert!(!t.surface.is_empty());
            prop_assert_eq!(t.range_char.start, pos_char);
            prop_assert_eq!(t.range_byte.start, pos_byte);
            prop_assert_eq!(&input[t.range_byte.clone()], t.surface.as_str());
            pos_char = t.range_char.end;
            pos_byte = t.range_byte.end;
        }
        prop_assert_eq!(pos_char, input.chars().count());
        prop_assert_eq!(pos_byte, input.len());

        if mode == Mode::CompoundSplitStrict {
            let max_len = tokenizer.config().strict_max_len;
            prop_assert!(tokens.iter().all(|t| t.range_char.len() <= max_len));
        }
    }

    #[test]
    fn test_tokenize_is_deterministic(
        mode in mode_strategy(),
        inputs in proptest::collection::vec(text_strategy(ALPHABET, 12), 1..4),
    ) {
        let tokenizer = build_tokenizer(mode, Penalty::default());
        let mut worker = tokenizer.new_worker();
        for input in &inputs {
            worker.reset_sentence(input);
            worker.tokenize().unwrap();
            let reused: Vec<_> = worker.token_iter().map(crate::token::TokenBuf::from).collect();
            prop_assert_eq!(&reused, &tokenizer.tokenize(input).unwrap());
            prop_assert_eq!(&reused, &tokenizer.tokenize(input).unwrap());
        }
    }

    #[test]
    fn test_viterbi_is_optimal(input in text_strategy(ALPHABET, 7)) {
        let tokenizer = build_tokenizer(Mode::Baseline, Penalty::default());
        let dict = tokenizer.dictionary();
        let connector = dict.connector();
        let penalty = &tokenizer.config().penalty;

        let mut sent = Sentence::new();
        sent.set_sentence(&input);
        sent.compile(dict.char_prop(), tokenizer.kanji_cateset());
        prop_assume!(sent.len_char() != 0);

        let mut lattice = Lattice::default();
        tokenizer.build_lattice(
            &sent,
            &mut lattice,
            LatticeSources::ALL,
            dict.synthetic().begin_of_sentence(),
            dict.synthetic().end_of_sentence(),
        );
        let mut searcher = PathSearcher::default();
        searcher.search(&lattice, &sent, connector, Some(penalty)).unwrap();

        let eos_id = lattice.eos_id().unwrap();
        let best = searcher.path_cost(eos_id).unwrap();
        let bos_right_id = lattice.node(lattice.bos_id()).right_id();
        prop_assert_eq!(
            Some(best),
            brute_force_cost(&lattice, &sent, connector, penalty, bos_right_id, 0)
        );

        let tokens = tokenizer.tokenize(&input).unwrap();
        let last = tokens.last().unwrap();
        let eos_left_id = lattice.node(eos_id).left_id();
        prop_assert_eq!(
            last.total_cost + i64::from(connector.cost(last.right_id, eos_left_id)),
            best
        );
    }

    #[test]
    fn test_penalty_is_monotone(
        input in text_strategy(&['a', 'b', 'c', '一', '二', '三'], 16),
        kanji_penalty in odd_penalty_strategy(),
        other_penalty in odd_penalty_strategy(),
        kanji_delta in 0..5000i32,
        other_delta in 0..5000i32,
    ) {
        // Unknown words never cross a boundary of alphabets and kanji numerals,
        // so each run is segmented on its own.
        let light = Penalty {
            kanji_penalty,
            other_penalty,
            ..Penalty::default()
        };
        let heavy = Penalty {
            kanji_penalty: kanji_penalty + 2 * kanji_delta,
            other_penalty: other_penalty + 2 * other_delta,
            ..Penalty::default()
        };
        let num_light = build_tokenizer(Mode::Baseline, light).tokenize(&input).unwrap().len();
        let num_heavy = build_tokenizer(Mode::Baseline, heavy).tokenize(&input).unwrap().len();
        prop_assert!(num_light <= num_heavy);
    }
}
