use crate::dictionary::resource::{self, MemoryResolver};
use crate::dictionary::{Dictionary, LexType, SystemDictionaryBuilder, WordParam};
use crate::errors::TsumugiError;
use crate::tokenizer::{Mode, Penalty, Tokenizer, TokenizerConfig};

const LEX_CSV: &str = include_str!("./resources/lex.csv");
const USER_CSV: &str = include_str!("./resources/user.csv");
const MATRIX_DEF: &str = include_str!("./resources/matrix.def");
const CHAR_DEF: &str = include_str!("./resources/char.def");
const UNK_DEF: &str = include_str!("./resources/unk.def");

fn build_dict() -> Dictionary {
    SystemDictionaryBuilder::from_readers(
        LEX_CSV.as_bytes(),
        MATRIX_DEF.as_bytes(),
        CHAR_DEF.as_bytes(),
        UNK_DEF.as_bytes(),
    )
    .unwrap()
}

fn build_tokenizer(config: TokenizerConfig) -> Tokenizer {
    Tokenizer::with_config(build_dict(), config).unwrap()
}

fn surfaces(tokenizer: &Tokenizer, input: &str) -> Vec<String> {
    tokenizer
        .tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.surface)
        .collect()
}

#[test]
fn test_tokenize_ascii_run() {
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("abc").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].surface, "abc");
    assert_eq!(tokens[0].range_char, 0..3);
    assert_eq!(tokens[0].lex_type(), LexType::Unknown);
    assert_eq!(tokens[0].feature, "名詞,固有名詞,組織,*,*,*,*");
    assert_eq!(tokens[0].reading(), None);

    //   c=0      c=3000      c=0
    //  [BOS] -- [abc] -- [EOS]
    //     r=0  l=1  r=1  l=0
    //     c=-100
    assert_eq!(tokens[0].total_cost, -100 + 3000);
}

#[test]
fn test_tokenize_tokyo() {
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("東京都").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].surface, "東京都");
    assert_eq!(tokens[0].range_char, 0..3);
    assert_eq!(tokens[0].range_byte, 0..9);
    assert_eq!(tokens[0].lex_type(), LexType::System);
    assert_eq!(
        tokens[0].feature,
        "名詞,固有名詞,地名,一般,*,*,東京都,トウキョウト,トーキョート"
    );

    //   c=0      c=1500      c=0
    //  [BOS] -- [東京都] -- [EOS]
    //     r=0  l=1   r=1  l=0
    //     c=-100
    assert_eq!(tokens[0].total_cost, -100 + 1500);
}

#[test]
fn test_tokenize_kyoto_iku() {
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("京都に行く").unwrap();

    assert_eq!(tokens.len(), 3);

    assert_eq!(tokens[0].surface, "京都");
    assert_eq!(tokens[0].range_byte, 0..6);
    assert_eq!(tokens[0].part_of_speech(), vec!["名詞", "固有名詞", "地名", "一般"]);
    assert_eq!(tokens[0].reading(), Some("キョウト".to_string()));

    assert_eq!(tokens[1].surface, "に");
    assert_eq!(tokens[1].range_char, 2..3);
    assert_eq!(tokens[1].base_form(), Some("に".to_string()));

    assert_eq!(tokens[2].surface, "行く");
    assert_eq!(tokens[2].range_char, 3..5);
    assert_eq!(tokens[2].range_byte, 9..15);
    assert_eq!(tokens[2].pronunciation(), Some("イク".to_string()));

    //   c=0     c=1200    c=300     c=500     c=0
    //  [BOS] -- [京都] -- [に] -- [行く] -- [EOS]
    //     r=0  l=1  r=1 l=2 r=2 l=3  r=3 l=0
    //     c=-100    c=-200    c=0
    assert_eq!(tokens[0].total_cost, -100 + 1200);
    assert_eq!(tokens[1].total_cost, 1100 - 200 + 300);
    assert_eq!(tokens[2].total_cost, 1200 + 500);
}

#[test]
fn test_tokenize_katakana_group() {
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("東京タワー").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].surface, "東京");
    assert_eq!(tokens[0].total_cost, -100 + 1000);

    // The katakana run is grouped into one unknown word.
    assert_eq!(tokens[1].surface, "タワー");
    assert_eq!(tokens[1].range_char, 2..5);
    assert_eq!(tokens[1].lex_type(), LexType::Unknown);
    assert_eq!(tokens[1].total_cost, 900 + 100 + 3500);
}

#[test]
fn test_tokenize_space() {
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("東京 京都").unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].surface, " ");
    assert_eq!(tokens[1].part_of_speech(), vec!["記号", "空白", "*", "*"]);
    assert_eq!(tokens[2].surface, "京都");
    assert_eq!(tokens[2].range_byte, 7..13);

    //   c=0     c=1000    c=1000    c=1200     c=0
    //  [BOS] -- [東京] -- [ ] -- [京都] -- [EOS]
    //     r=0  l=1  r=1 l=3 r=3 l=1  r=1 l=0
    //     c=-100    c=50      c=0
    assert_eq!(tokens[0].total_cost, 900);
    assert_eq!(tokens[1].total_cost, 900 + 50 + 1000);
    assert_eq!(tokens[2].total_cost, 1950 + 1200);
}

#[test]
fn test_tokenize_user_lexicon() {
    let tokenizer = Tokenizer::new(build_dict());
    assert_eq!(
        surfaces(&tokenizer, "東京スカイツリー"),
        vec!["東京", "スカイツリー"]
    );

    let dict = build_dict()
        .reset_user_lexicon_from_reader(Some(USER_CSV.as_bytes()))
        .unwrap();
    let tokenizer = Tokenizer::new(dict);
    let tokens = tokenizer.tokenize("東京スカイツリー").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].surface, "東京スカイツリー");
    assert_eq!(tokens[0].lex_type(), LexType::User);
    assert_eq!(tokens[0].reading(), Some("トウキョウスカイツリー".to_string()));
    assert_eq!(tokens[0].total_cost, -100 - 1000);
}

#[test]
fn test_tokenize_injected() {
    let dict = build_dict()
        .inject("京都に", WordParam::new(1, 2, -500), "名詞,固有名詞,一般,*,*,*,京都に,*,*")
        .unwrap();
    let tokenizer = Tokenizer::new(dict);
    let tokens = tokenizer.tokenize("京都に行く").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].surface, "京都に");
    assert_eq!(tokens[0].lex_type(), LexType::Synthetic);
    assert_eq!(tokens[0].base_form(), Some("京都に".to_string()));
    assert_eq!(tokens[0].reading(), None);
    assert_eq!(tokens[0].total_cost, -100 - 500);
    assert_eq!(tokens[1].surface, "行く");
    assert_eq!(tokens[1].total_cost, -600 + 500);
}

#[test]
fn test_kanji_penalty() {
    // A run of kanji numerals is grouped into one unknown word.
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("一二三").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].total_cost, -100 + 2500 + 3000);

    // A heavier penalty makes single characters cheaper.
    let tokenizer = build_tokenizer(TokenizerConfig {
        penalty: Penalty {
            kanji_penalty: 10000,
            ..Penalty::default()
        },
        ..TokenizerConfig::default()
    });
    let tokens = tokenizer.tokenize("一二三").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].total_cost, 2400);
    assert_eq!(tokens[1].total_cost, 2400 + 100 + 2500);
    assert_eq!(tokens[2].total_cost, 5000 + 100 + 2500);
}

#[test]
fn test_other_penalty() {
    let tokenizer = Tokenizer::new(build_dict());
    let tokens = tokenizer.tokenize("abcdefghij").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].total_cost, -100 + 3000 + 1700);
}

#[test]
fn test_compound_split() {
    let tokenizer = build_tokenizer(TokenizerConfig::default());
    let tokens = tokenizer.tokenize("自然言語処理").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].total_cost, -100 + 1000);

    let tokenizer = build_tokenizer(TokenizerConfig {
        mode: Mode::CompoundSplit,
        ..TokenizerConfig::default()
    });
    let tokens = tokenizer.tokenize("自然言語処理").unwrap();

    //   c=0     c=800     c=900     c=700     c=0
    //  [BOS] -- [自然] -- [言語] -- [処理] -- [EOS]
    //     r=0  l=1  r=1 l=1 r=1 l=1  r=1 l=0
    //     c=-100    c=100     c=100     c=-50
    //
    // The split (2450) costs more than the whole word (-100 + 1000 - 50),
    // which is a known word and thus carries no length penalty.
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].surface, "自然言語処理");
    assert_eq!(tokens[0].total_cost, -100 + 1000);
    assert_eq!(tokens[0].lex_type(), LexType::System);
}

#[test]
fn test_compound_split_keeps_non_nouns() {
    let tokenizer = build_tokenizer(TokenizerConfig {
        mode: Mode::CompoundSplit,
        compound_pattern: "^動詞,".to_string(),
        ..TokenizerConfig::default()
    });
    assert_eq!(surfaces(&tokenizer, "自然言語処理"), vec!["自然言語処理"]);
}

#[test]
fn test_compound_split_in_context() {
    let baseline = build_tokenizer(TokenizerConfig::default());
    let tokenizer = build_tokenizer(TokenizerConfig {
        mode: Mode::CompoundSplit,
        ..TokenizerConfig::default()
    });
    let tokens = tokenizer.tokenize("東京は自然言語処理").unwrap();
    assert_eq!(tokens, baseline.tokenize("東京は自然言語処理").unwrap());
    assert_eq!(
        tokens.iter().map(|t| t.surface.as_str()).collect::<Vec<_>>(),
        vec!["東京", "は", "自然言語処理"]
    );
    assert_eq!(tokens[2].total_cost, 900 - 100 + 1000);
}

#[test]
fn test_compound_split_strict() {
    let config = |mode| TokenizerConfig {
        mode,
        ..TokenizerConfig::default()
    };

    let tokenizer = build_tokenizer(config(Mode::CompoundSplit));
    assert_eq!(surfaces(&tokenizer, "abcdefghij"), vec!["abcdefghij"]);

    let tokenizer = build_tokenizer(config(Mode::CompoundSplitStrict));
    let tokens = tokenizer.tokenize("abcdefghij").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].surface, "abcdefg");
    assert_eq!(tokens[0].range_char, 0..7);
    assert_eq!(tokens[1].surface, "hij");
    assert_eq!(tokens[1].range_char, 7..10);
    for t in &tokens {
        assert_eq!(t.lex_type(), LexType::Unknown);
        assert_eq!(t.part_of_speech(), vec!["名詞", "固有名詞", "組織", "*"]);
        assert_eq!(t.total_cost, -100 + 3000 + 1700);
    }
}

#[test]
fn test_split_on_nakaguro() {
    let tokenizer = Tokenizer::new(build_dict());
    assert_eq!(surfaces(&tokenizer, "テレビ・ゲーム"), vec!["テレビ・ゲーム"]);

    let tokenizer = build_tokenizer(TokenizerConfig {
        split_on_nakaguro: true,
        ..TokenizerConfig::default()
    });
    let tokens = tokenizer.tokenize("テレビ・ゲーム").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].surface, "テレビ");
    assert_eq!(tokens[0].total_cost, 3400);
    assert_eq!(tokens[1].surface, "・");
    assert_eq!(tokens[1].part_of_speech(), vec!["記号", "一般", "*", "*"]);
    assert_eq!(tokens[1].total_cost, 3400 + 50 + 2000);
    assert_eq!(tokens[2].surface, "ゲーム");
    assert_eq!(tokens[2].total_cost, 5450 + 3500);
}

#[test]
fn test_worker_reuse() {
    let tokenizer = Tokenizer::new(build_dict());
    let mut worker = tokenizer.new_worker();

    worker.reset_sentence("京都に行く");
    worker.tokenize().unwrap();
    assert_eq!(worker.num_tokens(), 3);

    worker.reset_sentence("");
    worker.tokenize().unwrap();
    assert_eq!(worker.num_tokens(), 0);

    worker.reset_sentence("東京都");
    worker.tokenize().unwrap();
    assert_eq!(worker.num_tokens(), 1);
    assert_eq!(worker.token(0).surface(), "東京都");
    assert_eq!(worker.token(0).total_cost(), 1400);
}

#[test]
fn test_resources_roundtrip() {
    let dict = build_dict()
        .reset_user_lexicon_from_reader(Some(USER_CSV.as_bytes()))
        .unwrap();
    let resolver: MemoryResolver = dict.to_resources().unwrap().into_iter().collect();
    let loaded = Dictionary::from_resolver(&resolver).unwrap();

    let expected = Tokenizer::new(dict);
    let actual = Tokenizer::new(loaded);
    for input in [
        "東京スカイツリー",
        "京都に行く",
        "東京 京都",
        "一二三abc",
        "テレビ・ゲーム",
    ] {
        assert_eq!(
            expected.tokenize(input).unwrap(),
            actual.tokenize(input).unwrap()
        );
    }
}

#[test]
fn test_resources_missing_matrix() {
    let mut resolver: MemoryResolver = build_dict().to_resources().unwrap().into_iter().collect();
    resolver.remove(resource::MATRIX);
    assert!(matches!(
        Dictionary::from_resolver(&resolver),
        Err(TsumugiError::DictionaryLoad(_))
    ));
}

#[test]
fn test_long_input_cost() {
    let dict = SystemDictionaryBuilder::from_readers(
        "。,0,0,0,記号,句点".as_bytes(),
        "1 1\n0 0 30000".as_bytes(),
        "DEFAULT 0 1 0\nSYMBOL 1 0 0\n0x0021 SYMBOL".as_bytes(),
        "DEFAULT,0,0,0,記号,一般\nSYMBOL,0,0,30000,記号,一般".as_bytes(),
    )
    .unwrap();
    let tokenizer = Tokenizer::new(dict);
    let tokens = tokenizer.tokenize("!".repeat(40_000)).unwrap();
    assert_eq!(tokens.len(), 40_000);
    assert!(tokens.iter().all(|t| t.lex_type() == LexType::Unknown));
    assert_eq!(tokens[39_999].total_cost, 2_400_000_000);
}
