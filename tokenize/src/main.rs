use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use tsumugi::dictionary::resource::DirectoryResolver;
use tsumugi::{Dictionary, Mode, Penalty, Tokenizer, TokenizerConfig};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ModeArg {
    Baseline,
    CompoundSplit,
    CompoundSplitStrict,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Baseline => Self::Baseline,
            ModeArg::CompoundSplit => Self::CompoundSplit,
            ModeArg::CompoundSplitStrict => Self::CompoundSplitStrict,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "A program to tokenize lines from stdin.")]
struct Args {
    /// Directory of the compiled resources.
    #[clap(short = 'i', long)]
    resource_in: PathBuf,

    /// User lexicon file (csv) replacing the compiled one, if any.
    #[clap(short = 'u', long)]
    user_lexicon_in: Option<PathBuf>,

    /// Granularity of tokens.
    #[clap(short = 'm', long, value_enum, default_value_t = ModeArg::Baseline)]
    mode: ModeArg,

    /// Prints surfaces separated by spaces.
    #[clap(short = 'w', long)]
    wakachi: bool,

    /// Treats the middle dot as a symbol.
    #[clap(long)]
    split_on_nakaguro: bool,

    #[clap(long, default_value = "2")]
    kanji_length_threshold: usize,

    #[clap(long, default_value = "3000")]
    kanji_penalty: i32,

    #[clap(long, default_value = "7")]
    other_length_threshold: usize,

    #[clap(long, default_value = "1700")]
    other_penalty: i32,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let mut dict = Dictionary::from_resolver(&DirectoryResolver::new(&args.resource_in))?;
    if let Some(user_lexicon_in) = args.user_lexicon_in {
        dict = dict.reset_user_lexicon_from_reader(Some(std::fs::File::open(user_lexicon_in)?))?;
    }

    let config = TokenizerConfig {
        mode: args.mode.into(),
        penalty: Penalty {
            kanji_length_threshold: args.kanji_length_threshold,
            kanji_penalty: args.kanji_penalty,
            other_length_threshold: args.other_length_threshold,
            other_penalty: args.other_penalty,
        },
        split_on_nakaguro: args.split_on_nakaguro,
        ..TokenizerConfig::default()
    };
    tracing::info!(?config, "configured the tokenizer");
    let tokenizer = Tokenizer::with_config(dict, config)?;
    let mut worker = tokenizer.new_worker();
    eprintln!("Ready to tokenize :)");

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());

    #[allow(clippy::significant_drop_in_scrutinee)]
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        worker.reset_sentence(&line);
        worker.tokenize()?;
        if args.wakachi {
            let surfaces: Vec<_> = worker.token_iter().map(|t| t.surface()).collect();
            writeln!(out, "{}", surfaces.join(" "))?;
        } else {
            for t in worker.token_iter() {
                writeln!(out, "{}\t{}", t.surface(), t.feature())?;
            }
            writeln!(out, "EOS")?;
        }
    }
    out.flush()?;

    Ok(())
}
