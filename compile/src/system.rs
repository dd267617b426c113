use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use tsumugi::dictionary::resource::DirectoryResolver;
use tsumugi::SystemDictionaryBuilder;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "system",
    about = "A program to compile dictionary resources from MeCab-style sources."
)]
struct Args {
    /// System lexicon file (lex.csv).
    #[clap(short = 'l', long)]
    lexicon_in: PathBuf,

    /// Matrix definition file (matrix.def).
    #[clap(short = 'm', long)]
    matrix_in: PathBuf,

    /// Character definition file (char.def).
    #[clap(short = 'c', long)]
    char_in: PathBuf,

    /// Unknown word definition file (unk.def).
    #[clap(short = 'u', long)]
    unk_in: PathBuf,

    /// User lexicon file in the same format as lex.csv.
    #[clap(long)]
    user_lexicon_in: Option<PathBuf>,

    /// Directory to which the resources are output.
    #[clap(short = 'o', long)]
    resource_out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("compiling the system dictionary");
    let start = Instant::now();
    let mut dict = SystemDictionaryBuilder::from_readers(
        File::open(args.lexicon_in)?,
        File::open(args.matrix_in)?,
        File::open(args.char_in)?,
        File::open(args.unk_in)?,
    )?;
    if let Some(user_lexicon_in) = args.user_lexicon_in {
        dict = dict.reset_user_lexicon_from_reader(Some(File::open(user_lexicon_in)?))?;
    }
    tracing::info!(seconds = start.elapsed().as_secs_f64(), "compiled");

    let resolver = DirectoryResolver::new(&args.resource_out);
    resolver.write_all(dict.to_resources()?)?;
    eprintln!("Wrote the resources into {:?}", &args.resource_out);

    Ok(())
}
