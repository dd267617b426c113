use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use tsumugi::dictionary::resource::DirectoryResolver;
use tsumugi::Dictionary;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "verify",
    about = "A program to check that compiled resources can be loaded."
)]
struct Args {
    /// Directory of the resources.
    #[clap(short = 'i', long)]
    resource_in: PathBuf,

    /// Characters whose categories are printed.
    #[clap(short = 'c', long, default_value = "")]
    chars: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let start = Instant::now();
    let dict = Dictionary::from_resolver(&DirectoryResolver::new(&args.resource_in))?;
    tracing::info!(seconds = start.elapsed().as_secs_f64(), "loaded");
    println!("OK");
    println!("BOS/EOS connection cost: {}", dict.connection_cost(0, 0)?);

    for c in args.chars.chars() {
        println!("{c}\t{}", dict.categories(c).join(","));
    }

    Ok(())
}
