use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use wordnet_db::{LoadMode, WordNet};
use wordnet_morphy::Morphy;
use wordnet_types::Pos;

const USAGE: &str = "usage: cargo run -p wordnet-morphy --example lookup -- <dict-dir> <word>...";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(USAGE)?;
    let words: Vec<String> = args.collect();
    if words.is_empty() {
        bail!(USAGE);
    }

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;
    let morph = Morphy::load(&dict_dir)
        .with_context(|| format!("loading exceptions from {}", dict_dir.display()))?;

    for word in words {
        println!("{}", word);
        for pos in Pos::ALL {
            for cand in morph.lemmas_for(pos, &word, |p, lemma| wn.lemma_exists(p, lemma)) {
                println!("  {:<5} {:<16} [{:?}]", pos, cand.lemma, cand.source);
            }
        }
    }

    Ok(())
}
