use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use lesk_core::{Outcome, Tagger, disambiguate};
use lesk_wordnet::load_collaborators;
use wordnet_db::LoadMode;

const USAGE: &str =
    "usage: cargo run -p lesk-wordnet --example disambiguate -- <dict-dir> <word> <sentence...>";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(USAGE)?;
    let word = args.next().context(USAGE)?;
    let sentence = args.collect::<Vec<_>>().join(" ");
    if sentence.is_empty() {
        bail!(USAGE);
    }

    let (tagger, lexicon) = load_collaborators(&dict_dir, LoadMode::Mmap)?;

    for token in tagger.tag(&sentence).tokens() {
        println!(
            "  {:<14} {:<6} {:<14}{}",
            token.text,
            token.pos,
            token.lemma,
            if token.is_stop { " (stop)" } else { "" }
        );
    }

    match disambiguate(&tagger, &lexicon, &sentence, &word) {
        Ok(Outcome::SenseSelected {
            sense_id,
            definition,
        }) => println!("{word}: {definition} [{sense_id}]"),
        Ok(Outcome::UndeterminedSense) => println!("{word}: unable to determine the sense"),
        Ok(Outcome::NoSensesFound) => println!("{word}: no senses found"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}
