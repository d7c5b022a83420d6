use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wordnet_db::{LoadMode, WordNet};
use wordnet_types::{Pos, SynsetType};

fn main() -> Result<()> {
    let dict_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p wordnet-db --example stats -- <path-to-wordnet-dir>")?;

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;

    let mut per_pos = [0usize; 4];
    let mut example_count = 0usize;
    let mut without_examples = 0usize;
    let mut satellites = 0usize;
    let mut member_words = 0usize;
    for syn in wn.iter_synsets() {
        per_pos[Pos::ALL.iter().position(|p| *p == syn.id.pos).unwrap_or(0)] += 1;
        example_count += syn.gloss.examples.len();
        member_words += syn.words.len();
        if syn.synset_type == SynsetType::AdjSatellite {
            satellites += 1;
        }
        if syn.gloss.examples.is_empty() {
            without_examples += 1;
        }
    }

    println!("Dictionary: {}", dict_dir.display());
    println!("Lemma keys   : {}", wn.lemma_count());
    println!("Synsets      : {}", wn.synset_count());
    for (pos, count) in Pos::ALL.iter().zip(per_pos) {
        println!("  {:<5}: {}", pos, count);
    }
    println!("  of which adjective satellites: {}", satellites);
    println!(
        "Words per synset: {:.2}",
        member_words as f64 / wn.synset_count().max(1) as f64
    );
    println!("Gloss examples: {}", example_count);
    println!("Synsets without examples: {}", without_examples);

    for (pos, lemma) in [(Pos::Noun, "bank"), (Pos::Verb, "run")] {
        println!(
            "'{}' ({}) has {} senses",
            lemma,
            pos,
            wn.synsets_for_lemma(pos, lemma).len()
        );
    }

    Ok(())
}
