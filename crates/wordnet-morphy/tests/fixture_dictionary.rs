use std::path::PathBuf;

use wordnet_db::WordNet;
use wordnet_morphy::{CandidateSource, Morphy};
use wordnet_types::Pos;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("wordnet")
}

#[test]
fn loads_exception_files_and_resolves_against_index() {
    let wn = WordNet::load(fixture_dir()).expect("load wordnet");
    let morph = Morphy::load(fixture_dir()).expect("load morph");
    assert_eq!(morph.exception_count(), 3);
    let exists = |pos, lemma: &str| wn.lemma_exists(pos, lemma);

    let ran = morph.lemmas_for(Pos::Verb, "ran", exists);
    assert_eq!(ran.len(), 1);
    assert_eq!(ran[0].lemma, "run");
    assert_eq!(ran[0].source, CandidateSource::Exception);

    assert_eq!(morph.base_form(Pos::Noun, "children", exists).as_deref(), Some("child"));
    assert_eq!(morph.base_form(Pos::Noun, "banks", exists).as_deref(), Some("bank"));
    assert_eq!(morph.base_form(Pos::Adj, "raised", exists).as_deref(), Some("raised"));
}

#[test]
fn missing_exception_files_are_empty() {
    let dir = std::env::temp_dir().join("wordnet-morphy-no-exc-files");
    let morph = Morphy::load(&dir).expect("absent files are not an error");
    assert_eq!(morph.exception_count(), 0);
}
