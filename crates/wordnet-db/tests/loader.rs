use std::path::PathBuf;

use wordnet_db::{LoadMode, WordNet};
use wordnet_types::{Pos, SynsetId, SynsetType};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("wordnet")
}

#[test]
fn lists_synsets_in_index_order() {
    let wn = WordNet::load(fixture_dir()).expect("load fixtures");
    let ids = wn.synsets_for_lemma(Pos::Noun, "bank");
    assert_eq!(
        ids,
        &[
            SynsetId {
                pos: Pos::Noun,
                offset: 100
            },
            SynsetId {
                pos: Pos::Noun,
                offset: 200
            },
        ]
    );
    assert!(wn.synsets_for_lemma(Pos::Adv, "bank").is_empty());
}

#[test]
fn lemma_lookup_ignores_case_and_spaces() {
    let wn = WordNet::load(fixture_dir()).expect("load fixtures");
    assert!(wn.lemma_exists(Pos::Noun, "Bank"));
    assert!(wn.lemma_exists(Pos::Noun, "depository financial institution"));
    assert!(!wn.lemma_exists(Pos::Verb, "river"));
}

#[test]
fn splits_gloss_into_definition_and_examples() {
    let wn = WordNet::load(fixture_dir()).expect("load fixtures");
    let synset = wn
        .get_synset(SynsetId {
            pos: Pos::Noun,
            offset: 100,
        })
        .expect("synset present");

    assert_eq!(synset.synset_type, SynsetType::Noun);
    assert_eq!(synset.words.len(), 1);
    assert_eq!(synset.words[0].text, "bank");
    assert_eq!(synset.gloss.definition, "sloping land beside a body of water");
    assert_eq!(
        synset.gloss.examples,
        vec![
            "they pulled the canoe up on the bank",
            "he sat on the bank of the river and watched the currents"
        ]
    );
}

#[test]
fn keeps_semicolon_clauses_in_definition() {
    let wn = WordNet::load(fixture_dir()).expect("load fixtures");
    let synset = wn
        .get_synset(SynsetId {
            pos: Pos::Noun,
            offset: 450,
        })
        .expect("synset present");
    assert_eq!(
        synset.gloss.definition,
        "a fixed charge for borrowing money; usually a percentage of the amount borrowed"
    );
    assert_eq!(synset.gloss.examples.len(), 1);
}

#[test]
fn strips_adjective_markers_and_reads_satellites() {
    let wn = WordNet::load_with_mode(fixture_dir(), LoadMode::Owned).expect("load fixtures");
    let raised = wn
        .get_synset(SynsetId {
            pos: Pos::Adj,
            offset: 1700,
        })
        .expect("adjective present");
    assert_eq!(raised.words[0].text, "raised");

    let fast = wn
        .get_synset(SynsetId {
            pos: Pos::Adj,
            offset: 1900,
        })
        .expect("satellite present");
    assert_eq!(fast.synset_type, SynsetType::AdjSatellite);
    assert_eq!(fast.synset_type.pos(), Pos::Adj);
}

#[test]
fn verb_lines_with_frames_parse() {
    let wn = WordNet::load(fixture_dir()).expect("load fixtures");
    let synset = wn
        .get_synset(SynsetId {
            pos: Pos::Verb,
            offset: 1300,
        })
        .expect("verb synset");
    assert_eq!(synset.words[0].lex_id, 1);
    assert_eq!(
        synset.gloss.definition,
        "do business with a bank or keep an account at a bank"
    );
}

#[test]
fn counts_match_fixture() {
    let wn = WordNet::load(fixture_dir()).expect("load fixtures");
    assert_eq!(wn.synset_count(), 24);
    assert_eq!(wn.lemma_count(), 22);
    assert_eq!(wn.iter_synsets().count(), 24);
}

#[test]
fn missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = match WordNet::load(dir.path()) {
        Ok(_) => panic!("empty directory should not load"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("missing required WordNet file"));
}

#[test]
fn malformed_index_line_names_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "data.noun",
        "data.verb",
        "data.adj",
        "data.adv",
        "index.verb",
        "index.adj",
        "index.adv",
    ] {
        std::fs::copy(fixture_dir().join(name), dir.path().join(name)).unwrap();
    }
    std::fs::write(dir.path().join("index.noun"), "bank n 2 0 2 0 00000100\n").unwrap();
    let err = match WordNet::load(dir.path()) {
        Ok(_) => panic!("mismatched synset_cnt should fail"),
        Err(err) => err,
    };
    let message = format!("{err:#}");
    assert!(message.contains("index.noun:1"), "{message}");
    assert!(message.contains("synset_cnt mismatch"), "{message}");
}
