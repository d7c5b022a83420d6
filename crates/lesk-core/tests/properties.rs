use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use lesk_core::{
    DisambiguationError, Lexicon, Outcome, PosTag, SenseCandidate, Sentence, TaggedToken, Tagger,
    build_signature, disambiguate, gloss_bag, overlap, rank,
};
use wordnet_types::Pos;

const STOPWORDS: &[&str] = &["the", "a", "an", "of", "on", "in", "he", "she", "it", "to"];

/// Whitespace tagger driven by a fixed word -> (tag, lemma) table.
struct TableTagger {
    entries: HashMap<&'static str, (PosTag, &'static str)>,
}

impl TableTagger {
    fn new(entries: &[(&'static str, PosTag, &'static str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(word, tag, lemma)| (*word, (*tag, *lemma)))
                .collect(),
        }
    }
}

impl Tagger for TableTagger {
    fn tag(&self, text: &str) -> Sentence {
        text.split_whitespace()
            .map(|word| {
                let lower = word.to_lowercase();
                let (pos, lemma) = self
                    .entries
                    .get(lower.as_str())
                    .map(|(tag, lemma)| (*tag, lemma.to_string()))
                    .unwrap_or((PosTag::Other, lower.clone()));
                TaggedToken {
                    text: word.to_string(),
                    lemma,
                    pos,
                    is_alpha: word.chars().all(char::is_alphabetic),
                    is_stop: STOPWORDS.contains(&lower.as_str()),
                }
            })
            .collect()
    }
}

/// Lexicon returning canned senses and recording every query it receives.
#[derive(Default)]
struct CannedLexicon {
    senses: HashMap<(String, Pos), Vec<SenseCandidate>>,
    queries: Mutex<Vec<(String, Pos)>>,
}

impl CannedLexicon {
    fn with(mut self, word: &str, pos: Pos, senses: Vec<SenseCandidate>) -> Self {
        self.senses.insert((word.to_string(), pos), senses);
        self
    }

    fn queries(&self) -> Vec<(String, Pos)> {
        self.queries.lock().unwrap().clone()
    }
}

impl Lexicon for CannedLexicon {
    fn senses_for(&self, word: &str, pos: Pos) -> Vec<SenseCandidate> {
        self.queries.lock().unwrap().push((word.to_string(), pos));
        self.senses
            .get(&(word.to_string(), pos))
            .cloned()
            .unwrap_or_default()
    }
}

fn sense(id: &str, pos: Pos, definition: &str, examples: &[&str]) -> SenseCandidate {
    SenseCandidate {
        id: id.to_string(),
        pos,
        definition: definition.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
    }
}

fn bank_tagger() -> TableTagger {
    TableTagger::new(&[
        ("the", PosTag::Determiner, "the"),
        ("bank", PosTag::Noun, "bank"),
        ("raised", PosTag::Verb, "raise"),
        ("interest", PosTag::Noun, "interest"),
        ("rates", PosTag::Noun, "rate"),
        ("banks", PosTag::Verb, "bank"),
        ("we", PosTag::Pronoun, "we"),
    ])
}

fn bank_lexicon() -> CannedLexicon {
    CannedLexicon::default().with(
        "bank",
        Pos::Noun,
        vec![
            sense(
                "river",
                Pos::Noun,
                "sloping land beside a body of water",
                &["they pulled the canoe up on the bank"],
            ),
            sense(
                "finance",
                Pos::Noun,
                "a financial institution that accepts deposits",
                &["the bank offers a better interest rate on savings"],
            ),
        ],
    )
}

#[test]
fn selects_financial_sense_for_interest_rates() {
    let outcome = disambiguate(
        &bank_tagger(),
        &bank_lexicon(),
        "The bank raised interest rates",
        "bank",
    )
    .unwrap();
    assert_eq!(
        outcome,
        Outcome::SenseSelected {
            sense_id: "finance".to_string(),
            definition: "a financial institution that accepts deposits".to_string(),
        }
    );
}

#[test]
fn missing_target_is_reported_before_lexicon_lookup() {
    let lexicon = bank_lexicon();
    let err = disambiguate(&bank_tagger(), &lexicon, "The bank raised interest rates", "river")
        .unwrap_err();
    assert_eq!(
        err,
        DisambiguationError::TargetNotFound {
            target: "river".to_string()
        }
    );
    assert!(lexicon.queries().is_empty());
}

#[test]
fn empty_lexicon_answer_is_no_senses_found() {
    let outcome = disambiguate(
        &bank_tagger(),
        &CannedLexicon::default(),
        "The bank raised interest rates",
        "bank",
    )
    .unwrap();
    assert_eq!(outcome, Outcome::NoSensesFound);
}

#[test]
fn zero_overlap_everywhere_is_undetermined() {
    let lexicon = CannedLexicon::default().with(
        "bank",
        Pos::Noun,
        vec![
            sense("a", Pos::Noun, "a slope", &["grassy hill"]),
            sense("b", Pos::Noun, "an institution", &[]),
        ],
    );
    let outcome =
        disambiguate(&bank_tagger(), &lexicon, "The bank raised interest rates", "bank").unwrap();
    assert_eq!(outcome, Outcome::UndeterminedSense);
}

#[test]
fn first_occurrence_decides_the_category() {
    let lexicon = CannedLexicon::default();
    // "banks" is tagged VERB by the table, but the lookup is by exact surface text.
    let _ = disambiguate(&bank_tagger(), &lexicon, "bank the bank", "BANK").unwrap();
    let _ = disambiguate(&bank_tagger(), &lexicon, "we banks the bank", "banks").unwrap();
    assert_eq!(
        lexicon.queries(),
        vec![
            ("BANK".to_string(), Pos::Noun),
            ("banks".to_string(), Pos::Verb)
        ]
    );
}

#[test]
fn unmapped_tags_query_nouns() {
    let lexicon = CannedLexicon::default();
    let _ = disambiguate(&bank_tagger(), &lexicon, "zorp the bank", "zorp").unwrap();
    let _ = disambiguate(&bank_tagger(), &lexicon, "we raised it", "we").unwrap();
    assert_eq!(
        lexicon.queries(),
        vec![("zorp".to_string(), Pos::Noun), ("we".to_string(), Pos::Noun)]
    );
}

#[test]
fn repeated_runs_agree() {
    let tagger = Arc::new(bank_tagger());
    let lexicon = Arc::new(bank_lexicon());
    let first = disambiguate(&tagger, &lexicon, "The bank raised interest rates", "bank");
    for _ in 0..20 {
        assert_eq!(
            disambiguate(&tagger, &lexicon, "The bank raised interest rates", "bank"),
            first
        );
    }
}

#[test]
fn works_through_trait_objects() {
    let tagger: Arc<dyn Tagger> = Arc::new(bank_tagger());
    let lexicon: Arc<dyn Lexicon> = Arc::new(bank_lexicon());
    let outcome = disambiguate(tagger.as_ref(), lexicon.as_ref(), "the bank", "bank").unwrap();
    // "bank" is the only content lemma and both glosses contain it: the earlier wins.
    assert!(matches!(outcome, Outcome::SenseSelected { ref sense_id, .. } if sense_id == "river"));
}

#[test]
fn ties_resolve_to_earliest_for_every_rotation() {
    let signature = build_signature(&bank_tagger().tag("bank interest"));
    let base = vec![
        sense("p", Pos::Noun, "bank", &[]),
        sense("q", Pos::Noun, "interest", &[]),
        sense("r", Pos::Noun, "nothing", &[]),
    ];
    for shift in 0..base.len() {
        let mut rotated = base.clone();
        rotated.rotate_left(shift);
        let expected = rotated
            .iter()
            .find(|s| s.id != "r")
            .map(|s| s.id.clone())
            .unwrap();
        match rank(&signature, &rotated) {
            Outcome::SenseSelected { sense_id, .. } => assert_eq!(sense_id, expected),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn selection_only_moves_to_strictly_better_candidates() {
    let signature = build_signature(&bank_tagger().tag("bank raised interest rates"));
    let candidates = vec![
        sense("one", Pos::Noun, "bank", &[]),
        sense("two", Pos::Noun, "bank interest", &[]),
        sense("two-again", Pos::Noun, "interest bank", &[]),
        sense("one-again", Pos::Noun, "rate", &[]),
        sense("three", Pos::Noun, "bank interest rate", &[]),
        sense("zero", Pos::Noun, "", &[]),
    ];

    let mut last_score = 0;
    let mut last_pick: Option<String> = None;
    for k in 1..=candidates.len() {
        let prefix = &candidates[..k];
        if let Outcome::SenseSelected { sense_id, .. } = rank(&signature, prefix) {
            let score = prefix
                .iter()
                .find(|s| s.id == sense_id)
                .map(|s| overlap(&signature, &gloss_bag(s)))
                .unwrap();
            if last_pick.as_deref() != Some(sense_id.as_str()) {
                assert!(score > last_score, "{sense_id} replaced a pick with {last_score}");
            }
            last_score = score;
            last_pick = Some(sense_id);
        }
    }
    assert_eq!(last_pick.as_deref(), Some("three"));
    assert_eq!(last_score, 3);
}
