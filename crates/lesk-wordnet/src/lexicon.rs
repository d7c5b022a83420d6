use std::collections::HashSet;
use std::sync::Arc;

use lesk_core::{Lexicon, SenseCandidate};
use wordnet_db::WordNet;
use wordnet_morphy::Morphy;
use wordnet_types::{Pos, Synset};

/// Sense inventory read from a loaded WordNet dictionary.
///
/// The query word is run through morphy first, so `banks` finds the senses of
/// `bank`. Synsets of every base form are returned in index order, surface
/// form first, each synset once.
#[derive(Clone)]
pub struct WordNetLexicon {
    wordnet: Arc<WordNet>,
    morphy: Arc<Morphy>,
}

impl WordNetLexicon {
    pub fn new(wordnet: Arc<WordNet>, morphy: Arc<Morphy>) -> Self {
        Self { wordnet, morphy }
    }
}

impl Lexicon for WordNetLexicon {
    fn senses_for(&self, word: &str, pos: Pos) -> Vec<SenseCandidate> {
        let wn = &self.wordnet;
        let mut seen = HashSet::new();
        let mut senses = Vec::new();
        for base in self
            .morphy
            .lemmas_for(pos, word, |p, lemma| wn.lemma_exists(p, lemma))
        {
            for id in wn.synsets_for_lemma(pos, &base.lemma) {
                if !seen.insert(*id) {
                    continue;
                }
                if let Some(synset) = wn.get_synset(*id) {
                    senses.push(to_candidate(&synset));
                }
            }
        }
        senses
    }
}

fn to_candidate(synset: &Synset<'_>) -> SenseCandidate {
    SenseCandidate {
        id: synset.id.to_string(),
        pos: synset.id.pos,
        definition: synset.gloss.definition.to_string(),
        examples: synset.gloss.examples.iter().map(|e| e.to_string()).collect(),
    }
}
