//! Simplified Lesk word sense disambiguation.
//!
//! Given a sentence and a word in it, tag the sentence, take the first token
//! whose text is the word, map its tag to a WordNet category, and ask the
//! lexicon for that word's senses in the category. Each sense is scored by how
//! many distinct words its gloss shares with the sentence's content lemmas;
//! the strictly best-scoring sense wins, earliest on ties.
//!
//! The tagger and lexicon are passed in as trait objects or generics, so tests
//! can substitute in-memory doubles.
//!
//! ```
//! use lesk_core::{Lexicon, Outcome, PosTag, SenseCandidate, Sentence, TaggedToken, Tagger, disambiguate};
//! use wordnet_types::Pos;
//!
//! struct Words;
//! impl Tagger for Words {
//!     fn tag(&self, text: &str) -> Sentence {
//!         text.split_whitespace()
//!             .map(|w| TaggedToken {
//!                 text: w.to_string(),
//!                 lemma: w.to_lowercase(),
//!                 pos: PosTag::Noun,
//!                 is_alpha: true,
//!                 is_stop: false,
//!             })
//!             .collect()
//!     }
//! }
//!
//! struct OneSense;
//! impl Lexicon for OneSense {
//!     fn senses_for(&self, _word: &str, pos: Pos) -> Vec<SenseCandidate> {
//!         vec![SenseCandidate {
//!             id: "1".into(),
//!             pos,
//!             definition: "a river bank".into(),
//!             examples: vec![],
//!         }]
//!     }
//! }
//!
//! let outcome = disambiguate(&Words, &OneSense, "river bank", "bank").unwrap();
//! assert!(outcome.is_selected());
//! ```

pub mod context;
pub mod ranker;
pub mod types;

use std::sync::Arc;

use tracing::debug;
use wordnet_types::Pos;

pub use context::{DisambiguationError, build_signature, locate_target, map_part_of_speech};
pub use ranker::{gloss_bag, overlap, rank};
pub use types::{ContextSignature, Outcome, PosTag, SenseCandidate, Sentence, TaggedToken};

/// Splits text into tagged tokens in surface order.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Sentence;
}

/// Supplies the candidate senses of a word within one lexical category, in
/// the lexicon's own order.
pub trait Lexicon: Send + Sync {
    fn senses_for(&self, word: &str, pos: Pos) -> Vec<SenseCandidate>;
}

impl<T: Tagger + ?Sized> Tagger for Arc<T> {
    fn tag(&self, text: &str) -> Sentence {
        (**self).tag(text)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Arc<L> {
    fn senses_for(&self, word: &str, pos: Pos) -> Vec<SenseCandidate> {
        (**self).senses_for(word, pos)
    }
}

/// Run one disambiguation request end to end.
///
/// A missing target is the only error. An empty candidate list and an
/// all-zero ranking are ordinary [`Outcome`]s.
pub fn disambiguate<T, L>(
    tagger: &T,
    lexicon: &L,
    sentence: &str,
    target_word: &str,
) -> Result<Outcome, DisambiguationError>
where
    T: Tagger + ?Sized,
    L: Lexicon + ?Sized,
{
    let tagged = tagger.tag(sentence);
    let target = locate_target(&tagged, target_word)?;
    let category = map_part_of_speech(target.pos);
    debug!(word = %target.text, tag = %target.pos, %category, "located target");

    let signature = build_signature(&tagged);
    debug!(lemmas = signature.len(), "built context signature");

    let candidates = lexicon.senses_for(target_word, category);
    let outcome = rank(&signature, &candidates);
    debug!(candidates = candidates.len(), ?outcome, "ranked senses");
    Ok(outcome)
}
