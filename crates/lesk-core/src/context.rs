//! Context extraction: find the target token, pick the lexical category to
//! query, and collect the lemmas that make up the context signature.

use thiserror::Error;
use wordnet_types::Pos;

use crate::types::{ContextSignature, PosTag, Sentence, TaggedToken};

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DisambiguationError {
    #[error("target word {target:?} not found in the sentence")]
    TargetNotFound { target: String },
}

/// First token, in surface order, whose text equals `target` ignoring case.
pub fn locate_target<'s>(
    sentence: &'s Sentence,
    target: &str,
) -> Result<&'s TaggedToken, DisambiguationError> {
    let wanted = target.to_lowercase();
    for token in sentence.tokens() {
        if token.text.to_lowercase() == wanted {
            return Ok(token);
        }
    }
    Err(DisambiguationError::TargetNotFound {
        target: target.to_string(),
    })
}

/// Lexical category used to fetch candidate senses for a tagged token.
///
/// Only the four open classes map to themselves. Every other tag, including
/// proper nouns, auxiliaries and [`PosTag::Other`], is looked up as a noun.
/// The arms are listed one by one so adding a tag forces a decision here.
pub fn map_part_of_speech(tag: PosTag) -> Pos {
    match tag {
        PosTag::Noun => Pos::Noun,
        PosTag::Verb => Pos::Verb,
        PosTag::Adjective => Pos::Adj,
        PosTag::Adverb => Pos::Adv,
        PosTag::ProperNoun
        | PosTag::Auxiliary
        | PosTag::Pronoun
        | PosTag::Determiner
        | PosTag::Adposition
        | PosTag::CoordinatingConjunction
        | PosTag::SubordinatingConjunction
        | PosTag::Numeral
        | PosTag::Particle
        | PosTag::Interjection
        | PosTag::Punctuation
        | PosTag::Symbol
        | PosTag::Other => Pos::Noun,
    }
}

/// Lemmas of every alphabetic, non-stopword token. Lemmas are taken as the
/// tagger produced them. The target's own token is not treated specially.
pub fn build_signature(sentence: &Sentence) -> ContextSignature {
    sentence
        .tokens()
        .iter()
        .filter(|t| t.is_alpha && !t.is_stop)
        .map(|t| t.lemma.as_str())
        .collect()
}
