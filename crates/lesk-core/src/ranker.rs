//! Gloss-overlap ranking of candidate senses.
//!
//! A candidate's gloss bag is its definition and examples lowercased and split
//! on whitespace. Nothing else is normalised: punctuation stays attached and
//! no lemmatization happens, so `rates` in a gloss never matches the lemma
//! `rate` in a signature.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{ContextSignature, Outcome, SenseCandidate};

/// Lowercased whitespace-delimited words of the definition and all examples.
pub fn gloss_bag(candidate: &SenseCandidate) -> HashSet<String> {
    std::iter::once(candidate.definition.as_str())
        .chain(candidate.examples.iter().map(String::as_str))
        .flat_map(|text| {
            text.to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Number of distinct words shared by the signature and the bag.
pub fn overlap(signature: &ContextSignature, bag: &HashSet<String>) -> usize {
    signature.iter().filter(|lemma| bag.contains(*lemma)).count()
}

/// Pick the sense whose gloss shares the most words with the signature.
///
/// Candidates are visited in the order given. The running best is replaced
/// only by a strictly greater overlap, starting from zero, so ties keep the
/// earlier candidate and a zero-overlap candidate is never chosen.
pub fn rank(signature: &ContextSignature, candidates: &[SenseCandidate]) -> Outcome {
    if candidates.is_empty() {
        return Outcome::NoSensesFound;
    }

    let mut best: Option<&SenseCandidate> = None;
    let mut max_overlap = 0usize;
    for candidate in candidates {
        let score = overlap(signature, &gloss_bag(candidate));
        debug!(sense = %candidate.id, overlap = score, "scored candidate");
        if score > max_overlap {
            max_overlap = score;
            best = Some(candidate);
        }
    }

    match best {
        Some(sense) => Outcome::SenseSelected {
            sense_id: sense.id.clone(),
            definition: sense.definition.clone(),
        },
        None => Outcome::UndeterminedSense,
    }
}
