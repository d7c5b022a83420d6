//! Dictionary-driven part-of-speech tagger.
//!
//! Tokens are Unicode word-boundary segments with whitespace dropped. Each
//! token gets a tag from, in order: its character class (punctuation, symbol,
//! number), a closed-class word list, then the WordNet categories it has a
//! base form in, disambiguated by the previous token's tag. Open-class tokens
//! are lemmatized with morphy for the chosen category.

use std::sync::Arc;

use lesk_core::{PosTag, Sentence, TaggedToken, Tagger};
use unicode_segmentation::UnicodeSegmentation;
use wordnet_db::WordNet;
use wordnet_morphy::Morphy;
use wordnet_types::Pos;

use crate::stopwords::StopwordFilter;

pub struct WordNetTagger {
    wordnet: Arc<WordNet>,
    morphy: Arc<Morphy>,
    stopwords: StopwordFilter,
}

/// A segment plus the WordNet categories it can be read as.
struct Segment<'t> {
    text: &'t str,
    lower: String,
    categories: Vec<Pos>,
}

impl WordNetTagger {
    pub fn new(wordnet: Arc<WordNet>, morphy: Arc<Morphy>) -> Self {
        Self::with_stopwords(wordnet, morphy, StopwordFilter::english())
    }

    pub fn with_stopwords(
        wordnet: Arc<WordNet>,
        morphy: Arc<Morphy>,
        stopwords: StopwordFilter,
    ) -> Self {
        Self {
            wordnet,
            morphy,
            stopwords,
        }
    }

    fn base_form(&self, pos: Pos, lower: &str) -> Option<String> {
        self.morphy
            .base_form(pos, lower, |p, lemma| self.wordnet.lemma_exists(p, lemma))
    }

    fn segment<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        text.split_word_bounds()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                let lower = s.to_lowercase();
                let categories = if is_alpha(s) {
                    Pos::ALL
                        .into_iter()
                        .filter(|pos| self.base_form(*pos, &lower).is_some())
                        .collect()
                } else {
                    Vec::new()
                };
                Segment {
                    text: s,
                    lower,
                    categories,
                }
            })
            .collect()
    }

    fn lemma(&self, seg: &Segment<'_>, tag: PosTag) -> String {
        let category = match tag {
            PosTag::Noun => Some(Pos::Noun),
            PosTag::Verb => Some(Pos::Verb),
            PosTag::Adjective => Some(Pos::Adj),
            PosTag::Adverb => Some(Pos::Adv),
            PosTag::ProperNoun => return seg.text.to_string(),
            _ => None,
        };
        category
            .and_then(|pos| self.base_form(pos, &seg.lower))
            .unwrap_or_else(|| seg.lower.clone())
    }
}

impl Tagger for WordNetTagger {
    fn tag(&self, text: &str) -> Sentence {
        let segments = self.segment(text);
        let mut tokens = Vec::with_capacity(segments.len());
        let mut prev: Option<(PosTag, &str)> = None;
        for (idx, seg) in segments.iter().enumerate() {
            let next = segments.get(idx + 1);
            let tag = classify(seg, idx == 0, prev, next);
            tokens.push(TaggedToken {
                text: seg.text.to_string(),
                lemma: self.lemma(seg, tag),
                pos: tag,
                is_alpha: is_alpha(seg.text),
                is_stop: self.stopwords.is_stopword(seg.text),
            });
            prev = Some((tag, seg.lower.as_str()));
        }
        tracing::trace!(tokens = tokens.len(), "tagged sentence");
        Sentence::new(tokens)
    }
}

fn is_alpha(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

fn classify(
    seg: &Segment<'_>,
    sentence_start: bool,
    prev: Option<(PosTag, &str)>,
    next: Option<&Segment<'_>>,
) -> PosTag {
    if !seg.text.chars().any(char::is_alphanumeric) {
        return if seg.text.chars().all(is_punctuation) {
            PosTag::Punctuation
        } else {
            PosTag::Symbol
        };
    }
    if is_number(seg.text) {
        return PosTag::Numeral;
    }
    if seg.lower == "to" {
        let verb_follows = next.is_some_and(|n| n.categories.contains(&Pos::Verb));
        return if verb_follows {
            PosTag::Particle
        } else {
            PosTag::Adposition
        };
    }
    if let Some(tag) = closed_class(&seg.lower) {
        return tag;
    }
    if seg.categories.is_empty() {
        let capitalised = seg.text.chars().next().is_some_and(char::is_uppercase);
        return if capitalised && !sentence_start {
            PosTag::ProperNoun
        } else {
            PosTag::Noun
        };
    }
    open_class(seg, prev)
}

fn open_class(seg: &Segment<'_>, prev: Option<(PosTag, &str)>) -> PosTag {
    let can = |pos: Pos| seg.categories.contains(&pos);
    if let [only] = seg.categories.as_slice() {
        return tag_for(*only);
    }

    let prev_tag = prev.map(|(tag, _)| tag);
    match prev_tag {
        Some(PosTag::Determiner | PosTag::Adjective | PosTag::Numeral) => {
            if can(Pos::Noun) {
                return PosTag::Noun;
            }
            if can(Pos::Adj) {
                return PosTag::Adjective;
            }
        }
        Some(PosTag::Particle | PosTag::Auxiliary) if can(Pos::Verb) => return PosTag::Verb,
        Some(PosTag::Pronoun)
            if can(Pos::Verb) && prev.is_some_and(|(_, word)| is_subject_pronoun(word)) =>
        {
            return PosTag::Verb;
        }
        Some(PosTag::Noun | PosTag::ProperNoun)
            if can(Pos::Verb) && (seg.lower.ends_with("ed") || seg.lower.ends_with("ing")) =>
        {
            return PosTag::Verb;
        }
        _ => {}
    }

    if seg.lower.ends_with("ly") && can(Pos::Adv) {
        return PosTag::Adverb;
    }
    let first = Pos::ALL.into_iter().find(|pos| can(*pos)).unwrap_or(Pos::Noun);
    tag_for(first)
}

fn tag_for(pos: Pos) -> PosTag {
    match pos {
        Pos::Noun => PosTag::Noun,
        Pos::Verb => PosTag::Verb,
        Pos::Adj => PosTag::Adjective,
        Pos::Adv => PosTag::Adverb,
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2013}' | '\u{2014}' | '\u{2026}'
                | '\u{00AB}' | '\u{00BB}' | '\u{00BF}' | '\u{00A1}'
        )
}

fn is_number(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
}

fn is_subject_pronoun(word: &str) -> bool {
    matches!(word, "i" | "you" | "he" | "she" | "it" | "we" | "they" | "who")
}

fn closed_class(word: &str) -> Option<PosTag> {
    let tag = match word {
        "a" | "an" | "the" | "this" | "that" | "these" | "those" | "every" | "each" | "some"
        | "any" | "no" | "another" | "either" | "neither" | "all" | "both" | "such" | "which"
        | "whose" | "my" | "your" | "his" | "her" | "its" | "our" | "their" => PosTag::Determiner,
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
        | "myself" | "yourself" | "himself" | "herself" | "itself" | "ourselves"
        | "themselves" | "who" | "whom" | "what" | "mine" | "yours" | "hers" | "ours"
        | "theirs" | "someone" | "something" | "anyone" | "anything" | "everyone"
        | "everything" | "nobody" | "nothing" | "there" => PosTag::Pronoun,
        "of" | "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between"
        | "into" | "through" | "during" | "above" | "below" | "from" | "up" | "down" | "out"
        | "off" | "over" | "under" | "near" | "beside" | "across" | "along" | "around"
        | "behind" | "beyond" | "despite" | "inside" | "onto" | "toward" | "towards" | "upon"
        | "within" | "without" | "via" | "per" | "among" | "beneath" => PosTag::Adposition,
        "be" | "am" | "is" | "are" | "was" | "were" | "been" | "being" | "will" | "would"
        | "shall" | "should" | "can" | "could" | "may" | "might" | "must" => PosTag::Auxiliary,
        "and" | "or" | "but" | "nor" | "yet" => PosTag::CoordinatingConjunction,
        "if" | "because" | "although" | "though" | "while" | "whereas" | "unless"
        | "whether" | "than" | "as" | "since" | "until" | "before" | "after" | "so" => {
            PosTag::SubordinatingConjunction
        }
        "not" | "n't" => PosTag::Particle,
        "oh" | "hello" | "hi" | "wow" | "ouch" | "hey" | "yes" => PosTag::Interjection,
        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
        | "ten" | "hundred" | "thousand" | "million" | "billion" => PosTag::Numeral,
        _ => return None,
    };
    Some(tag)
}
