use std::collections::HashSet;
use std::fmt;

use wordnet_types::Pos;

/// Universal part-of-speech tag assigned by a tagger.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    CoordinatingConjunction,
    SubordinatingConjunction,
    Numeral,
    Particle,
    Interjection,
    Punctuation,
    Symbol,
    Other,
}

impl PosTag {
    /// Parse a Universal Dependencies tag name (`NOUN`, `ADJ`, `PROPN`, ...).
    /// Unrecognised names become [`PosTag::Other`].
    pub fn from_upos(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "VERB" => PosTag::Verb,
            "AUX" => PosTag::Auxiliary,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Adposition,
            "CCONJ" => PosTag::CoordinatingConjunction,
            "SCONJ" => PosTag::SubordinatingConjunction,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "INTJ" => PosTag::Interjection,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            _ => PosTag::Other,
        }
    }

    /// Universal Dependencies name for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Auxiliary => "AUX",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Adposition => "ADP",
            PosTag::CoordinatingConjunction => "CCONJ",
            PosTag::SubordinatingConjunction => "SCONJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Interjection => "INTJ",
            PosTag::Punctuation => "PUNCT",
            PosTag::Symbol => "SYM",
            PosTag::Other => "X",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token of a tagged sentence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_alpha: bool,
    pub is_stop: bool,
}

/// Tokens in surface order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sentence {
    tokens: Vec<TaggedToken>,
}

impl Sentence {
    pub fn new(tokens: Vec<TaggedToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[TaggedToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<TaggedToken> for Sentence {
    fn from_iter<I: IntoIterator<Item = TaggedToken>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A candidate meaning supplied by the lexicon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SenseCandidate {
    pub id: String,
    pub pos: Pos,
    pub definition: String,
    pub examples: Vec<String>,
}

/// Set of lemmas drawn from the sentence; membership is all that matters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContextSignature {
    lemmas: HashSet<String>,
}

impl ContextSignature {
    pub fn contains(&self, word: &str) -> bool {
        self.lemmas.contains(word)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lemmas.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ContextSignature {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lemmas: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of ranking the candidates for a located target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The candidate with the strictly highest overlap, earliest on ties.
    SenseSelected { sense_id: String, definition: String },
    /// Candidates existed but none shared a word with the context.
    UndeterminedSense,
    /// The lexicon had nothing for this word and category.
    NoSensesFound,
}

impl Outcome {
    pub fn is_selected(&self) -> bool {
        matches!(self, Outcome::SenseSelected { .. })
    }
}
