//! Shared types for reading senses out of a WordNet dictionary.
//!
//! Text fields borrow from the loader's backing buffer (`&str`) so a sense can
//! be inspected without copying its gloss. [`Pos`] keys every lookup,
//! [`SynsetId`] identifies a sense across the four data files, and [`Gloss`]
//! separates a sense's definition from its quoted usage examples.
//!
//! ```rust
//! use wordnet_types::{Pos, SynsetId};
//!
//! let id: SynsetId = "08420278-n".parse().unwrap();
//! assert_eq!(id.pos, Pos::Noun);
//! assert_eq!(id.to_string(), "08420278-n");
//! ```

use std::fmt;
use std::str::FromStr;

/// Lexical category used by WordNet files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// All categories in the order WordNet lists its data files.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a WordNet POS character. Satellites (`s`) fold into adjectives.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Emit the POS character used in `index.*`/`data.*`.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }

    /// File suffix for this category (`data.noun`, `index.adj`, `verb.exc`, ...).
    pub fn file_suffix(self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// `(offset, pos)` pair uniquely identifying a synset.
///
/// Rendered the way Open English WordNet prints ids: eight-digit zero-padded
/// offset, a dash, then the POS character.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u32,
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}-{}", self.offset, self.pos.to_char())
    }
}

/// Failure to parse a `NNNNNNNN-p` synset id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSynsetIdError(String);

impl fmt::Display for ParseSynsetIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid synset id: {}", self.0)
    }
}

impl std::error::Error for ParseSynsetIdError {}

impl FromStr for SynsetId {
    type Err = ParseSynsetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSynsetIdError(s.to_string());
        let (offset, pos) = s.split_once('-').ok_or_else(err)?;
        let mut pos_chars = pos.chars();
        let pos = match (pos_chars.next(), pos_chars.next()) {
            (Some(c), None) => Pos::from_char(c).ok_or_else(err)?,
            _ => return Err(err()),
        };
        let offset = offset.parse::<u32>().map_err(|_| err())?;
        Ok(SynsetId { pos, offset })
    }
}

/// Raw `ss_type` marker from `data.*`, including adjective satellites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SynsetType {
    Noun,
    Verb,
    Adj,
    Adv,
    AdjSatellite,
}

impl SynsetType {
    /// Parse the `ss_type` character from a data line.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(SynsetType::Noun),
            'v' => Some(SynsetType::Verb),
            'a' => Some(SynsetType::Adj),
            's' => Some(SynsetType::AdjSatellite),
            'r' => Some(SynsetType::Adv),
            _ => None,
        }
    }

    /// Category the synset is filed under; satellites live in `data.adj`.
    pub fn pos(self) -> Pos {
        match self {
            SynsetType::Noun => Pos::Noun,
            SynsetType::Verb => Pos::Verb,
            SynsetType::Adj | SynsetType::AdjSatellite => Pos::Adj,
            SynsetType::Adv => Pos::Adv,
        }
    }
}

/// A member word of a synset with its per-synset `lex_id`.
#[derive(Clone, Debug)]
pub struct Lemma<'a> {
    pub text: &'a str,
    pub lex_id: u8,
}

/// Gloss split into its definition and usage examples.
#[derive(Clone, Debug)]
pub struct Gloss<'a> {
    pub definition: &'a str,
    pub examples: Vec<&'a str>,
}

/// One sense: its id, member words and gloss.
#[derive(Clone, Debug)]
pub struct Synset<'a> {
    pub id: SynsetId,
    pub synset_type: SynsetType,
    pub words: Vec<Lemma<'a>>,
    pub gloss: Gloss<'a>,
}
