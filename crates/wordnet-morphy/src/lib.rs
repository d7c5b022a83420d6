//! WordNet morphy: map an inflected surface form to dictionary base forms.
//!
//! Candidates come from three places, in this order: the surface form itself,
//! the `*.exc` exception lists, then POS-specific suffix detachment rules.
//! Each candidate is kept only if the caller's existence predicate accepts
//! it, so the crate stays independent of any particular loader.
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_morphy::Morphy;
//! use wordnet_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = "/path/to/wordnet";
//! let wn = WordNet::load_with_mode(dict, LoadMode::Mmap)?;
//! let morph = Morphy::load(dict)?;
//! let exists = |pos, lemma: &str| wn.lemma_exists(pos, lemma);
//!
//! assert_eq!(morph.base_form(Pos::Verb, "raised", exists).as_deref(), Some("raise"));
//! # Ok(()) }
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use wordnet_types::Pos;

/// Where a candidate lemma originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CandidateSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// A base form paired with its POS and provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaCandidate<'a> {
    pub pos: Pos,
    pub lemma: Cow<'a, str>,
    pub source: CandidateSource,
}

/// Exception lists keyed by POS, then by lowercased surface form.
#[derive(Debug, Default)]
pub struct Morphy {
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl Morphy {
    /// Load `noun.exc`, `verb.exc`, `adj.exc` and `adv.exc` from a dict directory.
    ///
    /// Missing files are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut exceptions = HashMap::new();
        for pos in Pos::ALL {
            let path = dir.join(format!("{}.exc", pos.file_suffix()));
            exceptions.insert(pos, load_exc(&path)?);
        }
        Ok(Self { exceptions })
    }

    /// Build from in-memory `(pos, surface, lemmas)` entries.
    pub fn from_exceptions<'e>(entries: impl IntoIterator<Item = (Pos, &'e str, &'e [&'e str])>) -> Self {
        let mut morph = Self::default();
        for (pos, surface, lemmas) in entries {
            morph
                .exceptions
                .entry(pos)
                .or_default()
                .insert(normalize(surface), lemmas.iter().map(|l| normalize(l)).collect());
        }
        morph
    }

    /// Number of exception entries across all categories.
    pub fn exception_count(&self) -> usize {
        self.exceptions.values().map(HashMap::len).sum()
    }

    /// Every accepted base form for `surface`, de-duplicated, in discovery order.
    pub fn lemmas_for<'a, F>(&'a self, pos: Pos, surface: &str, lemma_exists: F) -> Vec<LemmaCandidate<'a>>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let form = normalize(surface);
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        let mut accept = |lemma: Cow<'a, str>, source: CandidateSource| {
            if lemma_exists(pos, &lemma) && seen.insert(lemma.to_string()) {
                out.push(LemmaCandidate { pos, lemma, source });
            }
        };

        accept(Cow::Owned(form.clone()), CandidateSource::Surface);

        if let Some(entries) = self.exceptions.get(&pos).and_then(|m| m.get(&form)) {
            for lemma in entries {
                accept(Cow::Borrowed(lemma.as_str()), CandidateSource::Exception);
            }
        }

        for &(suffix, replacement) in rules_for(pos) {
            for candidate in detach(&form, suffix, replacement) {
                accept(Cow::Owned(candidate), CandidateSource::Rule { suffix, replacement });
            }
        }

        out
    }

    /// First accepted base form, if any.
    pub fn base_form<F>(&self, pos: Pos, surface: &str, lemma_exists: F) -> Option<String>
    where
        F: Fn(Pos, &str) -> bool,
    {
        self.lemmas_for(pos, surface, lemma_exists)
            .into_iter()
            .next()
            .map(|c| c.lemma.into_owned())
    }
}

fn load_exc(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file = File::open(path).with_context(|| format!("open exception file {}", path.display()))?;
    let mut map = HashMap::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let Some(surface) = parts.next() else {
            continue;
        };
        let lemmas: Vec<String> = parts.map(normalize).collect();
        if !lemmas.is_empty() {
            map.insert(normalize(surface), lemmas);
        }
    }
    Ok(map)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

/// Stems produced by one rule: the plain detachment ("eggs" -> "egg"), then,
/// for a bare suffix ending in a doubled consonant, the undoubled stem
/// ("running" -> "runn" -> "run").
fn detach(form: &str, suffix: &str, replacement: &str) -> Vec<String> {
    let Some(stem) = form.strip_suffix(suffix).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    let plain = format!("{stem}{replacement}");
    let mut out = Vec::with_capacity(2);

    if replacement.is_empty() {
        let mut tail = plain.chars().rev();
        if let (Some(a), Some(b)) = (tail.next(), tail.next())
            && a == b
            && !matches!(a, 'a' | 'e' | 'i' | 'o' | 'u' | 's' | 'l')
        {
            let undoubled = plain[..plain.len() - a.len_utf8()].to_string();
            out.push(plain);
            out.push(undoubled);
            return out;
        }
    }
    out.push(plain);
    out
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Pos::Adv => &[],
    }
}
