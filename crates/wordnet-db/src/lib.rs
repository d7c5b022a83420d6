//! Read-only WordNet dictionary for sense lookup.
//!
//! Loads the canonical `index.*` and `data.*` files and keeps, per synset, its
//! member words and its gloss split into definition and quoted examples. Text
//! borrows from the data files, which are either memory-mapped or read into
//! owned buffers depending on [`LoadMode`]. Index files are only needed while
//! loading; the per-lemma synset lists they describe are kept in file order,
//! which is the order WordNet ranks senses in.
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let wn = WordNet::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! for sid in wn.synsets_for_lemma(Pos::Noun, "bank") {
//!     let syn = wn.get_synset(*sid).unwrap();
//!     println!("{}: {}", syn.id, syn.gloss.definition);
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordnet-db --example stats -- <dict>`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use wordnet_types::{Gloss, Lemma, Pos, Synset, SynsetId, SynsetType};

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each data file (fast, zero-copy).
    Mmap,
    /// Read each data file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Byte span inside the data file of one category.
#[derive(Clone, Copy)]
struct TextRef {
    pos: Pos,
    start: usize,
    len: usize,
}

struct SynsetData {
    synset_type: SynsetType,
    words: Vec<(TextRef, u8)>,
    definition: TextRef,
    examples: Vec<TextRef>,
}

/// In-memory view of a WordNet dictionary.
pub struct WordNet {
    data: [Buffer; 4],
    synsets: HashMap<SynsetId, SynsetData>,
    lemma_to_synsets: HashMap<(Pos, String), Vec<SynsetId>>,
}

impl WordNet {
    /// Load WordNet from a directory containing `data.*` and `index.*` files,
    /// memory-mapping the data files.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load WordNet choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        for pos in Pos::ALL {
            for prefix in ["data", "index"] {
                let path = dir.join(format!("{prefix}.{}", pos.file_suffix()));
                if !path.exists() {
                    anyhow::bail!("missing required WordNet file: {}", path.display());
                }
            }
        }

        let data = [
            load_file(&dir.join("data.noun"), mode)?,
            load_file(&dir.join("data.verb"), mode)?,
            load_file(&dir.join("data.adj"), mode)?,
            load_file(&dir.join("data.adv"), mode)?,
        ];

        let mut synsets = HashMap::new();
        for pos in Pos::ALL {
            parse_data(data[slot(pos)].as_slice(), pos, &mut synsets)?;
        }

        let mut lemma_to_synsets = HashMap::new();
        for pos in Pos::ALL {
            // Index text is never borrowed after load, so an owned read is enough.
            let index = load_file(&dir.join(format!("index.{}", pos.file_suffix())), LoadMode::Owned)?;
            parse_index(index.as_slice(), pos, &mut lemma_to_synsets)?;
        }

        Ok(Self {
            data,
            synsets,
            lemma_to_synsets,
        })
    }

    /// Check whether a lemma is listed in the index for the given POS.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.lemma_to_synsets
            .contains_key(&(pos, normalize_lemma(lemma)))
    }

    /// Synsets for a lemma in index order, or an empty slice.
    pub fn synsets_for_lemma(&self, pos: Pos, lemma: &str) -> &[SynsetId] {
        self.lemma_to_synsets
            .get(&(pos, normalize_lemma(lemma)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fetch a `Synset` by id if loaded.
    pub fn get_synset(&self, id: SynsetId) -> Option<Synset<'_>> {
        self.synsets.get(&id).map(|data| self.view(id, data))
    }

    /// Iterate over all synsets as borrowed views, in no particular order.
    pub fn iter_synsets(&self) -> impl Iterator<Item = Synset<'_>> + '_ {
        self.synsets.iter().map(|(id, data)| self.view(*id, data))
    }

    /// Number of `(pos, lemma)` keys in the index.
    pub fn lemma_count(&self) -> usize {
        self.lemma_to_synsets.len()
    }

    /// Number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    fn text(&self, r: TextRef) -> &str {
        let bytes = &self.data[slot(r.pos)].as_slice()[r.start..r.start + r.len];
        // Spans are cut from lines that passed utf8 validation during load.
        std::str::from_utf8(bytes).unwrap_or_default()
    }

    fn view<'a>(&'a self, id: SynsetId, data: &'a SynsetData) -> Synset<'a> {
        Synset {
            id,
            synset_type: data.synset_type,
            words: data
                .words
                .iter()
                .map(|(text, lex_id)| Lemma {
                    text: self.text(*text),
                    lex_id: *lex_id,
                })
                .collect(),
            gloss: Gloss {
                definition: self.text(data.definition),
                examples: data.examples.iter().map(|r| self.text(*r)).collect(),
            },
        }
    }
}

fn slot(pos: Pos) -> usize {
    match pos {
        Pos::Noun => 0,
        Pos::Verb => 1,
        Pos::Adj => 2,
        Pos::Adv => 3,
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .with_context(|| format!("mmap {}", path.display())),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Yield `(line number, line)` for every record line, skipping the license
/// header (lines indented with a space) and blank lines.
fn record_lines(bytes: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    bytes
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix(b"\r").unwrap_or(line)))
        .filter(|(_, line)| !line.is_empty() && !matches!(line.first(), Some(b' ' | b'\t')))
}

fn parse_index(
    bytes: &[u8],
    pos: Pos,
    lemma_to_synsets: &mut HashMap<(Pos, String), Vec<SynsetId>>,
) -> Result<()> {
    for (lineno, line) in record_lines(bytes) {
        let line = std::str::from_utf8(line)
            .with_context(|| format!("index.{}:{} not utf8", pos.file_suffix(), lineno))?;
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
        let ctx = || format!("index.{}:{}", pos.file_suffix(), lineno);
        if tokens.len() < 6 {
            anyhow::bail!("{} malformed index line (too few tokens)", ctx());
        }

        let synset_cnt: usize = tokens[2].parse().with_context(|| format!("{} synset_cnt", ctx()))?;
        let p_cnt: usize = tokens[3].parse().with_context(|| format!("{} p_cnt", ctx()))?;
        // lemma, pos, synset_cnt, p_cnt, pointer symbols, sense_cnt, tagsense_cnt
        let offsets_start = 4 + p_cnt + 2;
        if tokens.len() < offsets_start {
            anyhow::bail!("{} pointer count mismatch", ctx());
        }
        let ids = tokens[offsets_start..]
            .iter()
            .map(|t| {
                t.parse::<u32>()
                    .map(|offset| SynsetId { pos, offset })
                    .with_context(|| format!("{} synset offset {t}", ctx()))
            })
            .collect::<Result<Vec<_>>>()?;
        if ids.len() != synset_cnt {
            anyhow::bail!(
                "{} synset_cnt mismatch (expected {}, got {})",
                ctx(),
                synset_cnt,
                ids.len()
            );
        }

        lemma_to_synsets.insert((pos, normalize_lemma(tokens[0])), ids);
    }
    Ok(())
}

fn parse_data(bytes: &[u8], pos: Pos, synsets: &mut HashMap<SynsetId, SynsetData>) -> Result<()> {
    for (lineno, line) in record_lines(bytes) {
        let ctx = || format!("data.{}:{}", pos.file_suffix(), lineno);
        let line = std::str::from_utf8(line).with_context(|| format!("{} not utf8", ctx()))?;
        let line_start = line.as_ptr() as usize - bytes.as_ptr() as usize;
        let (head, gloss_span) = match line.find('|') {
            Some(bar) => (&line[..bar], line_start + bar + 1..line_start + line.len()),
            None => (line, line_start + line.len()..line_start + line.len()),
        };

        let tokens: Vec<&str> = head.split_ascii_whitespace().collect();
        if tokens.len() < 4 {
            anyhow::bail!("{} malformed data line", ctx());
        }
        let offset: u32 = tokens[0].parse().with_context(|| format!("{} offset", ctx()))?;
        tokens[1]
            .parse::<u8>()
            .with_context(|| format!("{} lex_filenum", ctx()))?;
        let synset_type = tokens[2]
            .chars()
            .next()
            .and_then(SynsetType::from_char)
            .ok_or_else(|| anyhow::anyhow!("{} invalid ss_type {}", ctx(), tokens[2]))?;
        let w_cnt = usize::from_str_radix(tokens[3], 16).with_context(|| format!("{} w_cnt", ctx()))?;
        if tokens.len() < 4 + w_cnt * 2 {
            anyhow::bail!("{} not enough word/lex_id pairs", ctx());
        }

        let mut words = Vec::with_capacity(w_cnt);
        for pair in tokens[4..4 + w_cnt * 2].chunks_exact(2) {
            let lex_id =
                u8::from_str_radix(pair[1], 16).with_context(|| format!("{} lex_id", ctx()))?;
            // Adjective syntactic markers such as `(a)` or `(ip)` are not part of the word.
            let word = match pair[0].find('(') {
                Some(paren) if pos == Pos::Adj => &pair[0][..paren],
                _ => pair[0],
            };
            words.push((span_of(bytes, pos, word), lex_id));
        }

        let gloss_text = line_slice(bytes, gloss_span).trim();
        let (definition, examples) = split_gloss(gloss_text);
        synsets.insert(
            SynsetId { pos, offset },
            SynsetData {
                synset_type,
                words,
                definition: span_of(bytes, pos, definition),
                examples: examples.into_iter().map(|e| span_of(bytes, pos, e)).collect(),
            },
        );
    }
    Ok(())
}

fn line_slice(bytes: &[u8], range: Range<usize>) -> &str {
    std::str::from_utf8(&bytes[range]).unwrap_or_default()
}

/// Split a gloss at top-level `;` separators. Leading unquoted segments form
/// the definition; quoted segments are examples with their quotes removed.
///
/// Unquoted text after the first example (an attribution such as
/// `"..." - Shakespeare`, or a trailing note) is dropped rather than appended
/// to the definition, and only the first quoted span of a segment is kept.
fn split_gloss(gloss: &str) -> (&str, Vec<&str>) {
    let mut segments = Vec::new();
    let mut in_quote = false;
    let mut seg_start = 0;
    for (idx, ch) in gloss.char_indices() {
        match ch {
            '"' => in_quote = !in_quote,
            ';' if !in_quote => {
                segments.push(&gloss[seg_start..idx]);
                seg_start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&gloss[seg_start..]);

    let mut definition_end = 0;
    let mut examples = Vec::new();
    let mut seen_example = false;
    for segment in segments {
        let trimmed = segment.trim();
        if let Some(quoted) = trimmed.strip_prefix('"') {
            seen_example = true;
            let inner = match quoted.find('"') {
                Some(close) => &quoted[..close],
                None => quoted,
            };
            if !inner.trim().is_empty() {
                examples.push(inner.trim());
            }
        } else if !seen_example && !trimmed.is_empty() {
            definition_end = trimmed.as_ptr() as usize - gloss.as_ptr() as usize + trimmed.len();
        }
    }
    (gloss[..definition_end].trim(), examples)
}

fn span_of(root: &[u8], pos: Pos, text: &str) -> TextRef {
    TextRef {
        pos,
        start: text.as_ptr() as usize - root.as_ptr() as usize,
        len: text.len(),
    }
}

fn normalize_lemma(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}
