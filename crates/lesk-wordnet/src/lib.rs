//! WordNet-backed collaborators for `lesk-core`.
//!
//! [`WordNetTagger`] tokenizes and tags sentences using the dictionary as its
//! open-class lexicon; [`WordNetLexicon`] answers sense queries. Both share one
//! loaded [`WordNet`] and one [`Morphy`] through `Arc`s and are read-only, so
//! a single pair can serve concurrent requests.

pub mod lexicon;
pub mod stopwords;
pub mod tagger;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use wordnet_db::{LoadMode, WordNet};
use wordnet_morphy::Morphy;

pub use lexicon::WordNetLexicon;
pub use stopwords::StopwordFilter;
pub use tagger::WordNetTagger;

/// Load a dictionary directory and build the tagger and lexicon over it.
pub fn load_collaborators(
    dict_dir: impl AsRef<Path>,
    mode: LoadMode,
) -> Result<(WordNetTagger, WordNetLexicon)> {
    let dir = dict_dir.as_ref();
    let start = Instant::now();
    let wordnet = Arc::new(
        WordNet::load_with_mode(dir, mode)
            .with_context(|| format!("loading WordNet from {}", dir.display()))?,
    );
    let morphy = Arc::new(
        Morphy::load(dir).with_context(|| format!("loading exceptions from {}", dir.display()))?,
    );
    info!(
        synsets = wordnet.synset_count(),
        lemmas = wordnet.lemma_count(),
        exceptions = morphy.exception_count(),
        "wordnet loaded in {} ms",
        start.elapsed().as_millis()
    );

    let tagger = WordNetTagger::new(Arc::clone(&wordnet), Arc::clone(&morphy));
    let lexicon = WordNetLexicon::new(wordnet, morphy);
    Ok((tagger, lexicon))
}
