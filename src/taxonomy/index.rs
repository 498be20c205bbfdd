//! Lemma to sense lookup built from a WordNet `index.*` file.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::taxonomy::wordnet::{is_header_line, open};
use crate::taxonomy::{PartOfSpeech, SenseId, TaxonomyError, TaxonomyResult};

/// Only nouns are indexed.
pub const NOUN_INDEX_FILE: &str = "index.noun";

fn count(token: Option<&str>, field: &str) -> Result<usize, String> {
    let token = token.ok_or_else(|| format!("missing field `{field}`"))?;
    token
        .parse()
        .map_err(|_| format!("invalid {field} `{token}`"))
}

/// Parses one index line into its lemma and senses.
pub fn parse_index_line(line: &str) -> Result<(String, Vec<SenseId>), String> {
    let mut tokens = line.split_whitespace();

    let lemma = tokens
        .next()
        .ok_or_else(|| "missing field `lemma`".to_string())?;
    let pos = tokens
        .next()
        .ok_or_else(|| "missing field `pos`".to_string())?;
    let pos = PartOfSpeech::from_tag(pos).ok_or_else(|| format!("invalid part of speech `{pos}`"))?;
    let synset_cnt = count(tokens.next(), "synset_cnt")?;
    let p_cnt = count(tokens.next(), "p_cnt")?;
    for _ in 0..p_cnt {
        tokens
            .next()
            .ok_or_else(|| "missing field `ptr_symbol`".to_string())?;
    }
    count(tokens.next(), "sense_cnt")?;
    count(tokens.next(), "tagsense_cnt")?;

    let senses = tokens
        .map(|token| {
            token
                .parse()
                .map(|offset| SenseId::new(pos, offset))
                .map_err(|_| format!("invalid synset offset `{token}`"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if senses.len() != synset_cnt {
        return Err(format!(
            "expected {synset_cnt} synset offsets, found {}",
            senses.len()
        ));
    }

    Ok((lemma.to_lowercase(), senses))
}

/// Maps a lookup key (lowercase lemma, `_` between words) to its senses.
#[derive(Debug, Default)]
pub struct SenseIndex {
    entries: HashMap<String, Vec<SenseId>>,
}

impl SenseIndex {
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> TaxonomyResult<Self> {
        let mut entries: HashMap<String, Vec<SenseId>> = HashMap::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TaxonomyError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if is_header_line(&line) {
                continue;
            }
            let (lemma, senses) =
                parse_index_line(&line).map_err(|message| TaxonomyError::Parse {
                    path: path.to_path_buf(),
                    line: number + 1,
                    message,
                })?;
            let known = entries.entry(lemma).or_default();
            for sense in senses {
                if !known.contains(&sense) {
                    known.push(sense);
                }
            }
        }
        Ok(Self { entries })
    }

    /// Loads `index.noun` from a WordNet dictionary directory.
    pub fn load(dir: &Path) -> TaxonomyResult<Self> {
        let path = dir.join(NOUN_INDEX_FILE);
        let index = Self::from_reader(open(&path)?, &path)?;
        log::info!("Indexed {} lemmas from {}", index.len(), path.display());
        Ok(index)
    }

    pub fn get(&self, key: &str) -> Option<&[SenseId]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
