//! Readers for the WordNet `data.*` files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::taxonomy::{
    PartOfSpeech, SenseId, Taxonomy, TaxonomyBuilder, TaxonomyError, TaxonomyResult,
};

/// Data files loaded into the taxonomy, in load order.
pub const DATA_FILES: [&str; 4] = ["data.noun", "data.verb", "data.adj", "data.adv"];

/// Pointer symbols treated as subsumption: hypernym and instance hypernym.
const SUBSUMPTION_POINTERS: [&str; 2] = ["@", "@i"];

/// The parts of a data line the taxonomy needs.
#[derive(Debug, PartialEq)]
pub struct Synset {
    pub id: SenseId,
    pub words: Vec<String>,
    pub hypernyms: Vec<SenseId>,
}

/// Returns `true` for the license preamble and blank lines.
pub(crate) fn is_header_line(line: &str) -> bool {
    line.starts_with(' ') || line.trim().is_empty()
}

fn next_token<'a, I>(tokens: &mut I, field: &str) -> Result<&'a str, String>
where
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .ok_or_else(|| format!("missing field `{field}`"))
}

fn parse_offset(token: &str) -> Result<u32, String> {
    token
        .parse()
        .map_err(|_| format!("invalid synset offset `{token}`"))
}

fn parse_pos(token: &str) -> Result<PartOfSpeech, String> {
    PartOfSpeech::from_tag(token).ok_or_else(|| format!("invalid part of speech `{token}`"))
}

/// Parses one synset line of a `data.*` file.
///
/// Verb frames and the gloss are ignored.
pub fn parse_data_line(line: &str) -> Result<Synset, String> {
    let fields = line.split('|').next().unwrap_or_default();
    let mut tokens = fields.split_whitespace();

    let offset = parse_offset(next_token(&mut tokens, "synset_offset")?)?;
    next_token(&mut tokens, "lex_filenum")?;
    let pos = parse_pos(next_token(&mut tokens, "ss_type")?)?;

    let w_cnt = next_token(&mut tokens, "w_cnt")?;
    let w_cnt = usize::from_str_radix(w_cnt, 16)
        .map_err(|_| format!("invalid word count `{w_cnt}`"))?;
    let mut words = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        words.push(next_token(&mut tokens, "word")?.to_string());
        next_token(&mut tokens, "lex_id")?;
    }

    let p_cnt = next_token(&mut tokens, "p_cnt")?;
    let p_cnt: usize = p_cnt
        .parse()
        .map_err(|_| format!("invalid pointer count `{p_cnt}`"))?;
    let mut hypernyms = Vec::new();
    for _ in 0..p_cnt {
        let symbol = next_token(&mut tokens, "pointer_symbol")?;
        let target = parse_offset(next_token(&mut tokens, "pointer offset")?)?;
        let target_pos = parse_pos(next_token(&mut tokens, "pointer pos")?)?;
        next_token(&mut tokens, "source/target")?;
        if SUBSUMPTION_POINTERS.contains(&symbol) {
            hypernyms.push(SenseId::new(target_pos, target));
        }
    }

    Ok(Synset {
        id: SenseId::new(pos, offset),
        words,
        hypernyms,
    })
}

/// Adds every synset of one data file to `builder`.
///
/// Returns the number of synsets read.
pub fn read_data<R: BufRead>(
    reader: R,
    path: &Path,
    builder: &mut TaxonomyBuilder,
) -> TaxonomyResult<usize> {
    let mut count = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if is_header_line(&line) {
            continue;
        }
        let synset = parse_data_line(&line).map_err(|message| TaxonomyError::Parse {
            path: path.to_path_buf(),
            line: number + 1,
            message,
        })?;
        builder.add_synset(synset.id);
        for hypernym in synset.hypernyms {
            builder.add_subsumption(synset.id, hypernym);
        }
        count += 1;
    }
    Ok(count)
}

pub(crate) fn open(path: &Path) -> TaxonomyResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads the four WordNet data files found in `dir` into a rooted taxonomy.
pub fn load_taxonomy(dir: &Path) -> TaxonomyResult<Taxonomy> {
    let mut builder = TaxonomyBuilder::new();
    for name in DATA_FILES {
        let path = dir.join(name);
        let count = read_data(open(&path)?, &path, &mut builder)?;
        log::info!("Loaded {count} synsets from {}", path.display());
    }
    builder.build()
}
