//! Corpus representation and the `DocID\tWordID\tFrequency` loader.
//!
//! Documents and words are registered in first-seen order, which fixes the
//! row order of `theta` and the column order of `phi` for the whole run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::ml::topic::index::IdIndex;

/// Options for [`parse_corpus`] and [`load_corpus`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Skip the first non-empty record.
    pub header: bool,
}

impl LoadOptions {
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Documents as sequences of dense word indices, plus the index maps that
/// translate between raw ids and dense indices.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: IdIndex<String>,
    vocabulary: IdIndex<String>,
    tokens: Vec<Vec<usize>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(document id, tokens)` pairs. Repeated document
    /// ids are merged, keeping token order.
    pub fn from_documents<I, D, T, W>(documents: I) -> Self
    where
        I: IntoIterator<Item = (D, T)>,
        D: Into<String>,
        T: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let mut corpus = Self::new();
        for (doc, words) in documents {
            let d = corpus.register_document(doc.into());
            for word in words {
                let w = corpus.vocabulary.insert(word.into());
                corpus.tokens[d].push(w);
            }
        }
        corpus
    }

    /// Append `count` occurrences of `word` to `doc`, registering either id
    /// if it has not been seen yet.
    pub fn push_occurrences(&mut self, doc: &str, word: &str, count: usize) {
        let d = match self.documents.index_of(&doc.to_string()) {
            Some(d) => d,
            None => self.register_document(doc.to_string()),
        };
        let w = self.vocabulary.insert(word.to_string());
        self.tokens[d].extend(std::iter::repeat(w).take(count));
    }

    fn register_document(&mut self, doc: String) -> usize {
        let d = self.documents.insert(doc);
        if d == self.tokens.len() {
            self.tokens.push(Vec::new());
        }
        d
    }

    /// Shuffle the token order inside every document.
    pub fn shuffle_tokens<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for doc in &mut self.tokens {
            doc.shuffle(rng);
        }
    }

    /// Number of documents, `D`.
    pub fn num_documents(&self) -> usize {
        self.tokens.len()
    }

    /// Number of distinct words, `V`.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Total number of tokens across all documents.
    pub fn num_tokens(&self) -> usize {
        self.tokens.iter().map(Vec::len).sum()
    }

    /// Token sequences indexed by dense document index.
    pub fn documents(&self) -> &[Vec<usize>] {
        &self.tokens
    }

    pub fn document_index(&self) -> &IdIndex<String> {
        &self.documents
    }

    pub fn vocabulary(&self) -> &IdIndex<String> {
        &self.vocabulary
    }
}

/// Parse `DocID\tWordID\tFrequency` records from a reader.
///
/// Blank lines are ignored. Each record contributes `Frequency` copies of
/// `WordID` to document `DocID`.
pub fn parse_corpus<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    let mut skip_header = options.header;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        if skip_header {
            skip_header = false;
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < 3 {
            return Err(Error::Parse {
                line: line_no,
                message: format!("expected 3 tab-separated fields, found {}", fields.len()),
            });
        }
        let count = fields[2].parse::<usize>().map_err(|e| Error::Parse {
            line: line_no,
            message: format!("invalid frequency {:?}: {}", fields[2], e),
        })?;
        corpus.push_occurrences(fields[0], fields[1], count);
    }

    Ok(corpus)
}

/// Read a corpus file. See [`parse_corpus`] for the format.
pub fn load_corpus<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Corpus> {
    let file = File::open(path)?;
    parse_corpus(BufReader::new(file), options)
}
