use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{Error, Result};
use crate::ml::topic::corpus::Corpus;
use crate::ml::topic::random::TopicRng;

/// Topic assignments for every token and the four count tensors derived
/// from them.
///
/// Outside of a single remove/resample/reinsert step the counts are exact
/// marginals of `assignments`:
/// - `count_topic[t] == Σ_w count_topic_word[t][w]`
/// - `length_doc[d] == Σ_t count_doc_topic[d][t]`
#[derive(Debug, Clone)]
pub struct SamplerState {
    /// `words[d][i]` is the word index of token `i` of document `d`.
    pub(crate) words: Vec<Vec<usize>>,
    /// `assignments[d][i]` is the topic of token `i` of document `d`.
    pub(crate) assignments: Vec<Vec<usize>>,
    /// T × V
    pub(crate) count_topic_word: Array2<usize>,
    /// D × T
    pub(crate) count_doc_topic: Array2<usize>,
    pub(crate) count_topic: Array1<usize>,
    pub(crate) length_doc: Array1<usize>,
}

impl SamplerState {
    /// Assign every token of `corpus` a topic drawn uniformly from
    /// `0..n_topics` and build the matching counts.
    pub fn initialize<G>(corpus: &Corpus, n_topics: usize, rng: &mut G) -> Result<Self>
    where
        G: TopicRng + ?Sized,
    {
        if n_topics == 0 {
            return Err(Error::InvalidConfig(
                "number of topics must be positive".to_string(),
            ));
        }
        if corpus.num_documents() == 0 || corpus.num_tokens() == 0 {
            return Err(Error::EmptyCorpus);
        }

        let n_docs = corpus.num_documents();
        let n_words = corpus.vocabulary_size();
        let mut state = Self {
            words: corpus.documents().to_vec(),
            assignments: Vec::with_capacity(n_docs),
            count_topic_word: Array2::zeros((n_topics, n_words)),
            count_doc_topic: Array2::zeros((n_docs, n_topics)),
            count_topic: Array1::zeros(n_topics),
            length_doc: Array1::zeros(n_docs),
        };

        for (d, doc) in corpus.documents().iter().enumerate() {
            let mut topics = Vec::with_capacity(doc.len());
            for &w in doc {
                let t = rng.uniform_topic(n_topics);
                topics.push(t);
                state.add(d, w, t);
            }
            state.assignments.push(topics);
        }

        Ok(state)
    }

    pub(crate) fn add(&mut self, d: usize, w: usize, t: usize) {
        self.count_topic_word[[t, w]] += 1;
        self.count_doc_topic[[d, t]] += 1;
        self.count_topic[t] += 1;
        self.length_doc[d] += 1;
    }

    pub(crate) fn remove(&mut self, d: usize, w: usize, t: usize) {
        self.count_topic_word[[t, w]] -= 1;
        self.count_doc_topic[[d, t]] -= 1;
        self.count_topic[t] -= 1;
        self.length_doc[d] -= 1;
    }

    /// Number of topics, `T`.
    pub fn n_topics(&self) -> usize {
        self.count_topic.len()
    }

    /// Number of documents, `D`.
    pub fn n_documents(&self) -> usize {
        self.length_doc.len()
    }

    /// Vocabulary size, `V`.
    pub fn n_words(&self) -> usize {
        self.count_topic_word.ncols()
    }

    pub fn total_tokens(&self) -> usize {
        self.length_doc.sum()
    }

    /// Word index of token `pos` in document `doc`.
    pub fn word_of(&self, doc: usize, pos: usize) -> Option<usize> {
        self.words.get(doc)?.get(pos).copied()
    }

    /// Current topic of token `pos` in document `doc`.
    pub fn topic_of(&self, doc: usize, pos: usize) -> Option<usize> {
        self.assignments.get(doc)?.get(pos).copied()
    }

    pub fn assignments(&self) -> &[Vec<usize>] {
        &self.assignments
    }

    pub fn count_topic_word(&self) -> ArrayView2<'_, usize> {
        self.count_topic_word.view()
    }

    pub fn count_doc_topic(&self) -> ArrayView2<'_, usize> {
        self.count_doc_topic.view()
    }

    pub fn count_topic(&self) -> ArrayView1<'_, usize> {
        self.count_topic.view()
    }

    pub fn length_doc(&self) -> ArrayView1<'_, usize> {
        self.length_doc.view()
    }

    /// Recompute all four marginals from the assignments and compare them
    /// with the maintained counts.
    pub fn is_consistent(&self) -> bool {
        if self.words.len() != self.assignments.len() {
            return false;
        }

        let t = self.n_topics();
        let mut topic_word = Array2::<usize>::zeros(self.count_topic_word.raw_dim());
        let mut doc_topic = Array2::<usize>::zeros(self.count_doc_topic.raw_dim());
        for (d, (words, topics)) in self.words.iter().zip(&self.assignments).enumerate() {
            if words.len() != topics.len() {
                return false;
            }
            for (&w, &z) in words.iter().zip(topics) {
                if z >= t || w >= self.n_words() {
                    return false;
                }
                topic_word[[z, w]] += 1;
                doc_topic[[d, z]] += 1;
            }
        }

        let topic_totals = topic_word.sum_axis(Axis(1));
        let doc_totals = doc_topic.sum_axis(Axis(1));

        topic_word == self.count_topic_word
            && doc_topic == self.count_doc_topic
            && topic_totals == self.count_topic
            && doc_totals == self.length_doc
    }
}
