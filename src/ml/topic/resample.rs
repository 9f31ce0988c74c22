use crate::error::{Error, Result};
use crate::ml::topic::hyper::Hyperparameters;
use crate::ml::topic::random::TopicRng;
use crate::ml::topic::state::SamplerState;

/// Full-conditional distribution of a token of `word` in document `doc`
/// over all topics, normalized to sum to one.
///
/// The caller is expected to have removed the token's own contribution from
/// `state` already:
///
/// ```text
///   p(t) ∝ (n_dt + α) / (n_d + Tα) · (n_tw + β) / (n_t + Vβ)
/// ```
///
/// Every factor carries a positive smoothing constant, so all entries are
/// strictly positive when `alpha` and `beta` are.
pub fn full_conditional(
    state: &SamplerState,
    doc: usize,
    word: usize,
    hyper: &Hyperparameters,
) -> Vec<f64> {
    let n_topics = state.n_topics() as f64;
    let n_words = state.n_words() as f64;
    let Hyperparameters { alpha, beta } = *hyper;

    let doc_denominator = state.length_doc[doc] as f64 + alpha * n_topics;
    let doc_topic = state.count_doc_topic.row(doc);
    let topic_word = state.count_topic_word.column(word);

    let mut probs: Vec<f64> = doc_topic
        .iter()
        .zip(topic_word.iter())
        .zip(state.count_topic.iter())
        .map(|((&n_dt, &n_tw), &n_t)| {
            (n_dt as f64 + alpha) / doc_denominator * (n_tw as f64 + beta)
                / (n_t as f64 + beta * n_words)
        })
        .collect();

    let total: f64 = probs.iter().sum();
    for p in &mut probs {
        *p /= total;
    }
    probs
}

/// Resample the topic of token `pos` of document `doc` from its full
/// conditional and return the new topic.
///
/// The token is removed from the counts, a topic is drawn and the token is
/// reinserted under it, leaving the counts exact marginals of the
/// assignments again. If the draw fails the token goes back under its old
/// topic before the error is returned.
pub fn resample_token<G>(
    state: &mut SamplerState,
    doc: usize,
    pos: usize,
    hyper: &Hyperparameters,
    rng: &mut G,
) -> Result<usize>
where
    G: TopicRng + ?Sized,
{
    let (word, old) = match (state.word_of(doc, pos), state.topic_of(doc, pos)) {
        (Some(w), Some(z)) => (w, z),
        _ => return Err(Error::UnknownToken { doc, pos }),
    };

    state.remove(doc, word, old);
    let probs = full_conditional(state, doc, word, hyper);
    let new = match rng.categorical(&probs) {
        Ok(t) => t,
        Err(e) => {
            state.add(doc, word, old);
            return Err(e);
        }
    };

    state.assignments[doc][pos] = new;
    state.add(doc, word, new);
    Ok(new)
}
