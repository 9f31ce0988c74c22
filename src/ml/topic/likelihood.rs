//! Joint log-likelihood of the current assignment and the smoothed point
//! estimates of `phi` and `theta`, plus their running post-burn-in mean.

use ndarray::{Array2, Zip};
use special::Gamma;

use crate::ml::topic::hyper::Hyperparameters;
use crate::ml::topic::state::SamplerState;

/// Joint log probability of the words and topic assignments under the
/// collapsed Dirichlet-multinomial model:
///
/// ```text
///   Σ_t [ lnΓ(Vβ) − V·lnΓ(β) + Σ_w lnΓ(n_tw + β) − lnΓ(n_t + Vβ) ]
/// + Σ_d [ lnΓ(Tα) − T·lnΓ(α) + Σ_t lnΓ(n_dt + α) − lnΓ(n_d + Tα) ]
/// ```
///
/// Summation order is fixed, so identical states give identical values.
pub fn log_likelihood(state: &SamplerState, hyper: &Hyperparameters) -> f64 {
    let Hyperparameters { alpha, beta } = *hyper;
    let n_topics = state.n_topics() as f64;
    let n_words = state.n_words() as f64;

    let topic_prior = ln_gamma(n_words * beta) - n_words * ln_gamma(beta);
    let doc_prior = ln_gamma(n_topics * alpha) - n_topics * ln_gamma(alpha);

    let mut ll = 0.0;
    for (row, &n_t) in state
        .count_topic_word
        .outer_iter()
        .zip(state.count_topic.iter())
    {
        ll += topic_prior;
        ll += row.iter().map(|&n| ln_gamma(n as f64 + beta)).sum::<f64>();
        ll -= ln_gamma(n_t as f64 + n_words * beta);
    }
    for (row, &n_d) in state
        .count_doc_topic
        .outer_iter()
        .zip(state.length_doc.iter())
    {
        ll += doc_prior;
        ll += row.iter().map(|&n| ln_gamma(n as f64 + alpha)).sum::<f64>();
        ll -= ln_gamma(n_d as f64 + n_topics * alpha);
    }
    ll
}

fn ln_gamma(x: f64) -> f64 {
    Gamma::ln_gamma(x).0
}

/// `phi[t][w] = (n_tw + β) / (n_t + Vβ)` for the current counts.
pub fn instant_phi(state: &SamplerState, hyper: &Hyperparameters) -> Array2<f64> {
    let beta = hyper.beta;
    let v_beta = beta * state.n_words() as f64;
    let counts = &state.count_topic_word;
    let totals = &state.count_topic;

    let mut phi = Array2::zeros(counts.raw_dim());
    fill(&mut phi, |t, w| {
        (counts[[t, w]] as f64 + beta) / (totals[t] as f64 + v_beta)
    });
    phi
}

/// `theta[d][t] = (n_dt + α) / (n_d + Tα)` for the current counts.
pub fn instant_theta(state: &SamplerState, hyper: &Hyperparameters) -> Array2<f64> {
    let alpha = hyper.alpha;
    let t_alpha = alpha * state.n_topics() as f64;
    let counts = &state.count_doc_topic;
    let lengths = &state.length_doc;

    let mut theta = Array2::zeros(counts.raw_dim());
    fill(&mut theta, |d, t| {
        (counts[[d, t]] as f64 + alpha) / (lengths[d] as f64 + t_alpha)
    });
    theta
}

#[cfg(not(feature = "parallel"))]
fn fill<F>(out: &mut Array2<f64>, f: F)
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    Zip::indexed(out).for_each(|(i, j), x| *x = f(i, j));
}

#[cfg(feature = "parallel")]
fn fill<F>(out: &mut Array2<f64>, f: F)
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    Zip::indexed(out).par_for_each(|(i, j), x| *x = f(i, j));
}

/// Running sum of instantaneous `phi`/`theta` estimates.
#[derive(Debug, Clone)]
pub struct PosteriorMean {
    phi: Array2<f64>,
    theta: Array2<f64>,
    samples: usize,
}

impl PosteriorMean {
    pub fn zeros(n_topics: usize, n_words: usize, n_documents: usize) -> Self {
        Self {
            phi: Array2::zeros((n_topics, n_words)),
            theta: Array2::zeros((n_documents, n_topics)),
            samples: 0,
        }
    }

    /// Add the current state's point estimates.
    pub fn accumulate(&mut self, state: &SamplerState, hyper: &Hyperparameters) {
        self.phi += &instant_phi(state, hyper);
        self.theta += &instant_theta(state, hyper);
        self.samples += 1;
    }

    /// Number of accumulated estimates.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Divide the sums by the sample count. `None` if nothing was
    /// accumulated.
    pub fn finalize(self) -> Option<(Array2<f64>, Array2<f64>)> {
        if self.samples == 0 {
            return None;
        }
        let n = self.samples as f64;
        Some((self.phi / n, self.theta / n))
    }
}
