//! Symmetric Dirichlet concentrations and their re-estimation by Minka's
//! fixed-point iteration.
//!
//! For the document-topic concentration:
//!
//! ```text
//!              Σ_d Σ_t [ψ(n_dt + α) − ψ(α)]
//!   α' = α · ------------------------------
//!            T · Σ_d [ψ(n_d + Tα) − ψ(Tα)]
//! ```
//!
//! and the same with topics in place of documents, words in place of topics
//! and `V` in place of `T` for the topic-word concentration `β`.

use log::trace;
use ndarray::{ArrayView1, ArrayView2};
use special::Gamma;

use crate::error::{Error, Result};
use crate::ml::topic::random::TopicRng;
use crate::ml::topic::state::SamplerState;

/// The two concentration parameters, both strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    /// Document-topic concentration.
    pub alpha: f64,
    /// Topic-word concentration.
    pub beta: f64,
}

impl Hyperparameters {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            alpha: check_positive("alpha", alpha)?,
            beta: check_positive("beta", beta)?,
        })
    }

    /// Draw `alpha` then `beta` from the source's positive-real distribution.
    pub fn draw<G: TopicRng + ?Sized>(rng: &mut G) -> Result<Self> {
        let alpha = rng.positive_real()?;
        let beta = rng.positive_real()?;
        Self::new(alpha, beta)
    }

    /// One fixed-point step for both concentrations.
    ///
    /// `alpha` is computed first, then `beta`. Both are checked before either
    /// is stored, so on error the previous values are left untouched.
    pub fn update(&mut self, state: &SamplerState) -> Result<()> {
        let alpha = check_positive(
            "alpha",
            fixed_point(self.alpha, state.count_doc_topic(), state.length_doc()),
        )?;
        let beta = check_positive(
            "beta",
            fixed_point(self.beta, state.count_topic_word(), state.count_topic()),
        )?;
        trace!(
            "hyperparameters: alpha {} -> {}, beta {} -> {}",
            self.alpha,
            alpha,
            self.beta,
            beta
        );
        self.alpha = alpha;
        self.beta = beta;
        Ok(())
    }
}

/// Minka's update for a symmetric concentration `c` shared by the columns of
/// `counts`, whose row sums are `totals`.
fn fixed_point(c: f64, counts: ArrayView2<'_, usize>, totals: ArrayView1<'_, usize>) -> f64 {
    let k = counts.ncols() as f64;
    let psi_c = Gamma::digamma(c);
    let psi_kc = Gamma::digamma(k * c);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (row, &total) in counts.outer_iter().zip(totals.iter()) {
        for &n in row.iter() {
            // ψ(0 + c) − ψ(c) is exactly zero
            if n > 0 {
                numerator += Gamma::digamma(n as f64 + c) - psi_c;
            }
        }
        if total > 0 {
            denominator += Gamma::digamma(total as f64 + k * c) - psi_kc;
        }
    }

    c * numerator / (k * denominator)
}

fn check_positive(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::NumericalDomain { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::topic::corpus::Corpus;
    use crate::ml::topic::random::tests::ScriptedRng;
    use crate::ml::topic::random::RngSource;
    use approx::assert_relative_eq;
    use std::collections::VecDeque;

    fn state(n_topics: usize, seed: u64) -> SamplerState {
        let corpus = Corpus::from_documents(vec![
            ("a", vec!["w1", "w1", "w2", "w4"]),
            ("b", vec!["w2", "w3", "w3", "w3"]),
            ("c", vec!["w4", "w4", "w1", "w3", "w2"]),
        ]);
        let mut rng = RngSource::seeded(seed);
        SamplerState::initialize(&corpus, n_topics, &mut rng).unwrap()
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(Hyperparameters::new(0.0, 1.0).is_err());
        assert!(Hyperparameters::new(1.0, -0.5).is_err());
        assert!(Hyperparameters::new(f64::NAN, 1.0).is_err());
        assert!(Hyperparameters::new(1.0, f64::INFINITY).is_err());
        assert!(Hyperparameters::new(0.1, 0.01).is_ok());
    }

    #[test]
    fn test_draw_order_is_alpha_then_beta() {
        let mut rng = ScriptedRng {
            topics: VecDeque::new(),
            reals: VecDeque::from(vec![0.25, 0.75]),
        };
        let h = Hyperparameters::draw(&mut rng).unwrap();
        assert_eq!(h.alpha, 0.25);
        assert_eq!(h.beta, 0.75);
    }

    #[test]
    fn test_update_stays_positive() {
        for seed in 0..20 {
            let s = state(3, seed);
            let mut h = Hyperparameters::new(0.05, 0.2).unwrap();
            for _ in 0..5 {
                h.update(&s).unwrap();
                assert!(h.alpha > 0.0 && h.alpha.is_finite());
                assert!(h.beta > 0.0 && h.beta.is_finite());
            }
        }
    }

    #[test]
    fn test_fixed_point_matches_direct_sum() {
        let s = state(2, 4);
        let alpha = 0.3;
        let t = s.n_topics() as f64;

        let mut num = 0.0;
        let mut den = 0.0;
        for d in 0..s.n_documents() {
            for k in 0..s.n_topics() {
                num += Gamma::digamma(s.count_doc_topic()[[d, k]] as f64 + alpha)
                    - Gamma::digamma(alpha);
            }
            den += Gamma::digamma(s.length_doc()[d] as f64 + t * alpha)
                - Gamma::digamma(t * alpha);
        }
        let expected = alpha * num / (t * den);

        let got = fixed_point(alpha, s.count_doc_topic(), s.length_doc());
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_single_topic_fixed_point_is_identity() {
        // With T = 1 every document's counts sit in one column, so the
        // numerator and denominator coincide.
        let s = state(1, 0);
        let mut h = Hyperparameters::new(0.7, 0.2).unwrap();
        h.update(&s).unwrap();
        assert_relative_eq!(h.alpha, 0.7, max_relative = 1e-12);
    }

    #[test]
    fn test_degenerate_counts_rejected_without_mutation() {
        let mut s = state(2, 1);
        s.count_doc_topic.fill(0);
        s.length_doc.fill(0);
        let mut h = Hyperparameters::new(0.4, 0.6).unwrap();
        let err = h.update(&s).unwrap_err();
        assert!(matches!(err, Error::NumericalDomain { quantity: "alpha", .. }));
        assert_eq!(h, Hyperparameters::new(0.4, 0.6).unwrap());
    }
}
