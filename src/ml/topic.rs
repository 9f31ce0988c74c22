//! Latent Dirichlet Allocation by collapsed Gibbs sampling.
//!
//! The sampler works on a corpus of documents given as word-occurrence
//! tokens (a word appearing N times in a document contributes N tokens).
//! Every token carries exactly one topic assignment, and four count tensors
//! are kept as exact marginals of those assignments:
//!
//! ```text
//!   count_topic_word[t][w]   tokens of word w assigned topic t
//!   count_doc_topic[d][t]    tokens in document d assigned topic t
//!   count_topic[t]           tokens assigned topic t
//!   length_doc[d]            tokens in document d
//! ```
//!
//! Each sweep resamples every token from its full conditional, re-estimates
//! the symmetric Dirichlet concentrations `alpha` and `beta` with Minka's
//! fixed-point iteration, and reports the joint log-likelihood. After burn-in,
//! every `interval`-th sweep contributes its smoothed point estimates to the
//! posterior means `phi` (topics × words) and `theta` (documents × topics).
//!
//! # Example
//!
//! ```rust
//! use gibbs_lda::{Corpus, GibbsConfig, GibbsSampler, RngSource};
//!
//! let corpus = Corpus::from_documents(vec![
//!     ("a", vec!["w1", "w1", "w2"]),
//!     ("b", vec!["w2", "w3", "w3", "w3"]),
//! ]);
//! let config = GibbsConfig::new(2)
//!     .with_samples(50)
//!     .with_burnin(10)
//!     .with_interval(5);
//!
//! let mut sampler = GibbsSampler::new(&corpus, config, RngSource::seeded(7)).unwrap();
//! let model = sampler.run().unwrap();
//! assert_eq!(model.phi.dim(), (2, 3));
//! assert_eq!(model.theta.dim(), (2, 2));
//! ```

pub mod config;
pub mod corpus;
pub mod hyper;
pub mod index;
pub mod likelihood;
pub mod random;
pub mod resample;
pub mod sampler;
pub mod state;

pub use config::GibbsConfig;
pub use corpus::{load_corpus, parse_corpus, Corpus, LoadOptions};
pub use hyper::Hyperparameters;
pub use index::IdIndex;
pub use likelihood::{instant_phi, instant_theta, log_likelihood, PosteriorMean};
pub use random::{RngSource, TopicRng};
pub use resample::{full_conditional, resample_token};
pub use sampler::{GibbsSampler, SweepReport, TopicModel};
pub use state::SamplerState;
