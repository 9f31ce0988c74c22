//! The run driver: initialization, sweeps, hyperparameter re-estimation,
//! likelihood reporting and posterior averaging.

use log::{debug, info};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::ml::topic::config::GibbsConfig;
use crate::ml::topic::corpus::Corpus;
use crate::ml::topic::hyper::Hyperparameters;
use crate::ml::topic::index::IdIndex;
use crate::ml::topic::likelihood::{log_likelihood, PosteriorMean};
use crate::ml::topic::random::TopicRng;
use crate::ml::topic::resample::resample_token;
use crate::ml::topic::state::SamplerState;

/// Diagnostics for one sweep, recorded after hyperparameter re-estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepReport {
    pub sweep: usize,
    pub alpha: f64,
    pub beta: f64,
    pub log_likelihood: f64,
}

/// Output of a completed run.
#[derive(Debug, Clone)]
pub struct TopicModel {
    /// Posterior mean of the per-topic word distributions, T × V.
    pub phi: Array2<f64>,
    /// Posterior mean of the per-document topic distributions, D × T.
    pub theta: Array2<f64>,
    /// Log-likelihood after the last sweep.
    pub log_likelihood: f64,
    /// Concentrations after the last sweep.
    pub hyperparameters: Hyperparameters,
    /// Number of sweeps averaged into `phi` and `theta`.
    pub samples: usize,
    /// One report per sweep, in order.
    pub trace: Vec<SweepReport>,
    /// Raw document ids, indexed by `theta` row.
    pub documents: IdIndex<String>,
    /// Raw word ids, indexed by `phi` column.
    pub vocabulary: IdIndex<String>,
}

/// Collapsed Gibbs sampler over a borrowed corpus.
pub struct GibbsSampler<'a, G> {
    corpus: &'a Corpus,
    config: GibbsConfig,
    hyper: Hyperparameters,
    rng: G,
}

impl<'a, G: TopicRng> GibbsSampler<'a, G> {
    /// Validate `config` and seed the hyperparameters.
    ///
    /// Configuration errors are reported here, before any randomness is
    /// consumed or any sampling work is done.
    pub fn new(corpus: &'a Corpus, config: GibbsConfig, mut rng: G) -> Result<Self> {
        config.validate()?;
        if corpus.num_tokens() == 0 {
            return Err(Error::EmptyCorpus);
        }

        let hyper = match (config.initial_alpha, config.initial_beta) {
            (Some(alpha), Some(beta)) => Hyperparameters::new(alpha, beta)?,
            (Some(alpha), None) => Hyperparameters::new(alpha, rng.positive_real()?)?,
            (None, Some(beta)) => Hyperparameters::new(rng.positive_real()?, beta)?,
            (None, None) => Hyperparameters::draw(&mut rng)?,
        };

        Ok(Self {
            corpus,
            config,
            hyper,
            rng,
        })
    }

    pub fn config(&self) -> &GibbsConfig {
        &self.config
    }

    /// Current concentrations. They carry over between runs.
    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyper
    }

    /// Run `n_samples` sweeps and return the averaged model.
    pub fn run(&mut self) -> Result<TopicModel> {
        let config = &self.config;
        info!("# of DOCS: {}", self.corpus.num_documents());
        info!("# of TOPICS: {}", config.n_topics);
        info!("# of VOCABS: {}", self.corpus.vocabulary_size());

        let mut state = SamplerState::initialize(self.corpus, config.n_topics, &mut self.rng)?;
        let mut mean = PosteriorMean::zeros(
            config.n_topics,
            self.corpus.vocabulary_size(),
            self.corpus.num_documents(),
        );
        info!(
            "initial state: alpha {}, beta {}, log-likelihood {}",
            self.hyper.alpha,
            self.hyper.beta,
            log_likelihood(&state, &self.hyper)
        );

        let mut trace = Vec::with_capacity(config.n_samples);
        let mut ll = f64::NAN;
        for s in 0..config.n_samples {
            sweep(&mut state, &self.hyper, &mut self.rng)?;
            self.hyper.update(&state)?;
            ll = log_likelihood(&state, &self.hyper);
            info!(
                "sweep {}: alpha {}, beta {}, log-likelihood {}",
                s, self.hyper.alpha, self.hyper.beta, ll
            );
            trace.push(SweepReport {
                sweep: s,
                alpha: self.hyper.alpha,
                beta: self.hyper.beta,
                log_likelihood: ll,
            });

            if config.is_sampling_sweep(s) {
                mean.accumulate(&state, &self.hyper);
                debug!("sweep {} added to posterior mean ({} so far)", s, mean.samples());
            }
        }

        let samples = mean.samples();
        let (phi, theta) = mean.finalize().ok_or(Error::NoQualifyingSweeps {
            nsamples: config.n_samples,
            burnin: config.burnin,
            interval: config.interval,
        })?;

        Ok(TopicModel {
            phi,
            theta,
            log_likelihood: ll,
            hyperparameters: self.hyper,
            samples,
            trace,
            documents: self.corpus.document_index().clone(),
            vocabulary: self.corpus.vocabulary().clone(),
        })
    }
}

/// Resample every token once, documents in index order and tokens in
/// position order.
pub fn sweep<G>(state: &mut SamplerState, hyper: &Hyperparameters, rng: &mut G) -> Result<()>
where
    G: TopicRng + ?Sized,
{
    for doc in 0..state.n_documents() {
        for pos in 0..state.assignments[doc].len() {
            resample_token(state, doc, pos, hyper, rng)?;
        }
    }
    Ok(())
}
