pub mod error;
pub mod ml;

pub use error::{Error, Result};
pub use ml::topic::{
    load_corpus, parse_corpus, Corpus, GibbsConfig, GibbsSampler, Hyperparameters, IdIndex,
    LoadOptions, RngSource, SweepReport, TopicModel, TopicRng,
};
