use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use gibbs_lda::{load_corpus, GibbsConfig, GibbsSampler, LoadOptions, RngSource};

/// Topic discovery over a `DocID\tWordID\tFrequency` corpus with collapsed
/// Gibbs sampling.
#[derive(Debug, Parser)]
#[command(name = "lda", version, about)]
struct Cli {
    /// Corpus file, one `DocID\tWordID\tFrequency` record per line
    path: std::path::PathBuf,

    /// Number of topics
    #[arg(long, default_value_t = 10)]
    ntopics: usize,

    /// Total number of sweeps
    #[arg(long, default_value_t = 1000)]
    nsamples: usize,

    /// Sweep index after which averaging may start
    #[arg(long, default_value_t = 100)]
    burnin: usize,

    /// Averaging stride
    #[arg(long, default_value_t = 10)]
    interval: usize,

    /// Skip the first record of the input
    #[arg(long)]
    header: bool,

    /// Seed for every random draw; entropy when absent
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> gibbs_lda::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = GibbsConfig::new(cli.ntopics)
        .with_samples(cli.nsamples)
        .with_burnin(cli.burnin)
        .with_interval(cli.interval);
    config.validate()?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let mut corpus = load_corpus(&cli.path, &LoadOptions::default().with_header(cli.header))?;
    corpus.shuffle_tokens(&mut rng);

    let mut sampler = GibbsSampler::new(&corpus, config, RngSource::new(rng))?;
    let model = sampler.run()?;

    info!(
        "finished: {} samples averaged, alpha {}, beta {}",
        model.samples, model.hyperparameters.alpha, model.hyperparameters.beta
    );
    println!("{}", model.log_likelihood);
    Ok(())
}
