use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gibbs_lda::{Corpus, GibbsConfig, GibbsSampler, RngSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn synthetic_corpus(n_docs: usize, doc_len: usize, vocab: usize) -> Corpus {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let docs = (0..n_docs).map(|d| {
        let words: Vec<String> = (0..doc_len)
            .map(|_| format!("w{}", rng.gen_range(0..vocab)))
            .collect();
        (format!("d{}", d), words)
    });
    Corpus::from_documents(docs.collect::<Vec<_>>())
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("gibbs_run");
    group.sample_size(10);

    for &n_topics in &[5, 20] {
        let corpus = synthetic_corpus(100, 50, 500);
        let config = GibbsConfig::new(n_topics)
            .with_samples(20)
            .with_burnin(5)
            .with_interval(2);

        group.bench_with_input(BenchmarkId::new("topics", n_topics), &config, |b, config| {
            b.iter(|| {
                let mut sampler =
                    GibbsSampler::new(&corpus, config.clone(), RngSource::seeded(7)).unwrap();
                black_box(sampler.run().unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run);
criterion_main!(benches);
