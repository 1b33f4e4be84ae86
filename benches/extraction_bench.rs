use criterion::{black_box, criterion_group, criterion_main, Criterion};
use europarser::pivot::{PivotExtractor, RawDocument};
use europarser::processing::merge;
use europarser::transformers::{Stats, Transform, TxmTransformer};

fn document(nb_articles: usize) -> RawDocument {
    let articles: String = (0..nb_articles)
        .map(|i| {
            format!(
                r#"<article>
                <span class="DocPublicationName">Le Monde (site web)</span>
                <span class="DocHeader">lundi {} janvier 2022 812 mots</span>
                <div class="titreArticle">
                    <p class="sm-margin-TopNews titreArticleVisu rdp__articletitle">Réforme des retraites, épisode {i}</p>
                </div>
                <p class="sm-margin-bottomNews">Jean Dupont</p>
                <div class="docOcurrContainer">Le gouvernement a présenté la réforme des retraites.
                Les syndicats dénoncent une réforme injuste et appellent à la grève.</div>
            </article>"#,
                1 + i % 28
            )
        })
        .collect();
    RawDocument::new("bench.html", format!("<html><body>{articles}</body></html>"))
}

pub fn extraction(c: &mut Criterion) {
    let extractor = PivotExtractor::new().unwrap();
    let doc = document(100);
    c.bench_function("extract_100_articles", |b| {
        b.iter(|| extractor.extract(black_box(&doc)))
    });
}

pub fn merging(c: &mut Criterion) {
    let extractor = PivotExtractor::new().unwrap();
    let batches: Vec<_> = (0..10)
        .map(|_| extractor.extract(&document(100)).records)
        .collect();
    c.bench_function("merge_10x100", |b| {
        b.iter(|| merge(black_box(batches.clone())))
    });
}

pub fn exports(c: &mut Criterion) {
    let extractor = PivotExtractor::new().unwrap();
    let corpus = merge(vec![extractor.extract(&document(500)).records]);
    c.bench_function("stats_500", |b| b.iter(|| Stats::compute(black_box(&corpus))));
    c.bench_function("txm_500", |b| {
        b.iter(|| TxmTransformer.transform(black_box(&corpus)))
    });
}

criterion_group!(benches, extraction, merging, exports);
criterion_main!(benches);
