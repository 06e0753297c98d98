use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use repoquery::config::{EntitySearchSettings, TermsSettings};
use repoquery::schema::{FieldType, FieldTypeRegistry};
use repoquery::{parse_response, QueryParameters, SearchQueryBuilder, TermsQueryBuilder};
use serde_json::json;

fn build_registry(extra_keyword_fields: usize) -> FieldTypeRegistry {
    let mut registry = FieldTypeRegistry::default()
        .with_field("agency.acronym", FieldType::Keyword)
        .with_keyword_subfield("languages", FieldType::Keyword)
        .with_field("status", FieldType::Keyword)
        .with_field("date.created", FieldType::Date)
        .with_field("date.lastModified", FieldType::Date);
    for i in 0..extra_keyword_fields {
        registry = registry.with_field(format!("custom_{}", i), FieldType::Keyword);
    }
    registry
}

fn search_params() -> QueryParameters {
    QueryParameters::new()
        .with("q", "open data api")
        .with("agency.acronym", "GSA")
        .with("languages", vec!["Go", "Rust", "Python"])
        .with("date.created_gte", "2016-01-01T00:00:00Z")
        .with("date.lastModified_lte", "2018-12")
        .with("sort", "name__desc__avg,agency.acronym")
        .with("include", vec!["name", "repoID"])
        .with("size", "50")
}

fn bench_entity_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_compile");

    for fields in [0, 50, 500] {
        let builder = SearchQueryBuilder::new(
            Arc::new(build_registry(fields)),
            EntitySearchSettings::default(),
        );
        let params = search_params();

        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| black_box(builder.compile(black_box(&params)).unwrap().to_json()))
        });
    }

    group.finish();
}

fn bench_terms_compile(c: &mut Criterion) {
    let builder = TermsQueryBuilder::new(TermsSettings::default());
    let params = QueryParameters::new().with("term", "api");

    c.bench_function("terms_compile", |b| {
        b.iter(|| black_box(builder.compile(black_box(&params)).unwrap().to_json()))
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let hits: Vec<_> = (0..100)
        .map(|i| {
            json!({
                "_id": format!("repo-{}", i),
                "_score": 1.0,
                "_source": {
                    "name": format!("repo {}", i),
                    "_meta": { "rank": i },
                    "contributors": [{ "name": "a", "_w": 1 }, { "name": "b" }]
                }
            })
        })
        .collect();
    let response = json!({ "hits": { "total": 100, "hits": hits } });

    c.bench_function("parse_response", |b| {
        b.iter(|| black_box(parse_response(black_box(&response))))
    });
}

criterion_group!(
    benches,
    bench_entity_compile,
    bench_terms_compile,
    bench_sanitize
);
criterion_main!(benches);
