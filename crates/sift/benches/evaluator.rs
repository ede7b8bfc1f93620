//! Evaluator benchmarks using divan
//!
//! Benchmarks for compiling queries and running compiled predicates.

use sift::{DynamicQueryBuilder, Query, QuerySource, Record, Schema};
use std::sync::LazyLock;

fn main() {
    divan::main();
}

struct Row {
    id: i64,
    score: f64,
    name: String,
    rank: Option<i32>,
    tags: Vec<String>,
}

static ROW: LazyLock<Schema<Row>> = LazyLock::new(|| {
    Schema::builder("Row")
        .scalar("Id", |r: &Row| &r.id)
        .scalar("Score", |r: &Row| &r.score)
        .scalar("Name", |r: &Row| &r.name)
        .nullable("Rank", |r: &Row| r.rank.as_ref())
        .sequence("Tags", |r: &Row| &r.tags)
        .build()
});

impl Record for Row {
    fn schema() -> &'static Schema<Self> {
        &ROW
    }
}

fn rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| Row {
            id: i as i64,
            score: (i % 100) as f64 / 10.0,
            name: format!("row-{i}"),
            rank: (i % 3 != 0).then_some((i % 50) as i32),
            tags: (0..i % 4).map(|t| format!("t{t}")).collect(),
        })
        .collect()
}

const QUERY: &str = "Score:GreaterThanOrEqual:5; Rank:LessThan:20; Or:Rank:Equal:null; Tags:Contains:t1";

// === Compilation Benchmarks ===

mod compile {
    use super::*;

    #[divan::bench]
    fn single_clause(bencher: divan::Bencher) {
        let builder = DynamicQueryBuilder::new();
        bencher.bench_local(|| builder.build::<Row>(divan::black_box("Id:Equal:42")));
    }

    #[divan::bench]
    fn mixed_query(bencher: divan::Bencher) {
        let builder = DynamicQueryBuilder::new();
        bencher.bench_local(|| builder.build::<Row>(divan::black_box(QUERY)));
    }

    #[divan::bench]
    fn case_insensitive_paths(bencher: divan::Bencher) {
        let builder = DynamicQueryBuilder::new();
        bencher.bench_local(|| {
            builder.build::<Row>(divan::black_box("score:GreaterThan:1; NAME:NotEqual:x"))
        });
    }
}

// === Evaluation Benchmarks ===

mod evaluate {
    use super::*;

    #[divan::bench(args = [100, 10_000])]
    fn filter_count(bencher: divan::Bencher, count: usize) {
        let data = rows(count);
        let predicate = DynamicQueryBuilder::new().build::<Row>(QUERY).unwrap();
        bencher.bench_local(|| predicate.filter(divan::black_box(&data)).count());
    }

    #[divan::bench(args = [100, 10_000])]
    fn handwritten_closure(bencher: divan::Bencher, count: usize) {
        let data = rows(count);
        bencher.bench_local(|| {
            divan::black_box(&data)
                .iter()
                .filter(|r| {
                    r.score >= 5.0
                        && r.rank.is_none_or(|rank| rank < 20)
                        && r.tags.iter().any(|t| t == "t1")
                })
                .count()
        });
    }

    #[divan::bench(args = [10_000])]
    fn paged_query(bencher: divan::Bencher, count: usize) {
        let data = rows(count);
        let predicate = DynamicQueryBuilder::new().build::<Row>(QUERY).unwrap();
        let query = Query::new()
            .filter(predicate)
            .order_by(sift::OrderBy::key(|r: &Row| r.id, sift::SortDirection::Descending))
            .skip(20)
            .take(20);
        bencher.bench_local(|| divan::black_box(&data).query(&query).items.len());
    }
}
