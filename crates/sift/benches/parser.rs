//! Parser benchmarks using divan
//!
//! Benchmarks for query text parsing across clause counts and value kinds.

use sift_parser::{parse_query, parse_with_mode, split_clauses, ParseMode};

fn main() {
    divan::main();
}

// === Single Clause Benchmarks ===

mod clauses {
    use super::*;

    #[divan::bench]
    fn number_value(bencher: divan::Bencher) {
        bencher.bench_local(|| parse_query(divan::black_box("score:GreaterThanOrEqual:5.0")));
    }

    #[divan::bench]
    fn quoted_text_value(bencher: divan::Bencher) {
        bencher.bench_local(|| {
            parse_query(divan::black_box(r#"name:Equal:"O'Brien; \"jr\"""#))
        });
    }

    #[divan::bench]
    fn list_value(bencher: divan::Bencher) {
        bencher.bench_local(|| {
            parse_query(divan::black_box("status:ContainsOnValue:[Active, Suspended, 3, null]"))
        });
    }

    #[divan::bench]
    fn nested_path(bencher: divan::Bencher) {
        bencher.bench_local(|| {
            parse_query(divan::black_box("Customer.Address.City:Equal:Oslo"))
        });
    }
}

// === Query Length Benchmarks ===

mod queries {
    use super::*;

    fn query(clauses: usize) -> String {
        (0..clauses)
            .map(|i| match i % 3 {
                0 => format!("Id:GreaterThan:{i}"),
                1 => format!("Or:Tags:Contains:tag{i}"),
                _ => format!("Name:NotEqual:\"name {i}\""),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[divan::bench(args = [1, 10, 100])]
    fn fast_mode(bencher: divan::Bencher, clauses: usize) {
        let text = query(clauses);
        bencher.bench_local(|| parse_query(divan::black_box(&text)));
    }

    #[divan::bench(args = [1, 10, 100])]
    fn analysis_mode(bencher: divan::Bencher, clauses: usize) {
        let text = query(clauses);
        bencher.bench_local(|| parse_with_mode(divan::black_box(&text), ParseMode::Analysis));
    }

    #[divan::bench(args = [10, 100])]
    fn split_only(bencher: divan::Bencher, clauses: usize) {
        let text = query(clauses);
        bencher.bench_local(|| split_clauses(divan::black_box(&text)));
    }
}
