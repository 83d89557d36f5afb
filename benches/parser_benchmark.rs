//! Performance benchmarks for incremental parsing
//!
//! Measures throughput for different chunk sizes, with and without a
//! completion predicate.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ssefeed::sse::{CompletionPredicate, SseParser};

/// Generate a stream of `messages` events with JSON-ish payloads
fn generate_stream(messages: usize) -> String {
    (0..messages)
        .map(|i| {
            format!(
                "event:message\ndata:{{\"index\":{},\"text\":\"chunk of streamed text\"}} [END]\n\n",
                i
            )
        })
        .collect()
}

fn parse_in_chunks(parser: &mut SseParser, input: &str, chunk_size: usize) -> usize {
    let mut count = 0;
    // Input is ASCII, so byte chunks stay on char boundaries
    for chunk in input.as_bytes().chunks(chunk_size) {
        let text = std::str::from_utf8(chunk).unwrap_or_default();
        count += parser.append(text).len();
    }
    count + parser.flush().len()
}

/// Benchmark parsing without a predicate
fn bench_parse_delimiter_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_delimiter_only");
    let input = generate_stream(500);
    group.throughput(Throughput::Bytes(input.len() as u64));

    for chunk_size in [16, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut parser = SseParser::new();
                    black_box(parse_in_chunks(&mut parser, black_box(&input), chunk_size))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark parsing with a sentinel predicate, which re-decodes the tail
fn bench_parse_with_predicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_with_predicate");
    let input = generate_stream(500);
    group.throughput(Throughput::Bytes(input.len() as u64));

    for chunk_size in [16, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut parser =
                        SseParser::with_completion(CompletionPredicate::suffix("[END]"));
                    black_box(parse_in_chunks(&mut parser, black_box(&input), chunk_size))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_delimiter_only, bench_parse_with_predicate);
criterion_main!(benches);
