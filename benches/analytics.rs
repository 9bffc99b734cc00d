//! Benchmarks for chatstats aggregation and parsing.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench analytics -- time_series`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstats::Message;
use chatstats::analytics::{
    Granularity, hour_histogram, sender_frequency, time_series_at, top_senders,
};
use chatstats::parser::TranscriptParser;
use chatstats::parsers::WhatsAppParser;
use chrono::{Duration, NaiveDate, NaiveDateTime};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_messages(count: usize) -> Vec<Message> {
    let senders = ["Alice", "Bob", "Charlie", "Dana"];
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    (0..count)
        .map(|i| {
            let sender = senders[i % senders.len()];
            // Spread messages over time with gaps, ~40 per day
            let ts = start + Duration::minutes((i as i64) * 37);
            Message::new(sender, format!("Message number {i}"), ts)
        })
        .collect()
}

fn generate_whatsapp_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let hour = i % 24;
        let minute = i % 60;
        lines.push(format!(
            "[15.01.24, {:02}:{:02}:00] {}: Message number {}",
            hour, minute, sender, i
        ));
    }
    lines.join("\n")
}

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2090, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_time_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_series");

    for size in [1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));

        for granularity in [Granularity::Day, Granularity::Week, Granularity::Month] {
            group.bench_with_input(
                BenchmarkId::new(granularity.to_string(), size),
                &messages,
                |b, messages| {
                    b.iter(|| {
                        time_series_at(black_box(messages), granularity, None, fixed_now())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_frequency(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency");

    for size in [1_000, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("sender_frequency", size),
            &messages,
            |b, messages| {
                b.iter(|| sender_frequency(black_box(messages)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("top_senders", size),
            &messages,
            |b, messages| {
                b.iter(|| top_senders(black_box(messages), Some(10)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("hour_histogram", size),
            &messages,
            |b, messages| {
                b.iter(|| hour_histogram(black_box(messages)));
            },
        );
    }

    group.finish();
}

fn bench_whatsapp_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("whatsapp_parse");

    for size in [1_000, 10_000] {
        let content = generate_whatsapp_txt(size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            let parser = WhatsAppParser::new();
            b.iter(|| parser.parse_str(black_box(content)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_time_series,
    bench_frequency,
    bench_whatsapp_parsing
);
criterion_main!(benches);
