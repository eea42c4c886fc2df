//! Benchmark for GS1 element-string parsing, formatting and decoding.
//!
//! Builds a deterministic batch of synthetic element strings (GTIN, dates,
//! lot, serial, weight), then times each stage and prints a JSON report.
//!
//! Usage: `bench-element-strings [COUNT] [REPORT_PATH]`

use std::fs;
use std::time::{Duration, Instant};

use gs1_barcode::codec::{format_element_string, parse_element_string};
use gs1_barcode::generate::Gs1KeyGenerator;
use gs1_barcode::{BarcodeProcessor, Context, IdentifierType, Symbology};
use serde::Serialize;

const DEFAULT_COUNT: usize = 100_000;
const ITERS: u32 = 5;

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

/// Small deterministic generator so runs are comparable.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + (self.next() % 10) as u8))
            .collect()
    }

    fn alnum(&mut self, len: usize) -> String {
        const CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ0123456789";
        (0..len)
            .map(|_| char::from(CHARS[(self.next() as usize) % CHARS.len()]))
            .collect()
    }
}

fn synthetic_fields(count: usize) -> Vec<Vec<(String, String)>> {
    let mut rng = Lcg(0x6753_3142);
    let keys = Gs1KeyGenerator;
    (0..count)
        .map(|_| {
            let gtin = keys
                .build_key(IdentifierType::Gtin, &rng.digits(7), &rng.digits(6), None)
                .expect("valid GTIN body");
            let lot_len = 1 + (rng.next() % 12) as usize;
            let serial_len = 1 + (rng.next() % 16) as usize;
            let mut fields = vec![
                ("01".to_string(), gtin),
                ("17".to_string(), format!("2{}", rng.digits(5))),
                ("10".to_string(), rng.alnum(lot_len)),
            ];
            if rng.next() % 2 == 0 {
                fields.push(("3103".to_string(), rng.digits(6)));
            }
            fields.push(("21".to_string(), rng.alnum(serial_len)));
            fields
        })
        .collect()
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Serialize)]
struct StageReport {
    stage: &'static str,
    avg_ms: f64,
    per_item_ns: f64,
    throughput_mb_s: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    count: usize,
    iterations: u32,
    total_bytes: usize,
    avg_length: f64,
    stages: Vec<StageReport>,
    sample: gs1_barcode::Barcode,
}

fn stage(name: &'static str, elapsed: Duration, count: usize, bytes: usize) -> StageReport {
    let secs = elapsed.as_secs_f64();
    println!("{name:>8}: {elapsed:?} (avg of {ITERS} iterations)");
    StageReport {
        stage: name,
        avg_ms: secs * 1_000.0,
        per_item_ns: secs * 1e9 / count as f64,
        throughput_mb_s: (bytes as f64 / 1_000_000.0) / secs,
    }
}

fn time<F: FnMut()>(mut f: F) -> Duration {
    // Warmup
    f();
    let start = Instant::now();
    for _ in 0..ITERS {
        f();
    }
    start.elapsed() / ITERS
}

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_COUNT)
        .max(1);
    let report_path = args.next();

    println!("=== GS1 Element String Benchmark ===");
    let fields = synthetic_fields(count);

    let encoded: Vec<String> = fields
        .iter()
        .map(|f| {
            format_element_string(f.iter().map(|(a, v)| (a.as_str(), v.as_str())), Symbology::Gs1_128)
                .expect("Failed to format")
        })
        .collect();
    let total_bytes: usize = encoded.iter().map(String::len).sum();
    println!("Generated {count} element strings, {total_bytes} bytes");

    let format_time = time(|| {
        for f in &fields {
            let out = format_element_string(
                f.iter().map(|(a, v)| (a.as_str(), v.as_str())),
                Symbology::Gs1_128,
            )
            .expect("Failed to format");
            std::hint::black_box(out);
        }
    });

    let parse_time = time(|| {
        for data in &encoded {
            let element = parse_element_string(data).expect("Failed to parse");
            std::hint::black_box(element);
        }
    });

    let processor = BarcodeProcessor::default();
    let ctx = Context::new();
    let decode_time = time(|| {
        for data in &encoded {
            let barcode = processor.decode(data, &ctx).expect("Failed to decode");
            std::hint::black_box(barcode);
        }
    });

    // Verify the round trip on the whole batch
    for (data, f) in encoded.iter().zip(&fields) {
        let element = parse_element_string(data).expect("Failed to parse");
        assert_eq!(element.len(), f.len());
    }

    let stages = vec![
        stage("format", format_time, count, total_bytes),
        stage("parse", parse_time, count, total_bytes),
        stage("decode", decode_time, count, total_bytes),
    ];

    let sample = processor
        .decode(&encoded[0], &ctx)
        .expect("Failed to decode sample");
    let report = Report {
        count,
        iterations: ITERS,
        total_bytes,
        avg_length: total_bytes as f64 / count as f64,
        stages,
        sample,
    };

    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize report");
    match report_path {
        Some(path) => {
            fs::write(&path, &json).expect("Failed to write report");
            println!("\nReport written to {path}");
        }
        None => println!("\n{json}"),
    }
}
