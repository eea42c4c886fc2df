//! Simple decoder to inspect scanned barcode text.
//!
//! Reads one scan per line from a file (or uses built-in samples) and prints
//! what each line decodes to. `\x1d` or `<GS>` in the file stand for the
//! group separator.

use std::fs;

use gs1_barcode::model::{GROUP_SEPARATOR, MetadataValue};
use gs1_barcode::{Barcode, BarcodeProcessor, Context};

const SAMPLES: &[&str] = &[
    "]C1011234567890123110ABC123<GS>21SN42",
    "]d201034531200000111719112510ABCD1234",
    "(01)12345678901231(17)250101(10)LOT 7",
    "036000291452",
    "106141411234567897",
    "123456789012345678",
];

fn unescape(line: &str) -> String {
    line.replace("<GS>", &GROUP_SEPARATOR.to_string())
        .replace("\\x1d", &GROUP_SEPARATOR.to_string())
}

fn printable(s: &str) -> String {
    s.replace(GROUP_SEPARATOR, "<GS>")
}

fn print_barcode(barcode: &Barcode) {
    println!("  Kind: {}", barcode.kind.name());
    if let Some(symbol) = barcode.symbol {
        println!("  Symbology: {symbol}");
    }
    for attribute in &barcode.attributes {
        println!(
            "  ({}) {:<20} {}",
            attribute.code,
            attribute.value,
            attribute.label.as_deref().unwrap_or("")
        );
    }
    for (key, value) in barcode.metadata.iter() {
        match value {
            MetadataValue::Text(text) => println!("  @{key} = {}", printable(text)),
            MetadataValue::Fields(fields) => println!("  @{key} = {} fields", fields.len()),
        }
    }
}

fn main() {
    let lines: Vec<String> = match std::env::args().nth(1) {
        Some(path) => {
            println!("Reading: {path}");
            fs::read_to_string(&path)
                .expect("Failed to read file")
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(unescape)
                .collect()
        }
        None => SAMPLES.iter().map(|s| unescape(s)).collect(),
    };

    let processor = BarcodeProcessor::default();
    let ctx = Context::new();
    let label = Context::new().with_format("label");

    let mut failures = 0;
    for line in &lines {
        println!("\n=== {} ===", printable(line));
        match processor.decode(line, &ctx) {
            Ok(barcode) => {
                print_barcode(&barcode);
                let text = processor.format(&barcode, &label).expect("Failed to format");
                println!("  Label: {text}");
            }
            Err(err) => {
                failures += 1;
                println!("  Error {}: {err}", err.code().code());
            }
        }
    }

    println!("\n=== Summary ===");
    println!("Decoded: {}", lines.len() - failures);
    println!("Failed: {failures}");
}
