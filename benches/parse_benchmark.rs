use criterion::{Criterion, criterion_group, criterion_main};
use hdrwiz::annotation::split_informations;
use hdrwiz::comment::definition_blocks;
use hdrwiz::literal::parse_literal;
use hdrwiz::{split_define, substitute};
use std::hint::black_box;

const MOCK_HEADER: &str = r#"/**
 * Baud rate for the serial port.
 * $WIZARD = {"type": "int", "min": 300, "max": 115200, "long": True}
 */
#define SER_BAUD_RATE 19200L

/// Enable RTS/CTS handshake.
#define SER_HANDSHAKE 0

#define SER_TX_BUFSIZE 32 ///< Transmit buffer size.
#define SER_RX_BUFSIZE 64 ///< Receive buffer size.

/**
 * Parity mode.
 * $WIZARD = {"type": "enum", "value_list": "ser_parity"}
 */
#define SER_PARITY none
"#;

const MOCK_PAYLOAD: &str =
    r#"{"type": "int", "min": 300, "max": 115200, "long": True, "tags": ["serial", "rate"]}"#;

fn bench_definition_blocks(c: &mut Criterion) {
    c.bench_function("definition_blocks", |b| {
        b.iter(|| definition_blocks(black_box(MOCK_HEADER)))
    });
}

fn bench_split_informations(c: &mut Criterion) {
    let comment = r#"Baud rate. $WIZARD = {"type": "int", "min": 300, "max": 115200}"#;
    c.bench_function("split_informations", |b| {
        b.iter(|| split_informations(black_box(comment)).unwrap())
    });
}

fn bench_parse_literal(c: &mut Criterion) {
    c.bench_function("parse_literal", |b| {
        b.iter(|| parse_literal(black_box(MOCK_PAYLOAD)).unwrap())
    });
}

fn bench_split_define(c: &mut Criterion) {
    c.bench_function("split_define", |b| {
        b.iter(|| split_define(black_box("SER_BAUD_RATE 19200L")).unwrap())
    });
}

fn bench_substitute(c: &mut Criterion) {
    c.bench_function("substitute", |b| {
        b.iter(|| substitute(black_box(MOCK_HEADER), black_box("SER_BAUD_RATE"), "115200L"))
    });
}

criterion_group!(
    benches,
    bench_definition_blocks,
    bench_split_informations,
    bench_parse_literal,
    bench_split_define,
    bench_substitute
);
criterion_main!(benches);
