use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use libweb::format::{base64_to_url, format_buffer, format_header, format_tail};
use libweb::token::Tokenizer;

fn bench_format_page(c: &mut Criterion) {
    c.bench_function("format_page", |b| {
        b.iter(|| {
            let mut buffer = [0u8; 1500];
            let mut pos = format_header(&mut buffer, black_box("Device Status"));
            pos = format_buffer(
                &mut buffer,
                pos,
                format_args!("<H3 align=\"center\"> uptime {}s </H3>", black_box(4711)),
            );
            black_box(format_tail(&mut buffer, pos))
        })
    });
}

fn bench_base64_to_url(c: &mut Criterion) {
    c.bench_function("base64_to_url", |b| {
        b.iter(|| {
            let mut buffer = [0u8; 128];
            black_box(base64_to_url(
                &mut buffer,
                0,
                black_box("dGhlIHF1aWNrIGJyb3duIGZveA=="),
            ))
        })
    });
}

fn bench_tokenize_urn(c: &mut Criterion) {
    c.bench_function("tokenize_urn", |b| {
        b.iter(|| {
            let tokens = Tokenizer::new(black_box("urn:schemas-upnp-org:device:Thermostat:1"), ':');
            tokens.fold(0usize, |acc, token| acc + token.len())
        })
    });
}

criterion_group!(
    benches,
    bench_format_page,
    bench_base64_to_url,
    bench_tokenize_urn
);
criterion_main!(benches);
