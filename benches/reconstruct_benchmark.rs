//! Benchmarks for relayout reconstruction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic pages shaped like typical office documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use relayout::{OcrLine, ReconstructOptions, TextFragment};

/// Creates a synthetic vector-text page: a heading, body lines and a small table.
fn create_vector_page(page: usize) -> Vec<TextFragment> {
    let mut fragments = vec![TextFragment::new(
        format!("Chapter {}", page + 1),
        72.0,
        760.0,
        24.0,
    )];

    let mut y = 730.0;
    for line in 0..30 {
        // Split each body line into word runs, as extractors usually do
        for (i, word) in ["Benchmark", "body", "text", "for", "relayout", "performance."]
            .iter()
            .enumerate()
        {
            fragments.push(TextFragment::new(
                *word,
                72.0 + i as f32 * 55.0,
                y - line as f32 * 14.0,
                11.0,
            ));
        }
    }

    y -= 30.0 * 14.0 + 20.0;
    for row in 0..5 {
        for col in 0..4 {
            fragments.push(TextFragment::new(
                format!("r{}c{}", row, col),
                72.0 + col as f32 * 120.0,
                y - row as f32 * 14.0,
                11.0,
            ));
        }
    }

    fragments
}

/// Creates a synthetic OCR page of clustered paragraphs.
fn create_ocr_page() -> Vec<OcrLine> {
    let mut lines = vec![OcrLine::new("SECTION HEADING", 50.0, 72.0)];
    let mut top = 110.0;
    for paragraph in 0..6 {
        for line in 0..5 {
            lines.push(OcrLine::new(
                format!("Paragraph {} line {} of recognized body text.", paragraph, line),
                top,
                top + 20.0,
            ));
            top += 22.0;
        }
        top += 30.0;
    }
    lines
}

/// Benchmark vector-text reconstruction at various sizes.
fn bench_vector_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_reconstruction");

    for page_count in [1, 10, 50].iter() {
        let pages: Vec<Vec<TextFragment>> = (0..*page_count).map(create_vector_page).collect();
        let options = ReconstructOptions::default();

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| relayout::reconstruct_from_vector_text(black_box(&pages), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark OCR reconstruction.
fn bench_ocr_reconstruction(c: &mut Criterion) {
    let pages: Vec<Vec<OcrLine>> = (0..10).map(|_| create_ocr_page()).collect();
    let options = ReconstructOptions::default();

    c.bench_function("ocr_10_pages", |b| {
        b.iter(|| relayout::reconstruct_from_ocr(black_box(&pages), &options).unwrap());
    });
}

/// Benchmark list-marker detection.
fn bench_list_markers(c: &mut Criterion) {
    let samples = ["1. Introduction", "• bullet item", "Plain body sentence.", "iv) Roman"];

    c.bench_function("list_marker_detection", |b| {
        b.iter(|| {
            for s in samples.iter() {
                black_box(relayout::parser::detect_list_marker(black_box(s)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_vector_reconstruction,
    bench_ocr_reconstruction,
    bench_list_markers,
);
criterion_main!(benches);
