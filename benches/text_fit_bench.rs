// Benchmarks for binary-search text fitting
use countdown_widget::services::text_fit::{fit_text, FitElement, FitOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Approximates a proportional font: average glyph width scales with size.
struct GlyphRun {
    glyphs: usize,
}

impl FitElement for GlyphRun {
    fn measured_width(&mut self, font_size_px: u32) -> f32 {
        self.glyphs as f32 * font_size_px as f32 * 0.55
    }

    fn apply_font_size(&mut self, _font_size_px: u32) {}
}

fn bench_fit_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_text");

    for max_size in [200u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(max_size), &max_size, |b, &max_size| {
            let options = FitOptions::default().with_range(1, max_size);
            b.iter(|| {
                let mut elements = [GlyphRun { glyphs: 12 }, GlyphRun { glyphs: 24 }];
                fit_text(black_box(1280.0), &mut elements, &options)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit_text);
criterion_main!(benches);
