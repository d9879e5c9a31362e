//! Benchmarks for output rendering and context threading.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fablecraft::context::{ContextPolicy, RunContext};
use fablecraft::core::StageOutput;
use fablecraft::render::format_output;

fn outline(sections: usize) -> String {
    (1..=sections)
        .map(|i| {
            format!(
                "## Scene {i}\n\n**Setting:** The ember isles.\n\n- Goal: reach the tower\n- Conflict: the tide turns\n\n| Beat | Effect |\n|---|---|\n| {i} | rising |\n"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_benchmark(c: &mut Criterion) {
    let text = outline(200);
    c.bench_function("format_output_200_scenes", |b| {
        b.iter(|| format_output(black_box(&text)));
    });
}

fn context_benchmark(c: &mut Criterion) {
    let mut ctx = RunContext::new("A girl finds a dragon egg");
    for i in 1..=6 {
        ctx.record(StageOutput::ok(i, format!("stage{i}"), outline(30)));
    }

    c.bench_function("render_full_transcript", |b| {
        b.iter(|| black_box(&ctx).render_for(ContextPolicy::FullTranscript));
    });
    c.bench_function("render_last_output", |b| {
        b.iter(|| black_box(&ctx).render_for(ContextPolicy::LastOutput));
    });
}

criterion_group!(benches, render_benchmark, context_benchmark);
criterion_main!(benches);
