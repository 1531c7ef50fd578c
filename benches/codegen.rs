mod common;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use trifc::codegen::generators;

fn bench_codegen(c: &mut Criterion) {
    for (label, path) in common::WORKLOADS {
        let module = common::load_module(path);
        for generator in generators() {
            c.bench_function(&format!("codegen_{}_{label}", generator.name()), |b| {
                b.iter(|| {
                    let out = generator.generate(black_box(&module)).expect("generate");
                    black_box(out);
                })
            });
        }
    }
}

criterion_group!(benches, bench_codegen);
criterion_main!(benches);
