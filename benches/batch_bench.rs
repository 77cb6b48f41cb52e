use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};
use trivialnet::encoder::encode_position;
use trivialnet::positions::random_positions;
use trivialnet::{InputFormat, NetworkFactory, OptionsDict};

fn bench_batch(c: &mut Criterion) {
    let net = NetworkFactory::global().create("trivial", None, &OptionsDict::new()).unwrap();
    let inputs: Vec<_> = random_positions(256, 60, 17)
        .iter()
        .map(|b| encode_position(b, InputFormat::Classical112).unwrap())
        .collect();
    let mut group = c.benchmark_group("trivial_batch");
    for size in [1usize, 16, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |ben, &size| {
            ben.iter(|| {
                let mut comp = net.new_computation();
                for p in &inputs[..size] { comp.add_input(p.clone()); }
                comp.compute_blocking().unwrap();
                black_box(comp.value(size - 1))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);
