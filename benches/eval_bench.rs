use criterion::{criterion_group, criterion_main, Criterion, black_box};
use cozy_chess::Board;
use trivialnet::encoder::encode_position;
use trivialnet::eval::evaluate;
use trivialnet::InputFormat;

fn bench_eval(c: &mut Criterion) {
    let planes = encode_position(&Board::default(), InputFormat::Classical112).unwrap();
    c.bench_function("evaluate_startpos", |ben| {
        ben.iter(|| {
            let v = evaluate(black_box(&planes));
            black_box(v)
        })
    });
    c.bench_function("encode_startpos", |ben| {
        let b = Board::default();
        ben.iter(|| black_box(encode_position(black_box(&b), InputFormat::Classical112).unwrap()))
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
