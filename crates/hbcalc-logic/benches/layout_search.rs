use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hbcalc_logic::config::CalcConfig;
use hbcalc_logic::layout::{find_valid_arrays, LayoutParams};

fn bench_layout_search(c: &mut Criterion) {
    let config = CalcConfig::default();
    let mut group = c.benchmark_group("find_valid_arrays");
    for num_fixtures in [9u32, 60, 250] {
        let params = LayoutParams {
            num_fixtures,
            aspect_ratio: 2.0,
            room_length: 120.0,
            room_width: 60.0,
            mounting_height: 9.0,
            shr_max: 1.875,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(num_fixtures),
            &params,
            |b, params| b.iter(|| find_valid_arrays(black_box(params), &config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout_search);
criterion_main!(benches);
