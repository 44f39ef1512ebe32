use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mbw_viz::experiments::{GridRecord, ThreadsPerBlockRecord};
use mbw_viz::figures::{render_heatmap, render_line_chart, render_surface};
use mbw_viz::{argmax_bandwidth, descriptor, pivot, ExperimentId, FigureConfig, ResultTable};

fn grid_table() -> ResultTable<GridRecord> {
    let mut rows = Vec::new();
    for t in 0..6u32 {
        for b in 0..10u32 {
            rows.push(GridRecord {
                threads_per_block: 32 << t,
                blocks_per_grid: 1 << b,
                bandwidth_gbps: 50.0 + f64::from(t * 13 + b * 7),
            });
        }
    }
    ResultTable::new("bench_grid", rows).expect("grid table")
}

fn threads_table() -> ResultTable<ThreadsPerBlockRecord> {
    let rows = (0..6u32)
        .map(|t| ThreadsPerBlockRecord {
            threads_per_block: 32 << t,
            bandwidth_gbps: 40.0 + f64::from(t * 17 % 50),
        })
        .collect();
    ResultTable::new("bench_threads", rows).expect("threads table")
}

fn bench_grid(c: &mut Criterion) {
    let table = grid_table();
    let exp3 = descriptor(ExperimentId::GridOptimization);
    let config = FigureConfig::default();
    c.bench_function("pivot_heatmap_surface", |b| {
        b.iter(|| {
            let grid = pivot(
                &table,
                |row| f64::from(row.threads_per_block),
                |row| f64::from(row.blocks_per_grid),
                |row| row.bandwidth_gbps,
            )
            .expect("grid");
            let heatmap = render_heatmap(&grid, Some((0, 0)), exp3, &config).expect("heatmap");
            let surface = render_surface(&grid, exp3, &config).expect("surface");
            black_box((heatmap.len(), surface.len()))
        })
    });
}

fn bench_line(c: &mut Criterion) {
    let table = threads_table();
    let exp1 = descriptor(ExperimentId::ThreadsPerBlock);
    let config = FigureConfig::default();
    c.bench_function("line_chart", |b| {
        b.iter(|| {
            let optimum = argmax_bandwidth(&table);
            let svg = render_line_chart(&table, &optimum, exp1, &config).expect("line");
            black_box(svg.len())
        })
    });
}

criterion_group!(benches, bench_grid, bench_line);
criterion_main!(benches);
