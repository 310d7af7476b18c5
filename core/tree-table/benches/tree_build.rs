//! FILENAME: core/tree-table/benches/tree_build.rs
//! Render and toggle throughput for a three-level tree table.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use tree_table::{ColumnSpec, RowRecord, TreeTable, TreeTableOptions};

const REGIONS: usize = 8;
const PRODUCTS: usize = 32;
const CHANNELS: usize = 3;

/// Rows ordered by region, product and channel, so every node's rows are
/// contiguous. The first rows of each product have no channel.
fn build_rows(rows: usize) -> Vec<RowRecord> {
    let per_product = (rows / (REGIONS * PRODUCTS)).max(1);
    (0..rows)
        .map(|i| {
            let product = (i / per_product).min(REGIONS * PRODUCTS - 1);
            let offset = i - product * per_product;
            let channel = if offset < per_product / 5 {
                Value::Null
            } else {
                json!(format!("channel-{}", (offset * CHANNELS / per_product).min(CHANNELS - 1)))
            };
            let row = json!({
                "id": i,
                "region": format!("region-{}", product / PRODUCTS),
                "product": format!("product-{}", product % PRODUCTS),
                "channel": channel,
                "qty": i % 97,
                "note": format!("note {}", i),
            });
            match row {
                Value::Object(map) => map,
                _ => unreachable!(),
            }
        })
        .collect()
}

fn options(rows: usize) -> TreeTableOptions {
    TreeTableOptions::new(
        "id",
        vec![
            ColumnSpec::grouping("region"),
            ColumnSpec::grouping("product"),
            ColumnSpec::grouping("channel"),
            ColumnSpec::new("qty"),
            ColumnSpec::new("note"),
        ],
    )
    .with_data(build_rows(rows))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for rows in [1_000usize, 10_000, 50_000] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let mut table = TreeTable::new(options(rows)).unwrap();
            b.iter(|| {
                let view = table.render().unwrap();
                black_box(view.cells.len());
            });
        });
    }
    group.finish();
}

fn bench_toggle_roots(c: &mut Criterion) {
    let mut table = TreeTable::new(options(10_000)).unwrap();
    table.render().unwrap();
    let roots: Vec<_> = table.forest().unwrap().roots().collect();

    c.bench_function("toggle_all_roots_10k", |b| {
        b.iter(|| {
            for &root in &roots {
                black_box(table.toggle(root));
            }
        });
    });
}

criterion_group!(benches, bench_render, bench_toggle_roots);
criterion_main!(benches);
