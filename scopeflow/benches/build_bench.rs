//! Benchmarks for scope-tree construction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scopeflow::prelude::*;

fn nest(ctx: &mut BuildContext, depth: usize) -> Result<()> {
    if depth == 0 {
        ctx.add_task(Task::new("leaf"))?;
        return Ok(());
    }
    let mut scope = ctx.open(Graph::new("recurse"))?;
    scope.add_task(Task::new("step"))?;
    nest(&mut scope, depth - 1)
}

fn build_benchmark(c: &mut Criterion) {
    c.bench_function("flat_tasks_100", |b| {
        b.iter(|| {
            let mut ctx = BuildContext::new();
            ctx.begin("flat").unwrap();
            for _ in 0..100 {
                ctx.add_task(Task::new("task")).unwrap();
            }
            black_box(ctx.finish().unwrap())
        })
    });

    c.bench_function("recursive_graph_32", |b| {
        b.iter(|| {
            let mut ctx = BuildContext::new();
            ctx.begin("deep").unwrap();
            nest(&mut ctx, black_box(32)).unwrap();
            black_box(ctx.finish().unwrap())
        })
    });

    c.bench_function("seeded_loops_20", |b| {
        let config = BuildConfig::new().with_loop_code_seed(1);
        b.iter(|| {
            let mut ctx = BuildContext::with_config(config.clone());
            ctx.begin("loops").unwrap();
            for i in 0..20 {
                let items = vec![serde_json::json!({"i": i}), serde_json::json!({"i": i + 1})];
                let looped = ParallelFor::new(&mut ctx, items).unwrap();
                let mut body = ctx.open(looped).unwrap();
                body.add_task(Task::new("work")).unwrap();
            }
            black_box(ctx.finish().unwrap())
        })
    });
}

criterion_group!(benches, build_benchmark);
criterion_main!(benches);
