// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quarry_bnb::bnb::BnbSolver;
use quarry_bnb::monitor::no_op::NoOperationMonitor;
use quarry_model::blueprint::Blueprint;
use quarry_model::index::ResourceIndex;
use std::hint::black_box;

fn ri(i: usize) -> ResourceIndex {
    ResourceIndex::new(i)
}

fn reference_blueprints() -> Vec<Blueprint<u32, 4>> {
    let a = Blueprint::builder(1)
        .producer_cost(ri(0), [4, 0, 0, 0].into())
        .producer_cost(ri(1), [2, 0, 0, 0].into())
        .producer_cost(ri(2), [3, 14, 0, 0].into())
        .producer_cost(ri(3), [2, 0, 7, 0].into())
        .build()
        .unwrap();
    let b = Blueprint::builder(2)
        .producer_cost(ri(0), [2, 0, 0, 0].into())
        .producer_cost(ri(1), [3, 0, 0, 0].into())
        .producer_cost(ri(2), [3, 8, 0, 0].into())
        .producer_cost(ri(3), [3, 0, 12, 0].into())
        .build()
        .unwrap();
    vec![a, b]
}

fn bench_reference_blueprints(c: &mut Criterion) {
    let blueprints = reference_blueprints();
    let mut group = c.benchmark_group("engine_benchmark");

    for blueprint in &blueprints {
        for horizon in [18_u32, 24] {
            let label = format!("blueprint-{}", blueprint.id());
            let mut solver = BnbSolver::with_capacity(1 << 16);

            group.bench_with_input(
                BenchmarkId::new(&label, horizon),
                &horizon,
                |bench, &horizon| {
                    bench.iter(|| {
                        let outcome = solver.solve(
                            black_box(blueprint),
                            black_box(horizon),
                            NoOperationMonitor::new(),
                        );
                        black_box(outcome.best_score())
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_reference_blueprints);
criterion_main!(benches);
