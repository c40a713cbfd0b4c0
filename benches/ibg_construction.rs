use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ibg_advisor::core::OracleResult;
use ibg_advisor::ibg::{CoveringNodeFinder, IbgConstructor, IndexBenefitGraph, TraversalOrder};
use ibg_advisor::index::Configuration;
use ibg_advisor::oracle::{OracleResponse, Statement, WhatIfOracle};

/// 每张表选收益最高的索引，表之间代价可加
struct PerTableOracle {
    tables: usize,
    per_table: usize,
}

impl WhatIfOracle for PerTableOracle {
    fn price_and_used_set(
        &self,
        _statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        let mut cost = 0.0;
        let mut used = Configuration::new();
        for table in 0..self.tables {
            let first = table * self.per_table;
            // 表内编号越大收益越高
            match (first..first + self.per_table).rev().find(|&id| configuration.contains(id)) {
                Some(id) => {
                    cost += 1000.0 - 10.0 * (id - first + 1) as f64;
                    used.add(id);
                }
                None => cost += 1000.0,
            }
        }
        Ok(OracleResponse::new(cost, used))
    }
}

fn build(oracle: &PerTableOracle, order: TraversalOrder) -> IndexBenefitGraph {
    let root = Configuration::full(oracle.tables * oracle.per_table);
    IbgConstructor::new(oracle, Statement::new(1, "bench"), root, order)
        .build()
        .expect("构建应该成功")
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("ibg_construction");
    for &tables in &[2usize, 4, 6] {
        let oracle = PerTableOracle { tables, per_table: 3 };
        let nodes = build(&oracle, TraversalOrder::BreadthFirst).node_count();
        group.throughput(Throughput::Elements(nodes as u64));
        for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", order), tables * 3),
                &oracle,
                |b, oracle| b.iter(|| criterion::black_box(build(oracle, order))),
            );
        }
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let oracle = PerTableOracle { tables: 6, per_table: 3 };
    let graph = build(&oracle, TraversalOrder::BreadthFirst);
    let targets: Vec<Configuration> = (0..18)
        .map(|skip| (0..18).filter(|&id| id % 3 != skip % 3 || id == skip).collect())
        .collect();

    c.bench_function("covering_node_find", |b| {
        b.iter(|| {
            for target in &targets {
                criterion::black_box(CoveringNodeFinder::find_cost(&graph, target));
            }
        })
    });
}

criterion_group!(benches, bench_construction, bench_find);
criterion_main!(benches);
