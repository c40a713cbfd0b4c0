//! 测试数据夹具
//!
//! - 四索引场景：A、B、C、D 对应池编号 0..=3，代价与已用集合来自固定查表
//! - 按表分组的合成优化器：每张表只选收益最高的索引，表之间代价可加

use ibg_advisor::core::OracleResult;
use ibg_advisor::index::{CandidateIndex, CandidatePool, Configuration, IndexColumn, PoolId};
use ibg_advisor::oracle::{OracleResponse, Statement, TableOracle, WhatIfOracle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config;

pub const A: PoolId = 0;
pub const B: PoolId = 1;
pub const C: PoolId = 2;
pub const D: PoolId = 3;

/// 场景语句
pub fn scenario_statement() -> Statement {
    Statement::new(1, "SELECT * FROM t WHERE a = ? AND b = ? AND c = ? AND d = ?")
}

/// 场景候选池，注册顺序决定 A..D 的池编号
pub fn scenario_pool() -> CandidatePool {
    let mut pool = CandidatePool::new();
    for name in ["a", "b", "c", "d"] {
        pool.register(CandidateIndex::new(
            name.to_uppercase(),
            "t",
            vec![IndexColumn::asc(name)],
        ));
    }
    pool
}

/// 场景代价表
pub fn scenario_oracle() -> TableOracle {
    let s = scenario_statement().id;
    TableOracle::new()
        .with_entry(s, config(&[]), 80.0, config(&[]))
        .with_entry(s, config(&[C]), 80.0, config(&[]))
        .with_entry(s, config(&[D]), 80.0, config(&[]))
        .with_entry(s, config(&[A, C]), 80.0, config(&[]))
        .with_entry(s, config(&[B, C]), 50.0, config(&[B]))
        .with_entry(s, config(&[C, D]), 65.0, config(&[C, D]))
        .with_entry(s, config(&[A, B, C]), 45.0, config(&[A, B]))
        .with_entry(s, config(&[B, C, D]), 50.0, config(&[B]))
        .with_entry(s, config(&[A, B, C, D]), 20.0, config(&[A, D]))
}

/// 场景工作负载文件
pub fn scenario_workload_json() -> String {
    let dir = env!("CARGO_MANIFEST_DIR");
    std::fs::read_to_string(format!("{}/demos/four_index_workload.json", dir))
        .expect("演示工作负载文件应该存在")
}

/// 按表分组的合成优化器
///
/// 每张表的基础代价为 1000，表内每个索引有互不相同的整数收益；
/// 计划为每张表选收益最高的已有索引。满足合理性与单调性，
/// 同表索引互相替代（交互），不同表索引互不影响。
#[derive(Debug, Clone)]
pub struct TableGroupOracle {
    groups: Vec<Vec<PoolId>>,
    benefit: Vec<f64>,
}

pub const TABLE_BASE_COST: f64 = 1000.0;

impl TableGroupOracle {
    /// `tables` 张表，每张表 `per_table` 个索引，池编号按表连续分配
    pub fn seeded(seed: u64, tables: usize, per_table: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut groups = Vec::with_capacity(tables);
        let mut benefit = Vec::with_capacity(tables * per_table);
        for _ in 0..tables {
            let values = rand::seq::index::sample(&mut rng, 50, per_table);
            let mut group = Vec::with_capacity(per_table);
            for value in values.iter() {
                group.push(benefit.len());
                benefit.push((value as f64 + 1.0) * 10.0);
            }
            groups.push(group);
        }
        Self { groups, benefit }
    }

    pub fn groups(&self) -> &[Vec<PoolId>] {
        &self.groups
    }

    pub fn index_count(&self) -> usize {
        self.benefit.len()
    }

    pub fn full_configuration(&self) -> Configuration {
        Configuration::full(self.index_count())
    }

    /// 对应的候选池，每组一张表
    pub fn pool(&self) -> CandidatePool {
        let mut pool = CandidatePool::new();
        for (table, group) in self.groups.iter().enumerate() {
            for &id in group {
                pool.register(CandidateIndex::new(
                    format!("idx_{}", id),
                    format!("t{}", table),
                    vec![IndexColumn::asc(format!("c{}", id))],
                ));
            }
        }
        pool
    }
}

impl WhatIfOracle for TableGroupOracle {
    fn price_and_used_set(
        &self,
        _statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        let mut cost = 0.0;
        let mut used = Configuration::new();
        for group in &self.groups {
            let best = group
                .iter()
                .copied()
                .filter(|&id| configuration.contains(id))
                .max_by(|&x, &y| self.benefit[x].total_cmp(&self.benefit[y]));
            match best {
                Some(id) => {
                    cost += TABLE_BASE_COST - self.benefit[id];
                    used.add(id);
                }
                None => cost += TABLE_BASE_COST,
            }
        }
        Ok(OracleResponse::new(cost, used))
    }
}
