//! 索引交互表
//!
//! 保存索引对之间的交互度以及单个索引的最佳收益。
//! 表的规模在创建时固定为 `[0, index_count)`，越界访问直接报错，不会自动扩容。
//! 值为 `None` 表示尚未计算，`Some(0.0)` 表示已计算且不交互。

use super::partition::IndexPartitions;
use crate::core::error::{InteractionError, InteractionResult};
use crate::index::PoolId;
use serde::{Deserialize, Serialize};

/// 索引交互表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionBank {
    index_count: usize,
    /// 下三角存储，`(a, b)` 与 `(b, a)` 共用一个槽位
    levels: Vec<Option<f64>>,
    best_benefit: Vec<Option<f64>>,
}

impl InteractionBank {
    pub fn new(index_count: usize) -> Self {
        let slots = index_count * index_count.saturating_sub(1) / 2;
        Self {
            index_count,
            levels: vec![None; slots],
            best_benefit: vec![None; index_count],
        }
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// 写入交互度，覆盖旧值
    pub fn assign_interaction(&mut self, a: PoolId, b: PoolId, value: f64) -> InteractionResult<()> {
        Self::check_value(value)?;
        let slot = self.pair_slot(a, b)?;
        self.levels[slot] = Some(value);
        Ok(())
    }

    /// 读取交互度，参数顺序无关
    pub fn interaction_level(&self, a: PoolId, b: PoolId) -> InteractionResult<Option<f64>> {
        let slot = self.pair_slot(a, b)?;
        Ok(self.levels[slot])
    }

    /// 写入单个索引的收益，覆盖旧值
    pub fn assign_benefit(&mut self, index: PoolId, value: f64) -> InteractionResult<()> {
        Self::check_value(value)?;
        self.check_index(index)?;
        self.best_benefit[index] = Some(value);
        Ok(())
    }

    pub fn best_benefit(&self, index: PoolId) -> InteractionResult<Option<f64>> {
        self.check_index(index)?;
        Ok(self.best_benefit[index])
    }

    /// 交互度严格大于阈值的索引对，按 `(a, b)` 升序，`a < b`
    pub fn interacting_pairs(&self, threshold: f64) -> Vec<(PoolId, PoolId, f64)> {
        let mut pairs = Vec::new();
        for a in 0..self.index_count {
            for b in (a + 1)..self.index_count {
                if let Some(level) = self.levels[Self::slot(a, b)] {
                    if level > threshold {
                        pairs.push((a, b, level));
                    }
                }
            }
        }
        pairs
    }

    /// 已计算的索引对数量
    pub fn computed_pair_count(&self) -> usize {
        self.levels.iter().filter(|v| v.is_some()).count()
    }

    /// 按阈值划分稳定分区：交互度高于阈值的索引落在同一分区
    pub fn stable_partitions(&self, threshold: f64) -> IndexPartitions {
        let mut neighbors: Vec<Vec<PoolId>> = vec![Vec::new(); self.index_count];
        for (a, b, _) in self.interacting_pairs(threshold) {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        IndexPartitions::from_adjacency(&neighbors)
    }

    fn check_value(value: f64) -> InteractionResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(InteractionError::InvalidValue(value))
        }
    }

    fn check_index(&self, index: PoolId) -> InteractionResult<()> {
        if index < self.index_count {
            Ok(())
        } else {
            Err(InteractionError::IndexOutOfRange {
                index,
                count: self.index_count,
            })
        }
    }

    fn pair_slot(&self, a: PoolId, b: PoolId) -> InteractionResult<usize> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            return Err(InteractionError::SelfInteraction(a));
        }
        Ok(Self::slot(a, b))
    }

    fn slot(a: PoolId, b: PoolId) -> usize {
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        hi * (hi - 1) / 2 + lo
    }
}
