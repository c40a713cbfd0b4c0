//! 稳定分区
//!
//! 把交互图的连通分量作为索引分区。不同分区之间的索引互不交互，
//! 推荐层可以分别在每个分区内搜索，状态数从 2^n 降到 Σ 2^|分区|。

use crate::index::PoolId;
use serde::{Deserialize, Serialize};

/// 索引分区
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPartitions {
    /// 每个分区内升序，分区按最小成员排序
    subsets: Vec<Vec<PoolId>>,
    /// 索引到分区下标
    owner: Vec<usize>,
}

impl IndexPartitions {
    /// 由邻接表求连通分量，`neighbors.len()` 即索引数量
    pub fn from_adjacency(neighbors: &[Vec<PoolId>]) -> Self {
        let mut visited = vec![false; neighbors.len()];
        let mut owner = vec![0; neighbors.len()];
        let mut subsets = Vec::new();

        for start in 0..neighbors.len() {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            Self::collect_component(neighbors, start, &mut visited, &mut component);
            component.sort_unstable();
            for &member in &component {
                owner[member] = subsets.len();
            }
            subsets.push(component);
        }

        Self { subsets, owner }
    }

    fn collect_component(
        neighbors: &[Vec<PoolId>],
        start: PoolId,
        visited: &mut [bool],
        component: &mut Vec<PoolId>,
    ) {
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(current) = stack.pop() {
            component.push(current);
            for &next in &neighbors[current] {
                if next < visited.len() && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }

    pub fn subsets(&self) -> &[Vec<PoolId>] {
        &self.subsets
    }

    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    /// 索引所在的分区
    pub fn subset_of(&self, index: PoolId) -> Option<&[PoolId]> {
        self.owner
            .get(index)
            .and_then(|&pos| self.subsets.get(pos))
            .map(Vec::as_slice)
    }

    /// 两个索引是否在同一分区
    pub fn same_subset(&self, a: PoolId, b: PoolId) -> bool {
        match (self.owner.get(a), self.owner.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn largest_subset(&self) -> Option<&[PoolId]> {
        self.subsets
            .iter()
            .max_by_key(|s| s.len())
            .map(Vec::as_slice)
    }

    /// 分区搜索的状态总数 Σ 2^|分区|，溢出时饱和
    pub fn state_count(&self) -> u64 {
        self.subsets.iter().fold(0u64, |acc, subset| {
            let states = if subset.len() >= 64 {
                u64::MAX
            } else {
                1u64 << subset.len()
            };
            acc.saturating_add(states)
        })
    }
}
