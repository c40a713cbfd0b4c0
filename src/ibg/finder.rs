//! 覆盖节点查找
//!
//! 给定任意目标配置 X，在图中寻找满足 `used(N) ⊆ X ⊆ config(N)` 的节点 N。
//! 在合理性前提下 N 的代价就是 X 的代价，无需再次调用代价预言。
//!
//! 查找从一个配置包含 X 的节点出发：若当前节点的已用集合是 X 的子集则返回；
//! 否则沿某条标记为 `i ∉ X` 的子边下降，下降后子配置仍然包含 X。
//! 图还不足以回答时返回 `None`，调用方应扩展图或直接调用预言。

use super::graph::IndexBenefitGraph;
use super::node::{IbgNode, NodeId};
use crate::index::Configuration;

/// 覆盖节点查找器
pub struct CoveringNodeFinder;

impl CoveringNodeFinder {
    /// 从根节点出发查找覆盖节点
    pub fn find<'g>(graph: &'g IndexBenefitGraph, target: &Configuration) -> Option<&'g IbgNode> {
        let root = graph.root();
        if !target.is_subset_of(root.configuration()) {
            return None;
        }
        Self::descend(graph, root, target)
    }

    /// 以提示节点为起点查找覆盖节点
    ///
    /// 提示节点已展开且配置包含目标配置时从提示节点出发，否则退回到 [`find`](Self::find)。
    ///
    /// 从提示节点下降可能停在另一条路径上的覆盖节点，返回的节点未必与 `find` 相同；
    /// 在合理性前提下两者代价相等。
    pub fn find_fast<'g>(
        graph: &'g IndexBenefitGraph,
        target: &Configuration,
        hint: Option<NodeId>,
    ) -> Option<&'g IbgNode> {
        match hint.and_then(|id| graph.node(id)) {
            Some(start) if start.is_expanded() && target.is_subset_of(start.configuration()) => {
                Self::descend(graph, start, target)
            }
            _ => Self::find(graph, target),
        }
    }

    /// 目标配置的代价，图无法覆盖时为 `None`
    pub fn find_cost(graph: &IndexBenefitGraph, target: &Configuration) -> Option<f64> {
        Self::find(graph, target).and_then(|node| node.cost())
    }

    /// 整个工作负载在目标配置下的总代价，任一语句无法覆盖时为 `None`
    pub fn workload_cost<'g, I>(graphs: I, target: &Configuration) -> Option<f64>
    where
        I: IntoIterator<Item = &'g IndexBenefitGraph>,
    {
        graphs
            .into_iter()
            .map(|graph| Self::find_cost(graph, target))
            .sum()
    }

    fn descend<'g>(
        graph: &'g IndexBenefitGraph,
        start: &'g IbgNode,
        target: &Configuration,
    ) -> Option<&'g IbgNode> {
        let mut node = start;
        // 每次下降配置严格变小，步数不会超过节点数
        for _ in 0..=graph.node_count() {
            if !node.is_expanded() {
                return None;
            }
            if node.used_set_is_subset_of(target) {
                return Some(node);
            }
            let edge = node
                .children()
                .iter()
                .find(|edge| !target.contains(edge.used_index))?;
            node = graph.node(edge.child)?;
        }
        None
    }
}
