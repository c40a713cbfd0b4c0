//! 索引收益图节点
//!
//! 节点记录一个配置、该配置下的代价（首次定价后才有值）以及子边列表。
//! 每条子边记录从父配置中移除的那个索引；父节点全部子边的索引构成它的
//! 已用集合。

use crate::core::error::{GraphError, GraphResult};
use crate::index::{Configuration, PoolId};
use serde::{Deserialize, Serialize};

/// 节点编号，同时是节点在图存储中的位置
pub type NodeId = usize;

/// 子边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEdge {
    /// 子节点
    pub child: NodeId,
    /// 从父配置中移除的索引
    pub used_index: PoolId,
}

impl ChildEdge {
    pub fn new(child: NodeId, used_index: PoolId) -> Self {
        Self { child, used_index }
    }
}

/// 索引收益图节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbgNode {
    id: NodeId,
    configuration: Configuration,
    cost: Option<f64>,
    expanded: bool,
    children: Vec<ChildEdge>,
}

impl IbgNode {
    /// 创建待展开的前沿节点
    pub fn new(configuration: Configuration, id: NodeId) -> Self {
        Self {
            id,
            configuration,
            cost: None,
            expanded: false,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// 节点代价，未定价时为 `None`
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn children(&self) -> &[ChildEdge] {
        &self.children
    }

    /// 为节点定价，只能赋值一次
    pub fn set_cost(&mut self, value: f64) -> GraphResult<()> {
        if self.cost.is_some() {
            return Err(GraphError::CostAlreadyAssigned(self.id));
        }
        self.cost = Some(value);
        Ok(())
    }

    /// 展开节点：定价、挂接子边并标记为已展开
    ///
    /// 这是节点从前沿变为已解析状态的唯一入口；重复展开属于编程错误
    pub fn expand(&mut self, cost: f64, children: Vec<ChildEdge>) -> GraphResult<()> {
        if self.expanded {
            return Err(GraphError::AlreadyExpanded(self.id));
        }
        self.set_cost(cost)?;
        self.children = children;
        self.expanded = true;
        Ok(())
    }

    /// 把已用集合并入调用方提供的配置
    pub fn add_used_indexes(&self, into: &mut Configuration) {
        for edge in &self.children {
            into.add(edge.used_index);
        }
    }

    /// 从调用方提供的配置中移除已用集合
    pub fn clear_used_indexes(&self, from: &mut Configuration) {
        for edge in &self.children {
            from.remove(edge.used_index);
        }
    }

    pub fn used_set_is_subset_of(&self, config: &Configuration) -> bool {
        self.children.iter().all(|e| config.contains(e.used_index))
    }

    pub fn used_set_contains(&self, id: PoolId) -> bool {
        self.children.iter().any(|e| e.used_index == id)
    }

    /// 已用集合（新副本）
    pub fn used_set(&self) -> Configuration {
        let mut used = Configuration::new();
        self.add_used_indexes(&mut used);
        used
    }

    /// 移除 `used_index` 后到达的子节点
    pub fn child_for(&self, used_index: PoolId) -> Option<NodeId> {
        self.children
            .iter()
            .find(|e| e.used_index == used_index)
            .map(|e| e.child)
    }
}
