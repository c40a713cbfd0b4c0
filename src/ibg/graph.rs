//! 索引收益图
//!
//! 图拥有全部节点，节点编号即存储位置，子边通过编号引用子节点。
//! 相同配置只对应一个节点，多个父节点可以指向同一子节点。
//! 构建完成后图只读，可在多个线程间共享查询。

use super::node::{IbgNode, NodeId};
use crate::core::error::{AdvisorResult, GraphError, GraphResult};
use crate::index::{Configuration, PoolId};
use crate::oracle::StatementId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 根节点编号
pub const ROOT_ID: NodeId = 0;

/// 索引收益图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexBenefitGraph {
    statement: StatementId,
    nodes: Vec<IbgNode>,
    complete: bool,
    #[serde(skip)]
    by_config: HashMap<Configuration, NodeId>,
}

impl IndexBenefitGraph {
    /// 创建只含根节点的图
    pub(crate) fn with_root(statement: StatementId, root: IbgNode) -> Self {
        let mut by_config = HashMap::new();
        by_config.insert(root.configuration().clone(), root.id());
        Self {
            statement,
            nodes: vec![root],
            complete: false,
            by_config,
        }
    }

    /// 加入新节点，节点编号必须等于当前节点数
    pub(crate) fn push_node(&mut self, node: IbgNode) -> GraphResult<NodeId> {
        let id = node.id();
        if id != self.nodes.len() {
            return Err(GraphError::Corrupted(format!(
                "节点编号 {} 与存储位置 {} 不一致",
                id,
                self.nodes.len()
            )));
        }
        self.by_config.insert(node.configuration().clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut IbgNode> {
        self.nodes.get_mut(id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }

    pub fn statement_id(&self) -> StatementId {
        self.statement
    }

    pub fn root(&self) -> &IbgNode {
        &self.nodes[ROOT_ID]
    }

    pub fn node(&self, id: NodeId) -> Option<&IbgNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[IbgNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn expanded_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_expanded()).count()
    }

    /// 构建是否已经完成（工作队列已清空）
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// 精确查找某个配置对应的节点
    pub fn node_for(&self, configuration: &Configuration) -> Option<&IbgNode> {
        self.by_config
            .get(configuration)
            .and_then(|&id| self.nodes.get(id))
    }

    /// 图中所有节点已用集合的并集
    pub fn used_indexes(&self) -> Configuration {
        let mut used = Configuration::new();
        for node in &self.nodes {
            node.add_used_indexes(&mut used);
        }
        used
    }

    /// 某个索引是否被图中任何计划用到
    pub fn is_used(&self, id: PoolId) -> bool {
        self.nodes.iter().any(|n| n.used_set_contains(id))
    }

    /// 序列化为 JSON 快照
    pub fn to_json(&self) -> AdvisorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从 JSON 快照恢复，并校验节点编号与子边
    pub fn from_json(json: &str) -> AdvisorResult<Self> {
        let mut graph: IndexBenefitGraph = serde_json::from_str(json)?;
        graph.rebuild_lookup()?;
        Ok(graph)
    }

    fn rebuild_lookup(&mut self) -> GraphResult<()> {
        if self.nodes.is_empty() {
            return Err(GraphError::Corrupted("快照中没有根节点".to_string()));
        }
        self.by_config.clear();
        for (pos, node) in self.nodes.iter().enumerate() {
            if node.id() != pos {
                return Err(GraphError::Corrupted(format!(
                    "节点编号 {} 与存储位置 {} 不一致",
                    node.id(),
                    pos
                )));
            }
            if node.is_expanded() != node.cost().is_some() {
                return Err(GraphError::Corrupted(format!(
                    "节点 {} 的展开标记与代价不一致",
                    pos
                )));
            }
            for edge in node.children() {
                let child = self
                    .nodes
                    .get(edge.child)
                    .ok_or(GraphError::NodeNotFound(edge.child))?;
                if !node.configuration().contains(edge.used_index)
                    || *child.configuration() != node.configuration().without(edge.used_index)
                {
                    return Err(GraphError::Corrupted(format!(
                        "节点 {} 经索引 {} 到节点 {} 的子边不一致",
                        pos, edge.used_index, edge.child
                    )));
                }
            }
            self.by_config.insert(node.configuration().clone(), pos);
        }
        Ok(())
    }
}

impl fmt::Display for IndexBenefitGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "IBG(statement={}, nodes={}, complete={})",
            self.statement,
            self.nodes.len(),
            self.complete
        )?;
        for node in &self.nodes {
            let cost = match node.cost() {
                Some(c) => format!("{:.2}", c),
                None => "?".to_string(),
            };
            let children: Vec<String> = node
                .children()
                .iter()
                .map(|e| format!("-{}->{}", e.used_index, e.child))
                .collect();
            writeln!(
                f,
                "  [{}] {} cost={} used={} {}",
                node.id(),
                node.configuration(),
                cost,
                node.used_set(),
                children.join(" ")
            )?;
        }
        Ok(())
    }
}
