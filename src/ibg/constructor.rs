//! 索引收益图构建器
//!
//! 以候选配置 C 为根，按工作队列惰性展开：
//! 1. 取出节点 N，已展开则跳过
//! 2. 调用代价预言得到 `(cost, used)`
//! 3. 对每个 `i ∈ used` 生成子配置 `N \ {i}`，复用或新建子节点并入队
//! 4. 一次性挂接子边并标记 N 为已展开
//!
//! 只有计划实际用到的索引才会分叉，因此预言调用次数通常远小于 2^|C|。
//! 每一步子配置严格变小，构建必然终止。

use super::graph::{IndexBenefitGraph, ROOT_ID};
use super::node::{ChildEdge, IbgNode, NodeId};
use crate::core::error::{AdvisorResult, OracleError};
use crate::index::Configuration;
use crate::oracle::{Statement, WhatIfOracle};
use crate::utils::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// 工作队列遍历顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// 先进先出
    #[default]
    BreadthFirst,
    /// 后进先出
    DepthFirst,
}

/// 构建预算，超出后停止并保留一致的部分图
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructionBudget {
    pub max_oracle_calls: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl ConstructionBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_oracle_calls(mut self, calls: usize) -> Self {
        self.max_oracle_calls = Some(calls);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// 构建统计
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildStats {
    /// 实际发生的预言调用次数
    pub oracle_calls: usize,
    /// 新建的节点数（含根节点）
    pub nodes_created: usize,
    /// 子配置命中已有节点的次数
    pub nodes_reused: usize,
    pub elapsed: Duration,
}

/// 索引收益图构建器
pub struct IbgConstructor<'a, O: WhatIfOracle + ?Sized> {
    oracle: &'a O,
    statement: Statement,
    graph: IndexBenefitGraph,
    queue: VecDeque<NodeId>,
    order: TraversalOrder,
    ids: IdGenerator,
    stats: BuildStats,
}

impl<'a, O: WhatIfOracle + ?Sized> IbgConstructor<'a, O> {
    /// 以 `root` 为根配置创建构建器
    pub fn new(oracle: &'a O, statement: Statement, root: Configuration, order: TraversalOrder) -> Self {
        let mut ids = IdGenerator::default();
        let root_node = IbgNode::new(root, ids.next_id());
        let graph = IndexBenefitGraph::with_root(statement.id, root_node);
        let mut queue = VecDeque::new();
        queue.push_back(ROOT_ID);
        Self {
            oracle,
            statement,
            graph,
            queue,
            order,
            ids,
            stats: BuildStats {
                nodes_created: 1,
                ..BuildStats::default()
            },
        }
    }

    /// 正在构建的图，构建中途也可以查询
    pub fn graph(&self) -> &IndexBenefitGraph {
        &self.graph
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// 队列中等待展开的节点数
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self.order {
            TraversalOrder::BreadthFirst => self.queue.pop_front(),
            TraversalOrder::DepthFirst => self.queue.pop_back(),
        }
    }

    /// 展开下一个节点，返回队列中是否还有待处理的节点
    ///
    /// 预言失败时直接返回错误，当前节点保持未展开
    pub fn expand_next(&mut self) -> AdvisorResult<bool> {
        let started = Instant::now();
        let result = self.expand_one();
        self.stats.elapsed += started.elapsed();
        let more = result?;
        if !more {
            self.graph.mark_complete();
        }
        Ok(more)
    }

    fn expand_one(&mut self) -> AdvisorResult<bool> {
        let Some(node_id) = self.pop() else {
            return Ok(false);
        };

        let config = {
            let node = self.graph.node_mut(node_id)?;
            if node.is_expanded() {
                return Ok(!self.queue.is_empty());
            }
            node.configuration().clone()
        };

        let response = self.oracle.price_and_used_set(&self.statement, &config);
        self.stats.oracle_calls += 1;
        let response = response?;
        if !response.cost.is_finite() || response.cost < 0.0 {
            return Err(OracleError::InvalidResponse(format!(
                "语句 {} 在配置 {} 下的代价为 {}",
                self.statement.id, config, response.cost
            ))
            .into());
        }

        let mut used = response.used;
        if !used.is_subset_of(&config) {
            log::warn!(
                "语句 {} 的已用集合 {} 超出配置 {}，已截断",
                self.statement.id,
                used,
                config
            );
            used = used.intersection(&config);
        }

        let mut children = Vec::with_capacity(used.len());
        for index in used.iter() {
            let child_config = config.without(index);
            let child_id = match self.graph.node_for(&child_config) {
                Some(existing) => {
                    self.stats.nodes_reused += 1;
                    existing.id()
                }
                None => {
                    let id = self
                        .graph
                        .push_node(IbgNode::new(child_config, self.ids.next_id()))?;
                    self.stats.nodes_created += 1;
                    id
                }
            };
            children.push(ChildEdge::new(child_id, index));
            if !self.graph.node_mut(child_id)?.is_expanded() {
                self.queue.push_back(child_id);
            }
        }

        log::trace!(
            "展开节点 {}: 配置 {} 代价 {:.2} 已用 {}",
            node_id,
            config,
            response.cost,
            used
        );
        self.graph.node_mut(node_id)?.expand(response.cost, children)?;
        Ok(!self.queue.is_empty())
    }

    /// 构建到完成
    pub fn build(self) -> AdvisorResult<IndexBenefitGraph> {
        self.build_with_budget(ConstructionBudget::unlimited())
    }

    /// 在预算内构建，超出预算时返回未完成的部分图
    pub fn build_with_budget(mut self, budget: ConstructionBudget) -> AdvisorResult<IndexBenefitGraph> {
        log::info!(
            "开始构建语句 {} 的索引收益图，根配置大小 {}",
            self.statement.id,
            self.graph.root().configuration().len()
        );
        let deadline = budget.time_limit.map(|limit| Instant::now() + limit);

        loop {
            if budget
                .max_oracle_calls
                .is_some_and(|max| self.stats.oracle_calls >= max)
            {
                log::info!(
                    "语句 {} 达到预言调用上限 {}，剩余 {} 个待展开节点",
                    self.statement.id,
                    self.stats.oracle_calls,
                    self.queue.len()
                );
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                log::info!(
                    "语句 {} 构建超时，剩余 {} 个待展开节点",
                    self.statement.id,
                    self.queue.len()
                );
                break;
            }
            if !self.expand_next()? {
                break;
            }
        }

        log::info!(
            "语句 {} 的索引收益图构建结束: 预言调用 {} 次, 节点 {} 个 (复用 {} 次), 完成={}",
            self.statement.id,
            self.stats.oracle_calls,
            self.graph.node_count(),
            self.stats.nodes_reused,
            self.graph.is_complete()
        );
        Ok(self.graph)
    }
}
