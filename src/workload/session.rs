//! 调优会话
//!
//! 会话持有候选索引池、图缓存和构建配置。每条语句以当前池中全部候选索引为根
//! 构建一张图；不同语句之间没有共享的可变状态，可以并行构建。
//! 候选池增加新索引后旧图的根配置不再完整，缓存随之失效。

use super::cache::GraphCache;
use crate::config::IbgConfig;
use crate::core::error::AdvisorResult;
use crate::ibg::{CoveringNodeFinder, IbgAnalyzer, IbgConstructor, IndexBenefitGraph};
use crate::index::{CandidateIndex, Configuration, PoolId, SharedCandidatePool};
use crate::interaction::{InteractionBank, InteractionLogger};
use crate::oracle::{Statement, StatementId, WhatIfOracle};
use rayon::prelude::*;
use std::sync::Arc;

/// 调优会话
#[derive(Debug)]
pub struct TuningSession {
    pool: SharedCandidatePool,
    cache: GraphCache,
    config: IbgConfig,
}

impl TuningSession {
    pub fn new(pool: SharedCandidatePool, config: IbgConfig) -> Self {
        Self {
            pool,
            cache: GraphCache::new(),
            config,
        }
    }

    pub fn pool(&self) -> &SharedCandidatePool {
        &self.pool
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    pub fn config(&self) -> &IbgConfig {
        &self.config
    }

    /// 注册候选索引；池增长时清空图缓存
    pub fn register_candidate(&self, index: CandidateIndex) -> PoolId {
        let (id, grew) = {
            let mut pool = self.pool.lock();
            let before = pool.total_count();
            let id = pool.register(index);
            (id, pool.total_count() > before)
        };
        if grew && !self.cache.is_empty() {
            log::info!("候选池新增索引 {}，清空 {} 张缓存的图", id, self.cache.len());
            self.cache.clear();
        }
        id
    }

    /// 为语句构建索引收益图，已缓存时直接返回
    pub fn build_graph<O: WhatIfOracle + ?Sized>(
        &self,
        oracle: &O,
        statement: &Statement,
    ) -> AdvisorResult<Arc<IndexBenefitGraph>> {
        if let Some(graph) = self.cache.get(statement.id) {
            return Ok(graph);
        }

        let mut root = self.pool.lock().full_configuration();
        loop {
            let graph = IbgConstructor::new(oracle, statement.clone(), root, self.config.traversal)
                .build_with_budget(self.config.budget())?;
            if !graph.is_complete() {
                log::info!(
                    "语句 {} 的图未完整构建（已展开 {} / {} 个节点）",
                    statement.id,
                    graph.expanded_count(),
                    graph.node_count()
                );
            }

            // 持有池锁比较根配置并写入缓存，避免与 register_candidate 的清空交错
            let pool = self.pool.lock();
            let full = pool.full_configuration();
            if *graph.root().configuration() == full {
                let graph = Arc::new(graph);
                self.cache.insert(Arc::clone(&graph));
                return Ok(graph);
            }
            log::info!(
                "构建语句 {} 期间候选池增长到 {} 个索引，重新构建",
                statement.id,
                pool.total_count()
            );
            root = full;
        }
    }

    /// 检查配置中的池编号都已注册
    fn check_configuration(&self, configuration: &Configuration) -> AdvisorResult<()> {
        match configuration.max_id() {
            Some(id) => Ok(self.pool.lock().check_id(id)?),
            None => Ok(()),
        }
    }

    /// 为整个工作负载构建图，返回顺序与输入一致
    ///
    /// 任一语句的预言调用失败时返回该错误，已完成的图保留在缓存中
    pub fn build_all<O: WhatIfOracle + Sync + ?Sized>(
        &self,
        oracle: &O,
        statements: &[Statement],
    ) -> AdvisorResult<Vec<Arc<IndexBenefitGraph>>> {
        if self.config.parallel_build {
            statements
                .par_iter()
                .map(|statement| self.build_graph(oracle, statement))
                .collect()
        } else {
            statements
                .iter()
                .map(|statement| self.build_graph(oracle, statement))
                .collect()
        }
    }

    pub fn graph(&self, statement: StatementId) -> Option<Arc<IndexBenefitGraph>> {
        self.cache.get(statement)
    }

    /// 已缓存语句在目标配置下的总代价，任一语句无法覆盖时为 `None`
    ///
    /// 配置含有未注册的池编号时返回 [`PoolError::UnknownPoolId`](crate::core::error::PoolError)
    pub fn workload_cost(&self, configuration: &Configuration) -> AdvisorResult<Option<f64>> {
        self.check_configuration(configuration)?;
        let graphs = self.cache.graphs();
        Ok(CoveringNodeFinder::workload_cost(
            graphs.iter().map(Arc::as_ref),
            configuration,
        ))
    }

    /// 在全部已缓存的图上做交互分析
    pub fn analyze_interactions(&self) -> AdvisorResult<InteractionBank> {
        let index_count = self.pool.lock().total_count();
        let mut logger = InteractionLogger::new(index_count);
        for graph in self.cache.graphs() {
            IbgAnalyzer::analyze(&graph, &mut logger)?;
        }
        Ok(logger.finish())
    }
}
