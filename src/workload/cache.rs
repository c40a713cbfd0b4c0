//! 按语句缓存的索引收益图
//!
//! 每条语句只构建一次图，构建完成后只读共享。

use crate::ibg::IndexBenefitGraph;
use crate::oracle::StatementId;
use dashmap::DashMap;
use std::sync::Arc;

/// 语句编号到索引收益图的并发缓存
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    graphs: Arc<DashMap<StatementId, Arc<IndexBenefitGraph>>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, statement: StatementId) -> Option<Arc<IndexBenefitGraph>> {
        self.graphs.get(&statement).map(|entry| Arc::clone(entry.value()))
    }

    /// 放入缓存，返回被替换的旧图
    pub fn insert(&self, graph: Arc<IndexBenefitGraph>) -> Option<Arc<IndexBenefitGraph>> {
        self.graphs.insert(graph.statement_id(), graph)
    }

    pub fn remove(&self, statement: StatementId) -> Option<Arc<IndexBenefitGraph>> {
        self.graphs.remove(&statement).map(|(_, graph)| graph)
    }

    pub fn contains(&self, statement: StatementId) -> bool {
        self.graphs.contains_key(&statement)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn clear(&self) {
        self.graphs.clear();
    }

    /// 按语句编号升序返回全部图
    pub fn graphs(&self) -> Vec<Arc<IndexBenefitGraph>> {
        let mut graphs: Vec<Arc<IndexBenefitGraph>> = self
            .graphs
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        graphs.sort_by_key(|g| g.statement_id());
        graphs
    }
}
