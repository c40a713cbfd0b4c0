//! 候选索引池
//!
//! 为每个候选索引分配稳定、稠密的池编号，使配置可以用位集合表示。
//! 编号从 0 开始单调递增，注册语义相同的索引返回已有编号。
//!
//! 池本身不是线程安全的；多个工作线程共享时使用 [`SharedCandidatePool`]，
//! 由互斥锁串行化 `register` 调用。

use super::configuration::Configuration;
use super::types::{CandidateIndex, IndexKey, PoolId};
use crate::core::error::{PoolError, PoolResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// 多线程共享的候选索引池
pub type SharedCandidatePool = Arc<Mutex<CandidatePool>>;

/// 候选索引池
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    indexes: Vec<CandidateIndex>,
    ids: HashMap<IndexKey, PoolId>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册候选索引，返回池编号
    ///
    /// 已注册的语义相同索引直接返回原编号
    pub fn register(&mut self, index: CandidateIndex) -> PoolId {
        let key = index.key();
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.indexes.len();
        log::debug!("注册候选索引 {} -> {}", index, id);
        self.ids.insert(key, id);
        self.indexes.push(index);
        id
    }

    /// 批量注册，返回对应的池编号
    pub fn register_all<I: IntoIterator<Item = CandidateIndex>>(&mut self, indexes: I) -> Vec<PoolId> {
        indexes.into_iter().map(|idx| self.register(idx)).collect()
    }

    /// 查询池编号，不插入
    pub fn pool_id_of(&self, index: &CandidateIndex) -> Option<PoolId> {
        self.ids.get(&index.key()).copied()
    }

    /// 按名称查询池编号
    pub fn pool_id_by_name(&self, name: &str) -> Option<PoolId> {
        self.indexes.iter().position(|idx| idx.name == name)
    }

    pub fn get(&self, id: PoolId) -> Option<&CandidateIndex> {
        self.indexes.get(id)
    }

    pub fn total_count(&self) -> usize {
        self.indexes.len()
    }

    /// 按注册顺序返回全部候选索引
    pub fn all_indexes(&self) -> &[CandidateIndex] {
        &self.indexes
    }

    /// 检查池编号是否已注册
    pub fn check_id(&self, id: PoolId) -> PoolResult<()> {
        if id < self.indexes.len() {
            Ok(())
        } else {
            Err(PoolError::UnknownPoolId {
                id,
                count: self.indexes.len(),
            })
        }
    }

    /// 由池编号构造配置，编号越界时报错
    pub fn configuration_of(&self, ids: &[PoolId]) -> PoolResult<Configuration> {
        let mut config = Configuration::new();
        for &id in ids {
            self.check_id(id)?;
            config.add(id);
        }
        Ok(config)
    }

    /// 由索引名称构造配置
    pub fn configuration_of_names<S: AsRef<str>>(&self, names: &[S]) -> PoolResult<Configuration> {
        let mut config = Configuration::new();
        for name in names {
            let name = name.as_ref();
            let id = self
                .pool_id_by_name(name)
                .ok_or_else(|| PoolError::UnknownIndexName(name.to_string()))?;
            config.add(id);
        }
        Ok(config)
    }

    /// 全部已注册索引组成的配置
    pub fn full_configuration(&self) -> Configuration {
        Configuration::full(self.indexes.len())
    }

    /// 转换为可共享的池
    pub fn into_shared(self) -> SharedCandidatePool {
        Arc::new(Mutex::new(self))
    }
}
