//! 候选索引模块
//!
//! - 候选索引类型定义与判重规则
//! - 索引配置（位集合）
//! - 候选索引池（池编号分配）

pub mod configuration;
pub mod pool;
pub mod types;

pub use configuration::Configuration;
pub use pool::{CandidatePool, SharedCandidatePool};
pub use types::{CandidateIndex, IndexColumn, IndexKey, PoolId};
