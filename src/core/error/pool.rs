//! 候选索引池错误类型

use thiserror::Error;

/// 候选索引池错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// 池编号未注册
    #[error("池编号 {id} 未注册（当前共 {count} 个候选索引）")]
    UnknownPoolId { id: usize, count: usize },

    /// 索引名称未注册
    #[error("未知的索引名称: {0}")]
    UnknownIndexName(String),
}

/// 候选索引池结果类型
pub type PoolResult<T> = Result<T, PoolError>;
