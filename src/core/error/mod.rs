//! 统一错误处理系统
//!
//! ## 设计理念
//!
//! 1. **按关注点拆分**：代价预言、索引收益图、交互矩阵、候选索引池各自定义错误枚举
//! 2. **分层转换**：子错误通过 `#[from]` 自动转换为 `AdvisorError`，外部错误
//!    （IO、JSON）转换为字符串，降低模块耦合
//! 3. **统一接口**：`AdvisorResult<T>` 提供统一的返回类型，简化错误传播

use thiserror::Error;

pub mod graph;
pub mod interaction;
pub mod oracle;
pub mod pool;

pub use graph::{GraphError, GraphResult};
pub use interaction::{InteractionError, InteractionResult};
pub use oracle::{OracleError, OracleResult};
pub use pool::{PoolError, PoolResult};

/// 统一的调优引擎错误类型
#[derive(Error, Debug, Clone)]
pub enum AdvisorError {
    #[error("代价预言错误: {0}")]
    Oracle(#[from] OracleError),

    #[error("索引收益图错误: {0}")]
    Graph(#[from] GraphError),

    #[error("交互矩阵错误: {0}")]
    Interaction(#[from] InteractionError),

    #[error("候选索引池错误: {0}")]
    Pool(#[from] PoolError),

    #[error("工作负载错误: {0}")]
    Workload(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO错误: {0}")]
    Io(String),

    #[error("序列化错误: {0}")]
    Serialization(String),
}

/// 统一的结果类型
pub type AdvisorResult<T> = Result<T, AdvisorError>;

// ==================== 外部错误转换实现 ====================

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        AdvisorError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AdvisorError {
    fn from(err: toml::de::Error) -> Self {
        AdvisorError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AdvisorError {
    fn from(err: toml::ser::Error) -> Self {
        AdvisorError::Config(err.to_string())
    }
}
