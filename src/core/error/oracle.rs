//! 代价预言错误类型
//!
//! what-if 调用失败对当前语句的图构建是致命的，构建器直接向上传播，不做重试。

use thiserror::Error;

/// 代价预言错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// 优化器不可用（例如数据库连接断开）
    #[error("优化器不可用: {0}")]
    Unavailable(String),

    /// 预言不认识该语句
    #[error("未知语句: {0}")]
    UnknownStatement(u32),

    /// 预言无法为该配置定价
    #[error("语句 {statement} 无法为配置 {configuration} 定价")]
    UnknownConfiguration {
        statement: u32,
        configuration: String,
    },

    /// 预言返回了非法结果
    #[error("非法的定价结果: {0}")]
    InvalidResponse(String),
}

/// 代价预言结果类型
pub type OracleResult<T> = Result<T, OracleError>;
