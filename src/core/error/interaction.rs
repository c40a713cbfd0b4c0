//! 交互矩阵错误类型

use thiserror::Error;

/// 交互矩阵错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteractionError {
    /// 索引编号超出矩阵范围
    #[error("索引 {index} 超出范围 [0, {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// 索引与自身没有交互度
    #[error("索引 {0} 不能与自身计算交互度")]
    SelfInteraction(usize),

    /// 非法数值
    #[error("非法的交互数值: {0}")]
    InvalidValue(f64),
}

/// 交互矩阵结果类型
pub type InteractionResult<T> = Result<T, InteractionError>;
