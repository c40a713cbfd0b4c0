//! 索引收益图错误类型

use thiserror::Error;

/// 索引收益图错误类型
///
/// 重复展开、重复定价属于构建器的编程错误，需要立即暴露
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// 节点已经展开过
    #[error("节点 {0} 已经展开")]
    AlreadyExpanded(usize),

    /// 节点代价已经赋值过
    #[error("节点 {0} 的代价已经赋值")]
    CostAlreadyAssigned(usize),

    /// 节点不存在
    #[error("节点 {0} 不存在")]
    NodeNotFound(usize),

    /// 图结构不一致（通常来自损坏的快照）
    #[error("图结构损坏: {0}")]
    Corrupted(String),
}

/// 索引收益图结果类型
pub type GraphResult<T> = Result<T, GraphError>;
