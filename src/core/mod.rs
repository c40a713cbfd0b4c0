pub mod error;

// 错误和结果类型
pub use error::{
    AdvisorError, AdvisorResult, GraphError, GraphResult, InteractionError, InteractionResult,
    OracleError, OracleResult, PoolError, PoolResult,
};
