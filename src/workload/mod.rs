//! 工作负载
//!
//! - `cache`: 按语句缓存构建好的索引收益图
//! - `session`: 调优会话，负责构建、查询与交互分析
//! - `file`: 工作负载文件的加载

pub mod cache;
pub mod file;
pub mod session;

pub use cache::GraphCache;
pub use file::{CostEntry, StatementEntry, Workload, WorkloadFile};
pub use session::TuningSession;
