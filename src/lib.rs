//! IBG Advisor - 基于索引收益图的 what-if 物理设计调优引擎
//!
//! 对工作负载中的每条语句，以候选索引全集为根惰性构建索引收益图，
//! 只沿优化器实际用到的索引分叉，从而用少量 what-if 调用得到任意候选子集的代价。
//! 在图的基础上估计索引间的交互度，并划分互不交互的稳定分区。

pub mod config;
pub mod core;
pub mod ibg;
pub mod index;
pub mod interaction;
pub mod oracle;
pub mod utils;
pub mod workload;
