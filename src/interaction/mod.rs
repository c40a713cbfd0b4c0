//! 索引交互
//!
//! - `bank`: 索引对交互度与单索引收益的被动存储
//! - `logger`: 分析时累积观测并保留最大值
//! - `partition`: 按阈值把索引划分为互不交互的稳定分区

pub mod bank;
pub mod logger;
pub mod partition;

pub use bank::InteractionBank;
pub use logger::InteractionLogger;
pub use partition::IndexPartitions;
