//! 索引收益图（Index Benefit Graph）
//!
//! 为单条语句惰性构建紧凑的图，使任意候选子集的代价都能由图中某个覆盖节点直接给出。
//!
//! - `node`: 图节点与子边
//! - `graph`: 节点存储、按配置查找与快照持久化
//! - `constructor`: 工作队列驱动的惰性构建
//! - `finder`: 覆盖节点查找
//! - `analyzer`: 基于覆盖节点的交互度与收益分析

pub mod analyzer;
pub mod constructor;
pub mod finder;
pub mod graph;
pub mod node;

pub use analyzer::{AnalysisStats, IbgAnalyzer};
pub use constructor::{BuildStats, ConstructionBudget, IbgConstructor, TraversalOrder};
pub use finder::CoveringNodeFinder;
pub use graph::{IndexBenefitGraph, ROOT_ID};
pub use node::{ChildEdge, IbgNode, NodeId};
