//! what-if 代价预言模块
//!
//! 代价预言是引擎的外部协作者：给定语句和索引配置，返回优化器估算的代价，
//! 以及所选计划实际用到的索引集合（已用集合）。
//!
//! 构建器依赖的契约：
//! - 合理性：已用集合是输入配置的子集；若 `used(Y) ⊆ X ⊆ Y`，则 X 与 Y 代价相同
//! - 单调性：配置增大时代价不增加
//!
//! 引擎不强制这些性质，[`conformance`] 提供校验工具。

pub mod conformance;
pub mod counting;
pub mod table;

pub use conformance::{check_oracle, ConformanceReport, Violation};
pub use counting::CountingOracle;
pub use table::TableOracle;

use crate::core::error::OracleResult;
use crate::index::Configuration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 语句编号
pub type StatementId = u32;

/// 工作负载中的一条语句
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub sql: String,
}

impl Statement {
    pub fn new(id: StatementId, sql: impl Into<String>) -> Self {
        Self { id, sql: sql.into() }
    }
}

/// 一次定价的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleResponse {
    pub cost: f64,
    pub used: Configuration,
}

impl OracleResponse {
    pub fn new(cost: f64, used: Configuration) -> Self {
        Self { cost, used }
    }
}

/// what-if 代价预言
pub trait WhatIfOracle {
    /// 在给定配置下为语句定价，并返回计划用到的索引
    fn price_and_used_set(
        &self,
        statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse>;
}

impl<T: WhatIfOracle + ?Sized> WhatIfOracle for &T {
    fn price_and_used_set(
        &self,
        statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        (**self).price_and_used_set(statement, configuration)
    }
}

impl<T: WhatIfOracle + ?Sized> WhatIfOracle for Box<T> {
    fn price_and_used_set(
        &self,
        statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        (**self).price_and_used_set(statement, configuration)
    }
}

impl<T: WhatIfOracle + ?Sized> WhatIfOracle for Arc<T> {
    fn price_and_used_set(
        &self,
        statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        (**self).price_and_used_set(statement, configuration)
    }
}
