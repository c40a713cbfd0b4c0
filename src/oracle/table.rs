//! 查表代价预言
//!
//! 按（语句，配置）精确查表，找不到条目时返回 `UnknownConfiguration`。
//! 用于回放离线采集的 what-if 结果以及测试。

use super::{OracleResponse, Statement, StatementId, WhatIfOracle};
use crate::core::error::{OracleError, OracleResult};
use crate::index::Configuration;
use std::collections::{HashMap, HashSet};

/// 查表代价预言
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    entries: HashMap<(StatementId, Configuration), OracleResponse>,
    statements: HashSet<StatementId>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一条定价结果，同一键重复登记时覆盖
    pub fn insert(&mut self, statement: StatementId, configuration: Configuration, cost: f64, used: Configuration) {
        self.statements.insert(statement);
        self.entries
            .insert((statement, configuration), OracleResponse::new(cost, used));
    }

    /// 链式登记
    pub fn with_entry(mut self, statement: StatementId, configuration: Configuration, cost: f64, used: Configuration) -> Self {
        self.insert(statement, configuration, cost, used);
        self
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某条语句登记过的全部配置
    pub fn configurations(&self, statement: StatementId) -> Vec<Configuration> {
        let mut configs: Vec<Configuration> = self
            .entries
            .keys()
            .filter(|(sid, _)| *sid == statement)
            .map(|(_, config)| config.clone())
            .collect();
        configs.sort_by_key(|c| (c.len(), c.iter().collect::<Vec<_>>()));
        configs
    }
}

impl WhatIfOracle for TableOracle {
    fn price_and_used_set(
        &self,
        statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        if !self.statements.contains(&statement.id) {
            return Err(OracleError::UnknownStatement(statement.id));
        }
        self.entries
            .get(&(statement.id, configuration.clone()))
            .cloned()
            .ok_or_else(|| OracleError::UnknownConfiguration {
                statement: statement.id,
                configuration: configuration.to_string(),
            })
    }
}
