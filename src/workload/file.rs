//! 工作负载文件
//!
//! JSON 格式，包含候选索引与每条语句离线采集的 what-if 结果：
//!
//! ```json
//! {
//!   "indexes": [{ "name": "A", "table": "t", "columns": [{ "name": "a" }] }],
//!   "statements": [{
//!     "id": 1,
//!     "sql": "SELECT ...",
//!     "entries": [{ "configuration": ["A"], "cost": 20.0, "used": ["A"] }]
//!   }]
//! }
//! ```
//!
//! 配置与已用集合使用索引名称书写，加载时按候选池换算为池编号。

use crate::core::error::{AdvisorError, AdvisorResult};
use crate::index::{CandidateIndex, CandidatePool};
use crate::oracle::{Statement, StatementId, TableOracle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// 一条定价记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub configuration: Vec<String>,
    pub cost: f64,
    #[serde(default)]
    pub used: Vec<String>,
}

/// 语句及其定价记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementEntry {
    pub id: StatementId,
    #[serde(default)]
    pub sql: String,
    pub entries: Vec<CostEntry>,
}

/// 工作负载文件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadFile {
    pub indexes: Vec<CandidateIndex>,
    pub statements: Vec<StatementEntry>,
}

/// 加载后的工作负载
#[derive(Debug, Clone)]
pub struct Workload {
    pub pool: CandidatePool,
    pub statements: Vec<Statement>,
    pub oracle: TableOracle,
}

impl WorkloadFile {
    pub fn load<P: AsRef<Path>>(path: P) -> AdvisorResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> AdvisorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> AdvisorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 注册候选索引并把定价记录换算为查表预言
    pub fn into_workload(self) -> AdvisorResult<Workload> {
        let mut pool = CandidatePool::new();
        let mut names = HashSet::new();
        for index in self.indexes {
            if !names.insert(index.name.clone()) {
                return Err(AdvisorError::Workload(format!("索引名称重复: {}", index.name)));
            }
            let expected = pool.total_count();
            if pool.register(index.clone()) != expected {
                return Err(AdvisorError::Workload(format!(
                    "索引 {} 与已有候选索引重复",
                    index
                )));
            }
        }

        let mut oracle = TableOracle::new();
        let mut statements = Vec::with_capacity(self.statements.len());
        let mut ids = HashSet::new();
        for entry in self.statements {
            if !ids.insert(entry.id) {
                return Err(AdvisorError::Workload(format!("语句编号重复: {}", entry.id)));
            }
            if entry.entries.is_empty() {
                return Err(AdvisorError::Workload(format!("语句 {} 没有定价记录", entry.id)));
            }
            for cost_entry in &entry.entries {
                let configuration = pool.configuration_of_names(&cost_entry.configuration)?;
                let used = pool.configuration_of_names(&cost_entry.used)?;
                oracle.insert(entry.id, configuration, cost_entry.cost, used);
            }
            statements.push(Statement::new(entry.id, entry.sql));
        }

        log::debug!(
            "工作负载加载完成: {} 个候选索引, {} 条语句, {} 条定价记录",
            pool.total_count(),
            statements.len(),
            oracle.len()
        );
        Ok(Workload {
            pool,
            statements,
            oracle,
        })
    }
}
