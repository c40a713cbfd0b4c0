//! 候选索引类型定义模块
//!
//! 候选索引由表名和有序列组成；两个索引是否为同一实体只取决于
//! 表名与列顺序（含排序方向），名称和唯一性标记不参与比较

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 候选索引在池中的编号，从 0 开始稠密分配
pub type PoolId = usize;

/// 索引列
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    #[serde(default)]
    pub descending: bool,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>, descending: bool) -> Self {
        Self {
            name: name.into(),
            descending,
        }
    }

    /// 升序列
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// 降序列
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{} DESC", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// 候选索引
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateIndex {
    pub name: String,
    pub table: String,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub is_unique: bool,
}

impl CandidateIndex {
    pub fn new(name: impl Into<String>, table: impl Into<String>, columns: Vec<IndexColumn>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns,
            is_unique: false,
        }
    }

    /// 设置唯一索引标记
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// 判重键：表名 + 有序列
    pub fn key(&self) -> IndexKey {
        IndexKey {
            table: self.table.clone(),
            columns: self.columns.clone(),
        }
    }
}

impl PartialEq for CandidateIndex {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.columns == other.columns
    }
}

impl Eq for CandidateIndex {}

impl Hash for CandidateIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table.hash(state);
        self.columns.hash(state);
    }
}

impl fmt::Display for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        write!(f, "{} ON {}({})", self.name, self.table, columns.join(", "))
    }
}

/// 候选索引判重键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexKey {
    pub table: String,
    pub columns: Vec<IndexColumn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_name_and_uniqueness() {
        let a = CandidateIndex::new("idx_a", "orders", vec![IndexColumn::asc("o_custkey")]);
        let b = CandidateIndex::new("idx_b", "orders", vec![IndexColumn::asc("o_custkey")]).unique();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_column_order_matters() {
        let a = CandidateIndex::new(
            "i1",
            "lineitem",
            vec![IndexColumn::asc("l_orderkey"), IndexColumn::asc("l_partkey")],
        );
        let b = CandidateIndex::new(
            "i2",
            "lineitem",
            vec![IndexColumn::asc("l_partkey"), IndexColumn::asc("l_orderkey")],
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_direction_matters() {
        let a = CandidateIndex::new("i1", "t", vec![IndexColumn::asc("c")]);
        let b = CandidateIndex::new("i2", "t", vec![IndexColumn::desc("c")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let idx = CandidateIndex::new(
            "idx_o",
            "orders",
            vec![IndexColumn::asc("o_custkey"), IndexColumn::desc("o_orderdate")],
        );
        assert_eq!(idx.to_string(), "idx_o ON orders(o_custkey, o_orderdate DESC)");
    }
}
