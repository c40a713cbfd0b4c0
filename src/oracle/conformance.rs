//! 代价预言一致性校验
//!
//! 对一组配置逐一定价，然后检查：
//! - 已用集合是否为输入配置的子集
//! - 任意一对 `X ⊆ Y`：`cost(X) >= cost(Y)`（单调性）
//! - 任意一对 `X ⊆ Y` 且 `used(Y) ⊆ X`：`cost(X) == cost(Y)`（合理性）

use super::{OracleResponse, Statement, WhatIfOracle};
use crate::core::error::OracleResult;
use crate::index::Configuration;
use std::fmt;

/// 比较代价时的容差
const COST_EPSILON: f64 = 1e-9;

/// 违反的性质
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// 已用集合不是输入配置的子集
    UsedNotSubset {
        configuration: Configuration,
        used: Configuration,
    },
    /// 配置变大后代价反而升高
    NotMonotone {
        smaller: Configuration,
        larger: Configuration,
        smaller_cost: f64,
        larger_cost: f64,
    },
    /// `used(Y) ⊆ X ⊆ Y` 但代价不同
    NotSane {
        subset: Configuration,
        superset: Configuration,
        subset_cost: f64,
        superset_cost: f64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UsedNotSubset { configuration, used } => {
                write!(f, "已用集合 {} 不是配置 {} 的子集", used, configuration)
            }
            Violation::NotMonotone {
                smaller,
                larger,
                smaller_cost,
                larger_cost,
            } => write!(
                f,
                "单调性: cost({}) = {:.2} < cost({}) = {:.2}",
                smaller, smaller_cost, larger, larger_cost
            ),
            Violation::NotSane {
                subset,
                superset,
                subset_cost,
                superset_cost,
            } => write!(
                f,
                "合理性: cost({}) = {:.2} != cost({}) = {:.2}",
                subset, subset_cost, superset, superset_cost
            ),
        }
    }
}

/// 校验报告
#[derive(Debug, Clone, Default)]
pub struct ConformanceReport {
    /// 参与校验的配置数量
    pub checked: usize,
    pub violations: Vec<Violation>,
}

impl ConformanceReport {
    pub fn is_conformant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// 校验代价预言在给定配置上的合理性与单调性
///
/// 预言调用失败时直接返回错误
pub fn check_oracle<O: WhatIfOracle + ?Sized>(
    oracle: &O,
    statement: &Statement,
    configurations: &[Configuration],
) -> OracleResult<ConformanceReport> {
    let mut priced: Vec<(&Configuration, OracleResponse)> = Vec::with_capacity(configurations.len());
    for config in configurations {
        let response = oracle.price_and_used_set(statement, config)?;
        priced.push((config, response));
    }

    let mut report = ConformanceReport {
        checked: priced.len(),
        violations: Vec::new(),
    };

    for (config, response) in &priced {
        if !response.used.is_subset_of(config) {
            report.violations.push(Violation::UsedNotSubset {
                configuration: (*config).clone(),
                used: response.used.clone(),
            });
        }
    }

    for (small, small_resp) in &priced {
        for (large, large_resp) in &priced {
            if small == large || !small.is_subset_of(large) {
                continue;
            }
            if small_resp.cost + COST_EPSILON < large_resp.cost {
                report.violations.push(Violation::NotMonotone {
                    smaller: (*small).clone(),
                    larger: (*large).clone(),
                    smaller_cost: small_resp.cost,
                    larger_cost: large_resp.cost,
                });
            }
            if large_resp.used.is_subset_of(small)
                && (small_resp.cost - large_resp.cost).abs() > COST_EPSILON
            {
                report.violations.push(Violation::NotSane {
                    subset: (*small).clone(),
                    superset: (*large).clone(),
                    subset_cost: small_resp.cost,
                    superset_cost: large_resp.cost,
                });
            }
        }
    }

    if !report.is_conformant() {
        log::warn!(
            "语句 {} 的代价预言存在 {} 处违规",
            statement.id,
            report.violations.len()
        );
    }
    Ok(report)
}
