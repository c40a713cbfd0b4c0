//! 交互记录器
//!
//! 分析过程中同一索引对会在许多上下文中被观测到，记录器只保留最大值，
//! 结束时交出 [`InteractionBank`]。

use super::bank::InteractionBank;
use crate::core::error::InteractionResult;
use crate::index::PoolId;

/// 交互记录器
#[derive(Debug, Clone)]
pub struct InteractionLogger {
    bank: InteractionBank,
    observations: usize,
}

impl InteractionLogger {
    pub fn new(index_count: usize) -> Self {
        Self {
            bank: InteractionBank::new(index_count),
            observations: 0,
        }
    }

    /// 在已有交互表上继续记录
    pub fn from_bank(bank: InteractionBank) -> Self {
        Self {
            bank,
            observations: 0,
        }
    }

    pub fn index_count(&self) -> usize {
        self.bank.index_count()
    }

    /// 记录一次交互观测，保留较大者
    pub fn record_interaction(&mut self, a: PoolId, b: PoolId, value: f64) -> InteractionResult<()> {
        self.observations += 1;
        match self.bank.interaction_level(a, b)? {
            Some(current) if current >= value => Ok(()),
            _ => self.bank.assign_interaction(a, b, value),
        }
    }

    /// 记录一次收益观测，保留较大者
    pub fn record_benefit(&mut self, index: PoolId, value: f64) -> InteractionResult<()> {
        self.observations += 1;
        match self.bank.best_benefit(index)? {
            Some(current) if current >= value => Ok(()),
            _ => self.bank.assign_benefit(index, value),
        }
    }

    /// 观测次数
    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn bank(&self) -> &InteractionBank {
        &self.bank
    }

    pub fn finish(self) -> InteractionBank {
        log::debug!(
            "交互记录完成: {} 次观测, {} 个索引对已计算",
            self.observations,
            self.bank.computed_pair_count()
        );
        self.bank
    }
}
