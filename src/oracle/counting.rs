//! 计数包装器，统计实际发生的 what-if 调用次数

use super::{OracleResponse, Statement, WhatIfOracle};
use crate::core::error::OracleResult;
use crate::index::Configuration;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 统计调用次数的代价预言包装器
#[derive(Debug, Default)]
pub struct CountingOracle<O> {
    inner: O,
    calls: AtomicUsize,
}

impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// 已发生的调用次数（包括失败的调用）
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: WhatIfOracle> WhatIfOracle for CountingOracle<O> {
    fn price_and_used_set(
        &self,
        statement: &Statement,
        configuration: &Configuration,
    ) -> OracleResult<OracleResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.price_and_used_set(statement, configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::TableOracle;

    #[test]
    fn test_counts_successes_and_failures() {
        let table = TableOracle::new().with_entry(1, Configuration::new(), 1.0, Configuration::new());
        let oracle = CountingOracle::new(table);
        let stmt = Statement::new(1, "SELECT 1");

        assert!(oracle.price_and_used_set(&stmt, &Configuration::new()).is_ok());
        assert!(oracle
            .price_and_used_set(&stmt, &Configuration::from_ids([0]))
            .is_err());
        assert_eq!(oracle.calls(), 2);

        oracle.reset();
        assert_eq!(oracle.calls(), 0);
    }
}
