//! 索引收益图分析
//!
//! 在已构建的图上估计索引间的交互度与单索引收益，全部代价都通过覆盖节点查找
//! 得到，不再调用代价预言。
//!
//! 对每个已展开节点 Y、每个 `a ∈ used(Y)` 以及图中用到的其他索引 b，
//! 取上下文 `X = Y \ {a, b}`：
//!
//! ```text
//! doi_X(a, b) = cost(X ∪ {a}) + cost(X ∪ {b}) − cost(X ∪ {a, b}) − cost(X)
//! ```
//!
//! 记录 `|doi|`；同时记录 a 的收益 `cost(Y \ {a}) − cost(Y)`。
//! 四个代价中任一无法覆盖时跳过该上下文。

use super::finder::CoveringNodeFinder;
use super::graph::IndexBenefitGraph;
use crate::core::error::InteractionResult;
use crate::index::Configuration;
use crate::interaction::InteractionLogger;

/// 单次分析的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// 计算出交互度的上下文数
    pub interactions: usize,
    /// 计算出收益的次数
    pub benefits: usize,
    /// 因图未覆盖而跳过的上下文数
    pub skipped: usize,
}

/// 索引收益图分析器
pub struct IbgAnalyzer;

impl IbgAnalyzer {
    /// 分析一张图，把观测写入记录器
    pub fn analyze(
        graph: &IndexBenefitGraph,
        logger: &mut InteractionLogger,
    ) -> InteractionResult<AnalysisStats> {
        let mut stats = AnalysisStats::default();
        let all_used = graph.used_indexes();

        // 完整图中从未出现在已用集合里的索引对确定不交互
        if graph.is_complete() {
            Self::record_baseline(graph.root().configuration(), logger)?;
        }

        for node in graph.nodes().iter().filter(|n| n.is_expanded()) {
            let Some(cost_y) = node.cost() else {
                continue;
            };
            let y = node.configuration();

            for a in node.used_set().iter() {
                match CoveringNodeFinder::find_cost(graph, &y.without(a)) {
                    Some(cost_without) => {
                        logger.record_benefit(a, cost_without - cost_y)?;
                        stats.benefits += 1;
                    }
                    None => stats.skipped += 1,
                }

                for b in all_used.iter().filter(|&b| b != a) {
                    let context = y.without(a).without(b);
                    match Self::degree_of_interaction(graph, &context, a, b) {
                        Some(doi) => {
                            logger.record_interaction(a, b, doi.abs())?;
                            stats.interactions += 1;
                        }
                        None => stats.skipped += 1,
                    }
                }
            }
        }

        log::debug!(
            "语句 {} 的交互分析完成: {} 个交互上下文, {} 个收益, {} 个上下文未覆盖",
            graph.statement_id(),
            stats.interactions,
            stats.benefits,
            stats.skipped
        );
        Ok(stats)
    }

    /// 在上下文 X 中计算 a、b 的交互度，任一代价未覆盖时为 `None`
    pub fn degree_of_interaction(
        graph: &IndexBenefitGraph,
        context: &Configuration,
        a: usize,
        b: usize,
    ) -> Option<f64> {
        let with_a = context.with(a);
        let with_b = context.with(b);
        let with_both = with_a.with(b);

        let cost_x = CoveringNodeFinder::find_cost(graph, context)?;
        let cost_a = CoveringNodeFinder::find_cost(graph, &with_a)?;
        let cost_b = CoveringNodeFinder::find_cost(graph, &with_b)?;
        let cost_ab = CoveringNodeFinder::find_cost(graph, &with_both)?;
        Some(cost_a + cost_b - cost_ab - cost_x)
    }

    fn record_baseline(root: &Configuration, logger: &mut InteractionLogger) -> InteractionResult<()> {
        let members: Vec<usize> = root.iter().collect();
        for (pos, &a) in members.iter().enumerate() {
            logger.record_benefit(a, 0.0)?;
            for &b in &members[pos + 1..] {
                logger.record_interaction(a, b, 0.0)?;
            }
        }
        Ok(())
    }
}
