//! 索引交互集成测试
//!
//! 在完整构建的图上做交互分析，检查交互度、收益与稳定分区

mod common;

use common::assertions::{assert_cost_eq, assert_ok};
use common::fixtures::{scenario_oracle, scenario_pool, scenario_statement, TableGroupOracle, A, B, C, D};

use ibg_advisor::ibg::{IbgAnalyzer, IbgConstructor, IndexBenefitGraph, TraversalOrder};
use ibg_advisor::interaction::{InteractionBank, InteractionLogger};
use ibg_advisor::oracle::Statement;

fn analyze(graph: &IndexBenefitGraph, index_count: usize) -> InteractionBank {
    let mut logger = InteractionLogger::new(index_count);
    assert_ok(IbgAnalyzer::analyze(graph, &mut logger));
    logger.finish()
}

fn level(bank: &InteractionBank, a: usize, b: usize) -> f64 {
    assert_ok(bank.interaction_level(a, b)).expect("交互度应该已计算")
}

#[test]
fn test_scenario_interactions() {
    let oracle = scenario_oracle();
    let pool = scenario_pool();
    let graph = assert_ok(
        IbgConstructor::new(&oracle, scenario_statement(), pool.full_configuration(), TraversalOrder::BreadthFirst)
            .build(),
    );
    let bank = analyze(&graph, pool.total_count());

    assert_cost_eq(level(&bank, A, D), 45.0);
    assert_cost_eq(level(&bank, B, D), 35.0);
    assert_cost_eq(level(&bank, A, B), 15.0);
    assert_cost_eq(level(&bank, C, D), 15.0);
    assert_eq!(bank.interaction_level(D, A), bank.interaction_level(A, D));

    assert_eq!(bank.best_benefit(A), Ok(Some(30.0)));
    assert_eq!(bank.best_benefit(B), Ok(Some(35.0)));
    assert_eq!(bank.best_benefit(C), Ok(Some(15.0)));
    assert_eq!(bank.best_benefit(D), Ok(Some(25.0)));

    let partitions = bank.stable_partitions(20.0);
    assert_eq!(partitions.subsets(), &[vec![A, B, D], vec![C]]);
    assert!(partitions.same_subset(A, D));
    assert_eq!(partitions.state_count(), 8 + 2);

    assert_eq!(bank.stable_partitions(50.0).subset_count(), 4);
}

#[test]
fn test_partitions_follow_tables() {
    for seed in 0..5 {
        let oracle = TableGroupOracle::seeded(seed, 3, 3);
        let graph = assert_ok(
            IbgConstructor::new(
                &oracle,
                Statement::new(1, "synthetic"),
                oracle.full_configuration(),
                TraversalOrder::DepthFirst,
            )
            .build(),
        );
        let bank = analyze(&graph, oracle.index_count());

        let partitions = bank.stable_partitions(0.0);
        assert_eq!(partitions.subsets(), oracle.groups(), "种子 {} 的分区与表分组不一致", seed);
        assert_eq!(partitions.state_count(), 3 * 8);

        // 不同表的索引已计算且互不交互
        assert_eq!(bank.interaction_level(0, 3), Ok(Some(0.0)));
        assert_eq!(bank.interaction_level(2, 8), Ok(Some(0.0)));
        for group in oracle.groups() {
            assert!(level(&bank, group[0], group[1]) > 0.0);
        }
    }
}

#[test]
fn test_logger_accumulates_across_statements() {
    let first = TableGroupOracle::seeded(7, 2, 2);
    let graph_a = assert_ok(
        IbgConstructor::new(&first, Statement::new(1, "q1"), first.full_configuration(), TraversalOrder::BreadthFirst)
            .build(),
    );
    // 第二条语句只涉及第一张表
    let graph_b = assert_ok(
        IbgConstructor::new(
            &first,
            Statement::new(2, "q2"),
            common::config(&first.groups()[0]),
            TraversalOrder::BreadthFirst,
        )
        .build(),
    );

    let mut logger = InteractionLogger::new(first.index_count());
    assert_ok(IbgAnalyzer::analyze(&graph_a, &mut logger));
    let after_first = logger.bank().clone();
    assert_ok(IbgAnalyzer::analyze(&graph_b, &mut logger));
    let bank = logger.finish();

    for a in 0..bank.index_count() {
        for b in (a + 1)..bank.index_count() {
            let before = assert_ok(after_first.interaction_level(a, b)).unwrap_or(0.0);
            let after = assert_ok(bank.interaction_level(a, b)).unwrap_or(0.0);
            assert!(after >= before);
        }
    }
    assert_eq!(bank.stable_partitions(0.0).subsets(), first.groups());
}
