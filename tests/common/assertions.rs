//! 自定义断言辅助模块
//!
//! 提供测试中的常用断言函数

use ibg_advisor::ibg::{CoveringNodeFinder, IndexBenefitGraph};
use ibg_advisor::index::Configuration;

/// 断言结果成功，返回内部值
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    result.expect("操作应该成功")
}

/// 断言结果失败并匹配错误消息
pub fn assert_err_with<T: std::fmt::Debug, E: std::fmt::Display>(result: Result<T, E>, expected_msg: &str) {
    let err = result.expect_err("操作应该失败");
    let err_str = err.to_string();
    assert!(
        err_str.contains(expected_msg),
        "错误消息应包含 '{}', 实际是 '{}'",
        expected_msg,
        err_str
    );
}

/// 断言两个代价在容差内相等
pub fn assert_cost_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "代价不匹配: 期望 {}, 实际 {}",
        expected,
        actual
    );
}

/// 断言目标配置被覆盖，返回其代价
pub fn assert_covered(graph: &IndexBenefitGraph, target: &Configuration) -> f64 {
    CoveringNodeFinder::find_cost(graph, target)
        .unwrap_or_else(|| panic!("配置 {} 应该被图覆盖", target))
}

/// 断言图中每个节点的已用集合对应的子边指向正确的子配置
pub fn assert_well_formed(graph: &IndexBenefitGraph) {
    for node in graph.nodes() {
        if !node.is_expanded() {
            assert!(node.children().is_empty(), "未展开节点 {} 不应有子边", node.id());
            assert!(node.cost().is_none(), "未展开节点 {} 不应有代价", node.id());
            continue;
        }
        assert!(node.cost().is_some(), "已展开节点 {} 应有代价", node.id());
        assert!(
            node.used_set().is_subset_of(node.configuration()),
            "节点 {} 的已用集合超出配置",
            node.id()
        );
        for edge in node.children() {
            let child = graph.node(edge.child).expect("子节点应该存在");
            assert_eq!(
                child.configuration(),
                &node.configuration().without(edge.used_index),
                "节点 {} 经索引 {} 的子边不一致",
                node.id(),
                edge.used_index
            );
        }
    }
}
