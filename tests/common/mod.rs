//! 集成测试共享工具模块
//!
//! 提供代价预言替身、工作负载构造和常用断言，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

use ibg_advisor::index::Configuration;

/// 由池编号列表构造配置
pub fn config(ids: &[usize]) -> Configuration {
    Configuration::from_ids(ids.iter().copied())
}

/// 根配置的全部子集，按大小升序
pub fn all_subsets(root: &Configuration) -> Vec<Configuration> {
    let members: Vec<usize> = root.iter().collect();
    let mut subsets: Vec<Configuration> = (0u32..(1u32 << members.len()))
        .map(|mask| {
            members
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &id)| id)
                .collect()
        })
        .collect();
    subsets.sort_by_key(|c| c.len());
    subsets
}
