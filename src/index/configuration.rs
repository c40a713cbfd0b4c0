//! 索引配置（位集合）
//!
//! 配置是一组池编号，内部用 64 位字的动态位向量表示。
//! 所有产生新集合的操作都返回独立副本，只有名字中带 `_with` 或明确标注的
//! 方法（`add`、`remove`、`union_with`、`subtract`、`clear`）原地修改。
//!
//! 不变式：`words` 末尾没有全零字，因此派生的 `PartialEq`/`Hash` 就是集合相等。

use super::types::PoolId;
use serde::{Deserialize, Serialize};
use std::fmt;

const WORD_BITS: usize = 64;

/// 索引配置
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<PoolId>", into = "Vec<PoolId>")]
pub struct Configuration {
    words: Vec<u64>,
}

impl Configuration {
    /// 创建空配置
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// 由池编号序列创建配置
    pub fn from_ids<I: IntoIterator<Item = PoolId>>(ids: I) -> Self {
        let mut config = Self::new();
        for id in ids {
            config.add(id);
        }
        config
    }

    /// 创建包含 `[0, count)` 全部编号的配置
    pub fn full(count: usize) -> Self {
        Self::from_ids(0..count)
    }

    #[inline]
    fn locate(id: PoolId) -> (usize, u64) {
        (id / WORD_BITS, 1u64 << (id % WORD_BITS))
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }

    /// 原地加入一个编号
    pub fn add(&mut self, id: PoolId) {
        let (word, mask) = Self::locate(id);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= mask;
    }

    /// 原地移除一个编号
    pub fn remove(&mut self, id: PoolId) {
        let (word, mask) = Self::locate(id);
        if let Some(w) = self.words.get_mut(word) {
            *w &= !mask;
            self.trim();
        }
    }

    /// 原地清空
    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn contains(&self, id: PoolId) -> bool {
        let (word, mask) = Self::locate(id);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }

    /// 返回加入 `id` 后的新配置
    pub fn with(&self, id: PoolId) -> Self {
        let mut config = self.clone();
        config.add(id);
        config
    }

    /// 返回移除 `id` 后的新配置
    pub fn without(&self, id: PoolId) -> Self {
        let mut config = self.clone();
        config.remove(id);
        config
    }

    pub fn is_subset_of(&self, other: &Configuration) -> bool {
        self.words.iter().enumerate().all(|(i, w)| {
            let o = other.words.get(i).copied().unwrap_or(0);
            w & !o == 0
        })
    }

    pub fn is_superset_of(&self, other: &Configuration) -> bool {
        other.is_subset_of(self)
    }

    /// 并集（新副本）
    pub fn union(&self, other: &Configuration) -> Self {
        let mut config = self.clone();
        config.union_with(other);
        config
    }

    /// 原地并集
    pub fn union_with(&mut self, other: &Configuration) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(other.words.iter()) {
            *w |= o;
        }
    }

    /// 交集（新副本）
    pub fn intersection(&self, other: &Configuration) -> Self {
        let mut words: Vec<u64> = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(w, o)| w & o)
            .collect();
        while words.last() == Some(&0) {
            words.pop();
        }
        Self { words }
    }

    /// 差集（新副本）
    pub fn difference(&self, other: &Configuration) -> Self {
        let mut config = self.clone();
        config.subtract(other);
        config
    }

    /// 原地差集
    pub fn subtract(&mut self, other: &Configuration) {
        for (w, o) in self.words.iter_mut().zip(other.words.iter()) {
            *w &= !o;
        }
        self.trim();
    }

    pub fn intersect_count(&self, other: &Configuration) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(w, o)| (w & o).count_ones() as usize)
            .sum()
    }

    /// 集合元素个数
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 最大的池编号
    pub fn max_id(&self) -> Option<PoolId> {
        let last = *self.words.last()?;
        let bit = WORD_BITS - 1 - last.leading_zeros() as usize;
        Some((self.words.len() - 1) * WORD_BITS + bit)
    }

    /// 按升序遍历池编号
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// 升序池编号迭代器
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = PoolId;

    fn next(&mut self) -> Option<PoolId> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = PoolId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl FromIterator<PoolId> for Configuration {
    fn from_iter<I: IntoIterator<Item = PoolId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

impl From<Vec<PoolId>> for Configuration {
    fn from(ids: Vec<PoolId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<Configuration> for Vec<PoolId> {
    fn from(config: Configuration) -> Self {
        config.iter().collect()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.iter().map(|id| id.to_string()).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration{}", self)
    }
}
