//! ID生成器模块 - 为一次图构建会话分配节点编号
//!
//! 生成器由构建器实例持有，不存在进程级的全局计数器；
//! 重置只在测试中开放。

/// 顺序ID生成器
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    /// 创建新的ID生成器，使用指定的初始值
    pub fn new(init: usize) -> Self {
        Self { next: init }
    }

    /// 生成下一个ID
    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// 获取下一个将要分配的值
    pub fn current_value(&self) -> usize {
        self.next
    }

    /// 重置计数器到指定值
    #[cfg(test)]
    pub(crate) fn reset(&mut self, value: usize) {
        self.next = value;
    }
}
