//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 信号量子系统配置
//!
//! 编译期常量由 build.rs 根据 Kernel.toml 生成；
//! 运行期参数由 [`SemConfig`] 在启动时传入。

include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// 信号量池启动参数
///
/// 扩容因子固定为 2，不可配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemConfig {
    /// 初始槽位数量
    pub initial_capacity: usize,
    /// 扩容上限，超过后 allocate 返回 NoCapacity
    pub max_capacity: usize,
}

impl SemConfig {
    pub const fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity,
        }
    }

    /// 修正后的初始容量（至少为 1，且不超过上限）
    pub(crate) fn effective_initial(&self) -> usize {
        self.initial_capacity.max(1).min(self.effective_max())
    }

    pub(crate) fn effective_max(&self) -> usize {
        self.max_capacity.max(1)
    }
}

impl Default for SemConfig {
    fn default() -> Self {
        Self::new(SEM_INITIAL_CAPACITY, SEM_MAX_CAPACITY)
    }
}
