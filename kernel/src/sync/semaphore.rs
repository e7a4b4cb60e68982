//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 信号量 (Semaphore) 计数器与等待队列
//!
//! 参考 Linux 内核：
//! - `include/linux/semaphore.h` - 信号量结构
//! - `kernel/locking/semaphore.c` - 信号量操作
//!
//! 核心概念：
//! - P 操作 (down): 值减 1，结果为负则调用者进入等待队列尾部
//! - V 操作 (up): 值加 1，结果不大于 0 则唤醒等待队列头部的进程
//!
//! 阈值以 0 为中心对称：`< 0` 阻塞，`<= 0` 唤醒，
//! 每一次阻塞的 down 恰好对应一次唤醒的 up。
//!
//! 这里的 [`Semaphore`] 不含锁，也不直接操作调度器，
//! 调用者必须把它放在一把锁后面，保证计数值和等待队列一起修改：
//! 任何时刻释放锁时都满足 `|wait| == max(0, -count)`。

use alloc::vec::Vec;

use crate::ipc::sem::SemError;
use crate::process::task::Pid;
use crate::process::wait::WaitQueueHead;

/// down 操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownResult {
    /// 信号量可用，调用者不阻塞
    Acquired,
    /// 调用者已加入等待队列，需要阻塞并让出 CPU
    Blocked,
}

/// 信号量
///
/// 计数值可以为负：负数的绝对值就是等待者数量
#[derive(Debug, Default)]
pub struct Semaphore {
    /// 信号量计数值
    count: i32,
    /// 等待队列，只有 count < 0 时非空
    wait: WaitQueueHead,
}

impl Semaphore {
    /// 创建新信号量
    ///
    /// # 参数
    /// * `value` - 初始值，必须非负
    pub const fn new(value: i32) -> Self {
        Self {
            count: value,
            wait: WaitQueueHead::new(),
        }
    }

    /// 初始化信号量（运行时初始化）
    pub fn init(&mut self, value: i32) {
        debug_assert!(value >= 0);
        debug_assert!(self.wait.is_empty(), "re-initialising a semaphore with waiters");
        self.count = value;
        self.wait = WaitQueueHead::new();
    }

    /// P 操作
    ///
    /// 值减 1；若结果为负，把 `current` 追加到等待队列尾部并返回
    /// [`DownResult::Blocked`]。调用者负责修改进程状态并让出 CPU。
    pub fn down(&mut self, current: Pid) -> Result<DownResult, SemError> {
        self.count = self.count.checked_sub(1).ok_or(SemError::Overflow)?;

        let result = if self.count < 0 {
            self.wait.add_tail(current);
            DownResult::Blocked
        } else {
            DownResult::Acquired
        };

        debug_assert!(self.is_consistent());
        Ok(result)
    }

    /// V 操作
    ///
    /// 值加 1；若结果不大于 0，取出等待最久的进程返回，
    /// 调用者负责把它放入就绪队列。
    pub fn up(&mut self) -> Result<Option<Pid>, SemError> {
        self.count = self.count.checked_add(1).ok_or(SemError::Overflow)?;

        let woken = if self.count <= 0 {
            let pid = self.wait.pop_head();
            debug_assert!(pid.is_some(), "negative count with empty wait queue");
            pid
        } else {
            None
        };

        debug_assert!(self.is_consistent());
        Ok(woken)
    }

    /// 清零计数并取出所有等待者（按 FIFO 顺序）
    pub fn reset(&mut self) -> Vec<Pid> {
        self.count = 0;
        self.wait.drain()
    }

    /// 获取信号量当前值
    pub fn count(&self) -> i32 {
        self.count
    }

    /// 等待队列
    pub fn waiters(&self) -> &WaitQueueHead {
        &self.wait
    }

    /// 计数值与等待队列长度是否一致
    pub fn is_consistent(&self) -> bool {
        let expected = if self.count < 0 {
            self.count.unsigned_abs() as usize
        } else {
            0
        };
        self.wait.len() == expected
    }
}
