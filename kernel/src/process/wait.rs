//! 等待队列 (Wait Queue) 机制
//!
//! 参考 Linux 内核的等待队列设计：
//! - `include/linux/wait.h` - 等待队列数据结构
//! - `kernel/sched/wait.c` - 等待队列操作
//!
//! 与 Linux 不同，这里的等待队列只用于信号量，全部是独占等待
//! (WQ_FLAG_EXCLUSIVE)：入队追加到尾部，唤醒从头部取出，严格 FIFO。
//!
//! 等待队列自身不加锁。它总是和信号量计数值放在同一把锁后面，
//! 计数值与队列长度必须一起修改。

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::task::Pid;

/// 等待队列头
///
/// 对应 Linux 的 struct wait_queue_head (include/linux/wait.h)
#[derive(Debug, Default)]
pub struct WaitQueueHead {
    list: VecDeque<Pid>,
}

impl WaitQueueHead {
    /// 创建新的等待队列头
    ///
    /// 对应 Linux 的 DECLARE_WAIT_QUEUE_HEAD()
    pub const fn new() -> Self {
        Self {
            list: VecDeque::new(),
        }
    }

    /// 添加到等待队列尾部
    ///
    /// 对应 Linux 的 add_wait_queue_exclusive()
    pub fn add_tail(&mut self, pid: Pid) {
        debug_assert!(!self.contains(pid), "pid {} already waiting", pid);
        self.list.push_back(pid);
    }

    /// 取出最早进入队列的进程
    pub fn pop_head(&mut self) -> Option<Pid> {
        self.list.pop_front()
    }

    /// 清空队列，按 FIFO 顺序返回所有等待者
    pub fn drain(&mut self) -> Vec<Pid> {
        self.list.drain(..).collect()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.list.contains(&pid)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// 对应 Linux 的 waitqueue_active() 取反
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// 按 FIFO 顺序遍历等待者
    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.list.iter().copied()
    }
}
